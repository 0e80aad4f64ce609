//! # Order Core
//!
//! 供應商訂貨排程的核心資料模型與類型定義

pub mod alert;
pub mod config;
pub mod ledger;
pub mod plan;
pub mod schedule;
pub mod source;
pub mod store;
pub mod supplier;

// Re-export 主要類型
pub use alert::Alert;
pub use config::{
    EngineConfig, PLAN_LOOKAHEAD_DAYS, PREFERENCE_LOOKAHEAD_DAYS, WINDOW_LOOKAHEAD_DAYS,
};
pub use ledger::{OccurrenceKey, ResolutionLedgerEntry, ResolutionStatus};
pub use plan::{Plan, PlanItem, PlanResult, UnmatchedItem, UnmatchedReason};
pub use schedule::{day_of_week, DeliverySchedule, ScheduleEntry, TemporaryOverride};
pub use source::{ResolutionLedger, StoreSettingsSource, SupplierDirectory};
pub use store::{StoreAlertException, StoreSettings};
pub use supplier::{AlertSettings, CatalogItem, StorePreference, StoreScope, Supplier};

/// 訂貨引擎錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("找不到資料: {0}")]
    NotFound(String),

    #[error("配置錯誤: {0}")]
    ConfigurationError(String),

    #[error("無效的配送排程: {0}")]
    InvalidSchedule(String),

    #[error("無效的日期: {0}")]
    InvalidDate(String),

    #[error("處理紀錄寫入失敗（已嘗試 {attempts} 次）: {message}")]
    LedgerWriteFailed { attempts: u32, message: String },

    #[error("儲存層錯誤: {0}")]
    Storage(String),

    #[error("其他錯誤: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, OrderError>;
