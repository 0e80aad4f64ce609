//! # Order Calculation Engine
//!
//! 供應商訂貨提醒與訂貨計劃的計算引擎

pub mod alerts;
pub mod calendar;
pub mod deadline;
pub mod ledger;
pub mod matcher;
pub mod planner;
pub mod policy;
pub mod scanner;

// Re-export 主要類型
pub use alerts::AlertEngine;
pub use calendar::CalendarResolver;
pub use deadline::DeadlineCalculator;
pub use ledger::{LedgerCheck, LedgerRecorder};
pub use matcher::{CatalogMatcher, SubstringMatcher};
pub use planner::{CandidateDelivery, MatchedItem, OrderPlanner};
pub use policy::{AlertPolicy, OffsetSource, PreferenceResolver};
pub use scanner::{AlertScanner, Occurrence};

use chrono::NaiveDate;
use order_core::Alert;

/// 單一門市的提醒查詢結果
#[derive(Debug, Clone)]
pub struct AlertReport {
    /// 門市ID
    pub store_id: String,

    /// 查詢日期（門市當地日期）
    pub date: NaiveDate,

    /// 提醒（依供應商清單順序）
    pub alerts: Vec<Alert>,

    /// 警告信息（單一供應商出錯不會中斷整體查詢）
    pub warnings: Vec<EngineWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl AlertReport {
    /// 創建空的查詢結果
    pub fn empty(store_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            store_id: store_id.into(),
            date,
            alerts: Vec::new(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: EngineWarning) {
        self.warnings.push(warning);
    }

    /// 查詢指定供應商的提醒
    pub fn alert_for(&self, supplier_id: &str) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.supplier_id == supplier_id)
    }
}

/// 引擎警告
#[derive(Debug, Clone)]
pub struct EngineWarning {
    pub supplier_id: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl EngineWarning {
    pub fn new(supplier_id: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            supplier_id,
            message,
            severity,
        }
    }

    pub fn info(supplier_id: String, message: String) -> Self {
        Self::new(supplier_id, message, WarningSeverity::Info)
    }

    pub fn warning(supplier_id: String, message: String) -> Self {
        Self::new(supplier_id, message, WarningSeverity::Warning)
    }

    pub fn error(supplier_id: String, message: String) -> Self {
        Self::new(supplier_id, message, WarningSeverity::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}
