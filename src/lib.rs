//! # Order Engine
//!
//! 供應商訂貨提醒與訂貨計劃引擎
//!
//! - [`AlertEngine`]：依每週配送排程、提前期、臨時覆寫、門市偏好與例外設定，
//!   判斷門市今天是否需要向供應商下單，同一次配送在處理前最多提醒一次
//! - [`OrderPlanner`]：將購物清單比對到供應商目錄，產生依截止時間排序的合併計劃
//!
//! ```no_run
//! use std::sync::Arc;
//! use order_engine::{AlertEngine, InMemoryLedger, StoreSnapshot};
//!
//! let snapshot = StoreSnapshot::from_json_str(r#"{ "suppliers": [], "stores": [] }"#)?;
//! let engine = AlertEngine::new(
//!     Arc::new(snapshot.directory()),
//!     Arc::new(snapshot.store_settings()),
//!     Arc::new(InMemoryLedger::new()),
//! );
//! let report = engine.alerts_for_store_at("STORE-A", chrono::Utc::now())?;
//! # Ok::<(), order_engine::OrderError>(())
//! ```

pub mod logging;

pub use order_calc::{
    AlertEngine, AlertReport, CandidateDelivery, CatalogMatcher, EngineWarning, MatchedItem,
    OrderPlanner, SubstringMatcher, WarningSeverity,
};
pub use order_core::*;
pub use order_store::{InMemoryLedger, InMemoryStoreSettings, InMemorySupplierDirectory, StoreSnapshot};
