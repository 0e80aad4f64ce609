//! # Order Store
//!
//! 記憶體內的供應商目錄、門市設定與處理紀錄帳本，以及 JSON 快照載入

pub mod memory;
pub mod snapshot;

// Re-export 主要類型
pub use memory::{InMemoryLedger, InMemoryStoreSettings, InMemorySupplierDirectory};
pub use snapshot::StoreSnapshot;
