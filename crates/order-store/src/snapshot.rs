//! JSON 快照：一次載入供應商與門市設定

use order_core::{OrderError, Result, StoreSettings, Supplier};
use serde::{Deserialize, Serialize};

use crate::memory::{InMemoryStoreSettings, InMemorySupplierDirectory};

/// 供應商與門市設定快照
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSnapshot {
    pub suppliers: Vec<Supplier>,
    pub stores: Vec<StoreSettings>,
}

impl StoreSnapshot {
    /// 從 JSON 載入並驗證
    ///
    /// 供應商排程錯誤只記錄警告，引擎評估時會跳過該供應商。
    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| OrderError::ConfigurationError(format!("快照解析失敗: {}", e)))?;

        for supplier in &snapshot.suppliers {
            if let Err(e) = supplier.validate() {
                tracing::warn!("快照中的供應商 {} 排程無效: {}", supplier.id, e);
            }
        }
        for store in &snapshot.stores {
            if store.timezone.is_some() {
                store.tz()?;
            }
        }

        tracing::info!(
            "已載入快照：供應商 {} 家，門市 {} 間",
            snapshot.suppliers.len(),
            snapshot.stores.len()
        );
        Ok(snapshot)
    }

    /// 輸出為 JSON
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| OrderError::Storage(format!("快照序列化失敗: {}", e)))
    }

    pub fn directory(&self) -> InMemorySupplierDirectory {
        InMemorySupplierDirectory::new(self.suppliers.clone())
    }

    pub fn store_settings(&self) -> InMemoryStoreSettings {
        InMemoryStoreSettings::new(self.stores.clone())
    }
}
