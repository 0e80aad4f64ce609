//! 提醒處理紀錄（只增不改的冪等帳本）

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 處理狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    /// 已下單
    Ordered,
    /// 已確認庫存
    CheckedStock,
    /// 略過
    Skipped,
}

/// 一次配送的識別鍵（門市, 供應商, 配送日期）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceKey {
    pub store_id: String,
    pub supplier_id: String,
    pub occurrence_date: NaiveDate,
}

impl OccurrenceKey {
    pub fn new(
        store_id: impl Into<String>,
        supplier_id: impl Into<String>,
        occurrence_date: NaiveDate,
    ) -> Self {
        Self {
            store_id: store_id.into(),
            supplier_id: supplier_id.into(),
            occurrence_date,
        }
    }
}

/// 處理紀錄
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionLedgerEntry {
    /// 紀錄ID
    pub id: Uuid,

    #[serde(flatten)]
    pub key: OccurrenceKey,

    /// 處理狀態
    pub status: ResolutionStatus,

    /// 處理時間
    pub timestamp: DateTime<Utc>,
}

impl ResolutionLedgerEntry {
    /// 創建新的處理紀錄
    pub fn new(key: OccurrenceKey, status: ResolutionStatus, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            key,
            status,
            timestamp,
        }
    }

    /// 檢查紀錄是否對應指定配送（任何狀態都視為已處理）
    pub fn resolves(&self, key: &OccurrenceKey) -> bool {
        &self.key == key
    }
}
