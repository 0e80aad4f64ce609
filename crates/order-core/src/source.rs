//! 外部協作者介面（供應商目錄、門市設定、處理紀錄帳本）

use chrono::NaiveDate;

use crate::ledger::{OccurrenceKey, ResolutionLedgerEntry};
use crate::store::StoreSettings;
use crate::supplier::Supplier;
use crate::Result;

/// 供應商目錄
pub trait SupplierDirectory: Send + Sync {
    /// 門市可用且已啟用的供應商（已依適用範圍過濾）
    fn list_active_suppliers(&self, store_id: &str) -> Result<Vec<Supplier>>;

    /// 依ID查詢供應商，不存在時回傳 `NotFound`
    fn get_supplier(&self, supplier_id: &str) -> Result<Supplier>;

    /// 設置門市偏好下單日（先移除舊值再寫入）
    fn set_preferred_order_day(
        &self,
        supplier_id: &str,
        store_id: &str,
        day_of_week: u8,
    ) -> Result<()>;

    /// 移除門市偏好下單日
    fn clear_preferred_order_day(&self, supplier_id: &str, store_id: &str) -> Result<()>;
}

/// 門市設定來源
pub trait StoreSettingsSource: Send + Sync {
    /// 查詢門市設定，不存在時回傳 `NotFound`
    fn store_settings(&self, store_id: &str) -> Result<StoreSettings>;
}

/// 處理紀錄帳本
///
/// 讀取端只判斷是否存在，因此重複寫入同一組鍵不影響結果。
pub trait ResolutionLedger: Send + Sync {
    fn has_resolution(&self, key: &OccurrenceKey) -> Result<bool>;

    fn append(&self, entry: ResolutionLedgerEntry) -> Result<()>;

    /// 便利方法：以三元組查詢
    fn has_resolution_for(
        &self,
        store_id: &str,
        supplier_id: &str,
        occurrence_date: NaiveDate,
    ) -> Result<bool> {
        self.has_resolution(&OccurrenceKey::new(store_id, supplier_id, occurrence_date))
    }
}
