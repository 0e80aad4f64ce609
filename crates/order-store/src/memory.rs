//! 記憶體內的協作者實作

use std::collections::HashMap;
use std::sync::RwLock;

use order_core::{
    OccurrenceKey, OrderError, ResolutionLedger, ResolutionLedgerEntry, Result, StoreSettings,
    StoreSettingsSource, Supplier, SupplierDirectory,
};

fn poisoned(what: &str) -> OrderError {
    OrderError::Storage(format!("{} 鎖已損毀", what))
}

/// 記憶體內的供應商目錄
///
/// 保留建立時的供應商順序，查詢結果依此順序回傳。
#[derive(Debug, Default)]
pub struct InMemorySupplierDirectory {
    suppliers: RwLock<Vec<Supplier>>,
}

impl InMemorySupplierDirectory {
    pub fn new(suppliers: Vec<Supplier>) -> Self {
        Self {
            suppliers: RwLock::new(suppliers),
        }
    }

    /// 新增或取代供應商
    pub fn upsert(&self, supplier: Supplier) -> Result<()> {
        let mut suppliers = self.suppliers.write().map_err(|_| poisoned("供應商目錄"))?;
        match suppliers.iter_mut().find(|s| s.id == supplier.id) {
            Some(existing) => *existing = supplier,
            None => suppliers.push(supplier),
        }
        Ok(())
    }

    pub fn len(&self) -> Result<usize> {
        let suppliers = self.suppliers.read().map_err(|_| poisoned("供應商目錄"))?;
        Ok(suppliers.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn update<F>(&self, supplier_id: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Supplier) -> Result<()>,
    {
        let mut suppliers = self.suppliers.write().map_err(|_| poisoned("供應商目錄"))?;
        let supplier = suppliers
            .iter_mut()
            .find(|s| s.id == supplier_id)
            .ok_or_else(|| OrderError::NotFound(format!("供應商 {}", supplier_id)))?;
        f(supplier)
    }
}

impl SupplierDirectory for InMemorySupplierDirectory {
    fn list_active_suppliers(&self, store_id: &str) -> Result<Vec<Supplier>> {
        let suppliers = self.suppliers.read().map_err(|_| poisoned("供應商目錄"))?;
        Ok(suppliers
            .iter()
            .filter(|s| s.is_available_to(store_id))
            .cloned()
            .collect())
    }

    fn get_supplier(&self, supplier_id: &str) -> Result<Supplier> {
        let suppliers = self.suppliers.read().map_err(|_| poisoned("供應商目錄"))?;
        suppliers
            .iter()
            .find(|s| s.id == supplier_id)
            .cloned()
            .ok_or_else(|| OrderError::NotFound(format!("供應商 {}", supplier_id)))
    }

    fn set_preferred_order_day(
        &self,
        supplier_id: &str,
        store_id: &str,
        day_of_week: u8,
    ) -> Result<()> {
        tracing::debug!(
            "設置偏好下單日：供應商 {}，門市 {}，星期 {}",
            supplier_id,
            store_id,
            day_of_week
        );
        self.update(supplier_id, |s| s.set_preferred_order_day(store_id, day_of_week))
    }

    fn clear_preferred_order_day(&self, supplier_id: &str, store_id: &str) -> Result<()> {
        self.update(supplier_id, |s| {
            s.clear_preferred_order_day(store_id);
            Ok(())
        })
    }
}

/// 記憶體內的門市設定
#[derive(Debug, Default)]
pub struct InMemoryStoreSettings {
    stores: HashMap<String, StoreSettings>,
}

impl InMemoryStoreSettings {
    pub fn new(stores: Vec<StoreSettings>) -> Self {
        Self {
            stores: stores
                .into_iter()
                .map(|s| (s.store_id.clone(), s))
                .collect(),
        }
    }

    /// 建構器模式：新增門市
    pub fn with_store(mut self, settings: StoreSettings) -> Self {
        self.stores.insert(settings.store_id.clone(), settings);
        self
    }
}

impl StoreSettingsSource for InMemoryStoreSettings {
    fn store_settings(&self, store_id: &str) -> Result<StoreSettings> {
        self.stores
            .get(store_id)
            .cloned()
            .ok_or_else(|| OrderError::NotFound(format!("門市 {}", store_id)))
    }
}

/// 記憶體內的處理紀錄帳本（僅附加）
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    entries: RwLock<Vec<ResolutionLedgerEntry>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize> {
        let entries = self.entries.read().map_err(|_| poisoned("處理紀錄帳本"))?;
        Ok(entries.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// 所有紀錄的快照（依寫入順序）
    pub fn entries(&self) -> Result<Vec<ResolutionLedgerEntry>> {
        let entries = self.entries.read().map_err(|_| poisoned("處理紀錄帳本"))?;
        Ok(entries.clone())
    }
}

impl ResolutionLedger for InMemoryLedger {
    fn has_resolution(&self, key: &OccurrenceKey) -> Result<bool> {
        let entries = self.entries.read().map_err(|_| poisoned("處理紀錄帳本"))?;
        Ok(entries.iter().any(|e| e.resolves(key)))
    }

    fn append(&self, entry: ResolutionLedgerEntry) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned("處理紀錄帳本"))?;
        entries.push(entry);
        Ok(())
    }
}
