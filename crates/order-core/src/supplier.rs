//! 供應商模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::schedule::{DeliverySchedule, TemporaryOverride};
use crate::{OrderError, Result};

/// 供應商適用範圍
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StoreScope {
    /// 所有門市可用
    Global,
    /// 僅限指定門市
    Store(String),
}

/// 商品目錄項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
}

impl CatalogItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// 提醒設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertSettings {
    /// 預設提醒提前天數（未設定時使用該次配送的提前期）
    pub default_offset_days: Option<u32>,
}

/// 門市偏好下單日
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorePreference {
    pub store_id: String,

    /// 固定下單星期（0 = 週日 ... 6 = 週六）
    pub preferred_order_day: Option<u8>,
}

/// 供應商
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    /// 供應商ID
    pub id: String,

    /// 名稱
    pub name: String,

    /// 是否啟用
    pub active: bool,

    /// 適用門市範圍
    pub store_scope: StoreScope,

    /// 商品目錄（依序比對）
    #[serde(default)]
    pub catalog_items: Vec<CatalogItem>,

    /// 預設每週配送排程
    #[serde(default)]
    pub default_schedule: DeliverySchedule,

    /// 臨時排程覆寫（第一個符合的區間生效）
    #[serde(default)]
    pub temporary_overrides: Vec<TemporaryOverride>,

    /// 提醒設定
    #[serde(default)]
    pub alert_settings: AlertSettings,

    /// 各門市偏好下單日
    #[serde(default)]
    pub store_preferences: Vec<StorePreference>,

    /// 最低訂購金額（僅供顯示）
    pub minimum_order_value: Option<Decimal>,

    /// 最低訂購金額是否為未稅
    pub minimum_order_is_tax_exclusive: Option<bool>,
}

impl Supplier {
    /// 創建新的供應商（預設啟用、全門市可用）
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            active: true,
            store_scope: StoreScope::Global,
            catalog_items: Vec::new(),
            default_schedule: DeliverySchedule::new(),
            temporary_overrides: Vec::new(),
            alert_settings: AlertSettings::default(),
            store_preferences: Vec::new(),
            minimum_order_value: None,
            minimum_order_is_tax_exclusive: None,
        }
    }

    /// 建構器模式：設置適用門市
    pub fn with_store_scope(mut self, scope: StoreScope) -> Self {
        self.store_scope = scope;
        self
    }

    /// 建構器模式：設置預設排程
    pub fn with_schedule(mut self, schedule: DeliverySchedule) -> Self {
        self.default_schedule = schedule;
        self
    }

    /// 建構器模式：添加臨時覆寫
    pub fn with_override(mut self, temporary: TemporaryOverride) -> Self {
        self.temporary_overrides.push(temporary);
        self
    }

    /// 建構器模式：設置商品目錄
    pub fn with_catalog<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.catalog_items = names.into_iter().map(CatalogItem::new).collect();
        self
    }

    /// 建構器模式：設置預設提醒提前天數
    pub fn with_default_offset_days(mut self, days: u32) -> Self {
        self.alert_settings.default_offset_days = Some(days);
        self
    }

    /// 建構器模式：設置最低訂購金額
    pub fn with_minimum_order(mut self, value: Decimal, tax_exclusive: bool) -> Self {
        self.minimum_order_value = Some(value);
        self.minimum_order_is_tax_exclusive = Some(tax_exclusive);
        self
    }

    /// 建構器模式：設置為停用
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// 檢查門市是否可使用此供應商
    pub fn is_available_to(&self, store_id: &str) -> bool {
        self.active
            && match &self.store_scope {
                StoreScope::Global => true,
                StoreScope::Store(id) => id == store_id,
            }
    }

    /// 查詢門市的偏好下單日
    pub fn preferred_order_day(&self, store_id: &str) -> Option<u8> {
        self.store_preferences
            .iter()
            .find(|p| p.store_id == store_id)
            .and_then(|p| p.preferred_order_day)
    }

    /// 設置門市偏好下單日
    ///
    /// 先移除該門市既有的偏好再寫入，確保每個（供應商, 門市）只保留一筆。
    /// 星期超出 0..=6 時回傳 `InvalidSchedule`，既有偏好不變。
    pub fn set_preferred_order_day(&mut self, store_id: &str, day_of_week: u8) -> Result<()> {
        check_preferred_day(store_id, day_of_week)?;

        self.clear_preferred_order_day(store_id);
        self.store_preferences.push(StorePreference {
            store_id: store_id.to_string(),
            preferred_order_day: Some(day_of_week),
        });
        Ok(())
    }

    /// 移除門市偏好下單日
    pub fn clear_preferred_order_day(&mut self, store_id: &str) {
        self.store_preferences.retain(|p| p.store_id != store_id);
    }

    /// 找出互相重疊的臨時覆寫（索引對）
    pub fn overlapping_overrides(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in self.temporary_overrides.iter().enumerate() {
            for (j, b) in self.temporary_overrides.iter().enumerate().skip(i + 1) {
                if a.overlaps(b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    /// 驗證預設排程、所有覆寫排程與門市偏好下單日
    pub fn validate(&self) -> Result<()> {
        self.default_schedule.validate()?;
        for temporary in &self.temporary_overrides {
            temporary.schedule.validate()?;
        }
        for preference in &self.store_preferences {
            if let Some(day) = preference.preferred_order_day {
                check_preferred_day(&preference.store_id, day)?;
            }
        }
        Ok(())
    }
}

fn check_preferred_day(store_id: &str, day_of_week: u8) -> Result<()> {
    if day_of_week > 6 {
        return Err(OrderError::InvalidSchedule(format!(
            "門市 {} 的偏好下單日超出範圍: {}",
            store_id, day_of_week
        )));
    }
    Ok(())
}
