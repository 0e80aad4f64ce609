//! 門市設定模型

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::{OrderError, Result};

/// 門市對個別供應商的提醒例外設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreAlertException {
    pub supplier_id: String,

    /// 覆寫供應商預設的提醒提前天數
    pub alert_offset_days: Option<u32>,

    /// 忽略此供應商的所有提醒
    #[serde(default)]
    pub ignored: bool,
}

impl StoreAlertException {
    pub fn new(supplier_id: impl Into<String>) -> Self {
        Self {
            supplier_id: supplier_id.into(),
            alert_offset_days: None,
            ignored: false,
        }
    }

    /// 建構器模式：設置提醒提前天數
    pub fn with_offset_days(mut self, days: u32) -> Self {
        self.alert_offset_days = Some(days);
        self
    }

    /// 建構器模式：設置為忽略
    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }
}

/// 門市設定
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    /// 門市ID
    pub store_id: String,

    /// 門市時區（IANA 名稱，例如 "Europe/Madrid"）
    pub timezone: Option<String>,

    /// 門市層級的預設提醒提前天數
    pub default_offset_days: Option<u32>,

    /// 各供應商例外設定
    #[serde(default)]
    pub exceptions: Vec<StoreAlertException>,
}

impl StoreSettings {
    /// 創建新的門市設定
    pub fn new(store_id: impl Into<String>) -> Self {
        Self {
            store_id: store_id.into(),
            timezone: None,
            default_offset_days: None,
            exceptions: Vec::new(),
        }
    }

    /// 建構器模式：設置時區
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    /// 建構器模式：設置門市預設提醒提前天數
    pub fn with_default_offset_days(mut self, days: u32) -> Self {
        self.default_offset_days = Some(days);
        self
    }

    /// 建構器模式：添加例外設定
    pub fn with_exception(mut self, exception: StoreAlertException) -> Self {
        self.exceptions.push(exception);
        self
    }

    /// 查詢供應商的例外設定
    pub fn exception_for(&self, supplier_id: &str) -> Option<&StoreAlertException> {
        self.exceptions.iter().find(|e| e.supplier_id == supplier_id)
    }

    /// 解析門市時區
    ///
    /// 未設定或無法解析時回傳 `ConfigurationError`，不使用預設時區。
    pub fn tz(&self) -> Result<Tz> {
        let name = self.timezone.as_deref().ok_or_else(|| {
            OrderError::ConfigurationError(format!("門市 {} 未設定時區", self.store_id))
        })?;

        name.parse::<Tz>().map_err(|e| {
            OrderError::ConfigurationError(format!(
                "門市 {} 時區無法解析 '{}': {}",
                self.store_id, name, e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exception_lookup() {
        let settings = StoreSettings::new("STORE-A")
            .with_exception(StoreAlertException::new("SUP-001").with_offset_days(4))
            .with_exception(StoreAlertException::new("SUP-002").ignored());

        assert_eq!(
            settings.exception_for("SUP-001").unwrap().alert_offset_days,
            Some(4)
        );
        assert!(settings.exception_for("SUP-002").unwrap().ignored);
        assert!(settings.exception_for("SUP-003").is_none());
    }

    #[test]
    fn test_timezone_resolution() {
        let settings = StoreSettings::new("STORE-A").with_timezone("Europe/Madrid");
        assert_eq!(settings.tz().unwrap(), chrono_tz::Europe::Madrid);
    }

    #[test]
    fn test_missing_timezone_is_configuration_error() {
        let settings = StoreSettings::new("STORE-A");
        assert!(matches!(settings.tz(), Err(OrderError::ConfigurationError(_))));

        let invalid = StoreSettings::new("STORE-B").with_timezone("Mars/Olympus");
        assert!(matches!(invalid.tz(), Err(OrderError::ConfigurationError(_))));
    }
}
