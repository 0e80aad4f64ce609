//! 引擎配置

use serde::{Deserialize, Serialize};

use crate::{OrderError, Result};

/// 區間提醒的前瞻天數（含今天：0..13）
pub const WINDOW_LOOKAHEAD_DAYS: u32 = 14;

/// 固定下單日提醒的前瞻天數
pub const PREFERENCE_LOOKAHEAD_DAYS: u32 = 21;

/// 訂貨計劃尋找可用配送的前瞻天數
pub const PLAN_LOOKAHEAD_DAYS: u32 = 14;

/// 引擎配置
///
/// 前瞻天數為固定常數，不屬於可調整的配置。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// 處理紀錄寫入的最大嘗試次數（至少 1 次）
    pub ledger_write_attempts: u32,

    /// 發現臨時覆寫區間重疊時是否記錄警告
    pub warn_on_overlapping_overrides: bool,
}

impl EngineConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            ledger_write_attempts: 3,
            warn_on_overlapping_overrides: true,
        }
    }

    /// 建構器模式：設置寫入嘗試次數
    pub fn with_ledger_write_attempts(mut self, attempts: u32) -> Self {
        self.ledger_write_attempts = attempts;
        self
    }

    /// 建構器模式：設置是否警告重疊覆寫
    pub fn with_overlap_warnings(mut self, enabled: bool) -> Self {
        self.warn_on_overlapping_overrides = enabled;
        self
    }

    /// 從 JSON 載入配置（缺少的欄位使用預設值）
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| OrderError::ConfigurationError(format!("引擎配置解析失敗: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// 驗證配置
    pub fn validate(&self) -> Result<()> {
        if self.ledger_write_attempts == 0 {
            return Err(OrderError::ConfigurationError(
                "ledgerWriteAttempts 至少為 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
