//! 處理紀錄查詢與寫入

use order_core::{OccurrenceKey, OrderError, ResolutionLedger, ResolutionLedgerEntry, Result};

/// 處理紀錄查詢
pub struct LedgerCheck;

impl LedgerCheck {
    /// 該次配送是否已被處理（已下單 / 已確認庫存 / 略過）
    pub fn is_resolved(ledger: &dyn ResolutionLedger, key: &OccurrenceKey) -> Result<bool> {
        let resolved = ledger.has_resolution(key)?;
        if resolved {
            tracing::debug!(
                "配送已處理，不再提醒: 門市 {} 供應商 {} 日期 {}",
                key.store_id,
                key.supplier_id,
                key.occurrence_date
            );
        }
        Ok(resolved)
    }
}

/// 處理紀錄寫入
pub struct LedgerRecorder;

impl LedgerRecorder {
    /// 寫入處理紀錄，失敗時重試
    ///
    /// 所有嘗試都失敗時回傳 `LedgerWriteFailed`。
    pub fn record(
        ledger: &dyn ResolutionLedger,
        entry: &ResolutionLedgerEntry,
        max_attempts: u32,
    ) -> Result<()> {
        let attempts = max_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            match ledger.append(entry.clone()) {
                Ok(()) => {
                    tracing::info!(
                        "處理紀錄已寫入: 門市 {} 供應商 {} 日期 {} 狀態 {:?}（第 {} 次嘗試）",
                        entry.key.store_id,
                        entry.key.supplier_id,
                        entry.key.occurrence_date,
                        entry.status,
                        attempt
                    );
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!("處理紀錄寫入失敗（第 {}/{} 次）: {}", attempt, attempts, e);
                    last_error = Some(e);
                }
            }
        }

        let message = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "未知錯誤".to_string());
        tracing::error!(
            "處理紀錄寫入放棄: 門市 {} 供應商 {} 日期 {}: {}",
            entry.key.store_id,
            entry.key.supplier_id,
            entry.key.occurrence_date,
            message
        );

        Err(OrderError::LedgerWriteFailed { attempts, message })
    }
}
