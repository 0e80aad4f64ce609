//! 門市訂貨提醒引擎

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use order_core::{
    Alert, EngineConfig, OccurrenceKey, OrderError, ResolutionLedger, ResolutionLedgerEntry,
    ResolutionStatus, Result, StoreSettings, StoreSettingsSource, Supplier, SupplierDirectory,
};
use rayon::prelude::*;

use crate::calendar::CalendarResolver;
use crate::ledger::{LedgerCheck, LedgerRecorder};
use crate::policy::{AlertPolicy, PreferenceResolver};
use crate::scanner::AlertScanner;
use crate::{AlertReport, EngineWarning};

/// 單一供應商的評估結果
#[derive(Debug, Default)]
struct SupplierEvaluation {
    alert: Option<Alert>,
    warnings: Vec<EngineWarning>,
}

/// 訂貨提醒引擎
pub struct AlertEngine {
    /// 供應商目錄
    directory: Arc<dyn SupplierDirectory>,

    /// 門市設定
    settings: Arc<dyn StoreSettingsSource>,

    /// 處理紀錄帳本
    ledger: Arc<dyn ResolutionLedger>,

    /// 引擎配置
    config: EngineConfig,
}

impl AlertEngine {
    /// 創建新的提醒引擎（使用預設配置）
    pub fn new(
        directory: Arc<dyn SupplierDirectory>,
        settings: Arc<dyn StoreSettingsSource>,
        ledger: Arc<dyn ResolutionLedger>,
    ) -> Self {
        Self {
            directory,
            settings,
            ledger,
            config: EngineConfig::default(),
        }
    }

    /// 建構器模式：設置引擎配置
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// 查詢門市在指定日期的提醒
    pub fn alerts_for_store(&self, store_id: &str, today: NaiveDate) -> Result<AlertReport> {
        let settings = self.settings.store_settings(store_id)?;
        self.evaluate_store(&settings, today)
    }

    /// 以當前時間查詢門市提醒（依門市時區換算今天）
    ///
    /// 門市未設定時區時回傳 `ConfigurationError`。
    pub fn alerts_for_store_at(&self, store_id: &str, now: DateTime<Utc>) -> Result<AlertReport> {
        let settings = self.settings.store_settings(store_id)?;
        let tz = settings.tz()?;
        let today = now.with_timezone(&tz).date_naive();
        self.evaluate_store(&settings, today)
    }

    fn evaluate_store(&self, settings: &StoreSettings, today: NaiveDate) -> Result<AlertReport> {
        let start_time = std::time::Instant::now();
        let suppliers = self.directory.list_active_suppliers(&settings.store_id)?;

        tracing::info!(
            "開始計算訂貨提醒：門市 {}，日期 {}，供應商 {} 家",
            settings.store_id,
            today,
            suppliers.len()
        );

        // 各供應商互不相依，平行評估後依原順序收集
        let evaluations: Vec<Result<SupplierEvaluation>> = suppliers
            .par_iter()
            .map(|supplier| self.evaluate_supplier(settings, supplier, today))
            .collect();

        let mut report = AlertReport::empty(settings.store_id.clone(), today);
        for (supplier, evaluation) in suppliers.iter().zip(evaluations) {
            match evaluation {
                Ok(evaluation) => {
                    report.alerts.extend(evaluation.alert);
                    report.warnings.extend(evaluation.warnings);
                }
                Err(e) => {
                    tracing::warn!("供應商 {} 評估失敗，略過: {}", supplier.id, e);
                    report.add_warning(EngineWarning::warning(supplier.id.clone(), e.to_string()));
                }
            }
        }

        report.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!(
            "訂貨提醒計算完成：提醒 {} 筆，警告 {} 筆，耗時 {:?}",
            report.alerts.len(),
            report.warnings.len(),
            start_time.elapsed()
        );

        Ok(report)
    }

    /// 評估單一供應商：策略 → 掃描 → 處理紀錄
    fn evaluate_supplier(
        &self,
        settings: &StoreSettings,
        supplier: &Supplier,
        today: NaiveDate,
    ) -> Result<SupplierEvaluation> {
        let mut evaluation = SupplierEvaluation::default();

        if !supplier.is_available_to(&settings.store_id) {
            tracing::debug!("供應商 {} 不適用門市 {}，跳過", supplier.id, settings.store_id);
            return Ok(evaluation);
        }

        supplier.validate()?;

        if self.config.warn_on_overlapping_overrides {
            for (first, second) in supplier.overlapping_overrides() {
                evaluation.warnings.push(EngineWarning::info(
                    supplier.id.clone(),
                    format!("臨時覆寫 #{} 與 #{} 區間重疊，以 #{} 為準", first, second, first),
                ));
            }
        }

        if !CalendarResolver::has_any_schedule(supplier) {
            tracing::debug!("供應商 {} 沒有配送排程，不提醒", supplier.id);
            return Ok(evaluation);
        }

        let policy = PreferenceResolver::resolve(settings, supplier);
        tracing::debug!("供應商 {} 提醒策略: {:?}", supplier.id, policy);

        let Some(occurrence) = AlertScanner::scan(today, supplier, &policy) else {
            return Ok(evaluation);
        };

        let key = OccurrenceKey::new(
            settings.store_id.clone(),
            supplier.id.clone(),
            occurrence.delivery_date,
        );

        // 讀取失敗視為未處理
        let resolved = LedgerCheck::is_resolved(self.ledger.as_ref(), &key).unwrap_or_else(|e| {
            tracing::warn!("處理紀錄讀取失敗，視為未處理: {}", e);
            evaluation.warnings.push(EngineWarning::warning(
                supplier.id.clone(),
                format!("處理紀錄讀取失敗: {}", e),
            ));
            false
        });
        if resolved {
            return Ok(evaluation);
        }

        let preferred_day = match policy {
            AlertPolicy::PreferenceBased { preferred_day } => Some(preferred_day),
            _ => None,
        };

        evaluation.alert = Some(Alert {
            supplier_id: supplier.id.clone(),
            supplier_name: supplier.name.clone(),
            delivery_date: occurrence.delivery_date,
            order_by_date: occurrence.order_by_date,
            cutoff_time: occurrence.cutoff_time().to_string(),
            lead_days: occurrence.lead_days(),
            is_preference_based: preferred_day.is_some(),
            preferred_day,
        });

        Ok(evaluation)
    }

    /// 記錄使用者對某次配送的處理（已下單 / 已確認庫存 / 略過）
    ///
    /// 寫入失敗會依配置重試，最終仍失敗時回傳錯誤。
    pub fn resolve(
        &self,
        store_id: &str,
        supplier_id: &str,
        occurrence_date: NaiveDate,
        status: ResolutionStatus,
        at: DateTime<Utc>,
    ) -> Result<ResolutionLedgerEntry> {
        self.settings.store_settings(store_id)?;
        self.directory.get_supplier(supplier_id)?;

        let key = OccurrenceKey::new(store_id, supplier_id, occurrence_date);
        let entry = ResolutionLedgerEntry::new(key, status, at);
        LedgerRecorder::record(self.ledger.as_ref(), &entry, self.config.ledger_write_attempts)?;

        Ok(entry)
    }

    /// 設置門市對供應商的固定下單日
    pub fn set_preferred_order_day(
        &self,
        supplier_id: &str,
        store_id: &str,
        day_of_week: u8,
    ) -> Result<()> {
        if day_of_week > 6 {
            return Err(OrderError::InvalidSchedule(format!(
                "星期索引超出範圍: {}",
                day_of_week
            )));
        }

        self.directory
            .set_preferred_order_day(supplier_id, store_id, day_of_week)?;
        tracing::info!(
            "門市 {} 對供應商 {} 的固定下單日設為 {}",
            store_id,
            supplier_id,
            day_of_week
        );
        Ok(())
    }

    /// 移除門市對供應商的固定下單日
    pub fn clear_preferred_order_day(&self, supplier_id: &str, store_id: &str) -> Result<()> {
        self.directory.clear_preferred_order_day(supplier_id, store_id)
    }

    /// 獲取引擎配置
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
