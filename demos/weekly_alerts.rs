//! 一週提醒模擬：逐日查詢提醒、處理後再產生一份訂貨計劃
//!
//! 執行：`cargo run --example weekly_alerts`

use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use order_engine::{
    logging, AlertEngine, DeliverySchedule, InMemoryLedger, InMemoryStoreSettings,
    InMemorySupplierDirectory, OrderPlanner, ResolutionStatus, ScheduleEntry, StoreAlertException,
    StoreSettings, Supplier,
};
use rust_decimal::Decimal;

const STORE: &str = "STORE-A";

fn suppliers() -> Vec<Supplier> {
    vec![
        Supplier::new("SUP-001", "Produce Co")
            .with_schedule(
                DeliverySchedule::new()
                    .with_entry(ScheduleEntry::new(2, 1, "10:00"))
                    .with_entry(ScheduleEntry::new(5, 2, "12:00")),
            )
            .with_catalog(["Round Tomatoes 5kg", "Red Onions", "Lemons"])
            .with_minimum_order(Decimal::from(150), true),
        Supplier::new("SUP-002", "Dairy Farm")
            .with_schedule(DeliverySchedule::new().with_entry(ScheduleEntry::new(4, 2, "16:00")))
            .with_catalog(["Whole Milk", "Butter", "Cream"])
            .with_default_offset_days(3),
        Supplier::new("SUP-003", "Fishmonger")
            .with_schedule(DeliverySchedule::new().with_entry(ScheduleEntry::new(3, 1, "08:00")))
            .with_catalog(["Cod Fillet"]),
    ]
}

fn main() -> Result<()> {
    logging::init();

    let directory = Arc::new(InMemorySupplierDirectory::new(suppliers()));
    let settings = Arc::new(InMemoryStoreSettings::new(vec![StoreSettings::new(STORE)
        .with_timezone("Europe/Madrid")
        .with_exception(StoreAlertException::new("SUP-003").ignored())]));
    let ledger = Arc::new(InMemoryLedger::new());

    let engine = AlertEngine::new(directory.clone(), settings.clone(), ledger.clone());
    engine.set_preferred_order_day("SUP-002", STORE, 1)?;

    let monday = NaiveDate::from_ymd_opt(2025, 10, 6).ok_or_else(|| anyhow::anyhow!("日期無效"))?;
    for offset in 0..7 {
        let today = monday + Duration::days(offset);
        let report = engine.alerts_for_store(STORE, today)?;

        println!("{} ({})", today, today.format("%a"));
        for alert in &report.alerts {
            println!(
                "  {} 配送 {}，{} {} 前下單{}",
                alert.supplier_name,
                alert.delivery_date,
                alert.order_by_date,
                alert.cutoff_time,
                if alert.is_preference_based { "（偏好日）" } else { "" }
            );

            let at = Utc
                .with_ymd_and_hms(2025, 10, 6, 9, 0, 0)
                .single()
                .ok_or_else(|| anyhow::anyhow!("時間無效"))?
                + Duration::days(offset);
            engine.resolve(
                STORE,
                &alert.supplier_id,
                alert.delivery_date,
                ResolutionStatus::Ordered,
                at,
            )?;
        }
        for warning in &report.warnings {
            println!("  ! {}: {}", warning.supplier_id, warning.message);
        }
    }
    println!("處理紀錄 {} 筆", ledger.len()?);

    let planner = OrderPlanner::new(directory, settings);
    let now = Utc
        .with_ymd_and_hms(2025, 10, 6, 8, 0, 0)
        .single()
        .ok_or_else(|| anyhow::anyhow!("時間無效"))?;
    let result = planner.generate_plan(&["tomatoes", "milk", "lemons", "saffron"], STORE, now)?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
