//! 提醒掃描：在前瞻期間內尋找今天應提醒的配送

use chrono::NaiveDate;
use order_core::{day_of_week, ScheduleEntry, Supplier, PREFERENCE_LOOKAHEAD_DAYS, WINDOW_LOOKAHEAD_DAYS};

use crate::calendar::CalendarResolver;
use crate::deadline::{days_after, DeadlineCalculator};
use crate::policy::{AlertPolicy, OffsetSource};

/// 一次具體的配送
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// 配送日期
    pub delivery_date: NaiveDate,

    /// 最晚下單日
    pub order_by_date: NaiveDate,

    /// 產生此配送的排程項目
    pub entry: ScheduleEntry,
}

impl Occurrence {
    fn new(delivery_date: NaiveDate, entry: &ScheduleEntry) -> Self {
        Self {
            delivery_date,
            order_by_date: DeadlineCalculator::order_by_date(entry, delivery_date),
            entry: entry.clone(),
        }
    }

    pub fn lead_days(&self) -> u32 {
        self.entry.lead_days
    }

    pub fn cutoff_time(&self) -> &str {
        &self.entry.cutoff_time
    }
}

/// 提醒掃描器
pub struct AlertScanner;

impl AlertScanner {
    /// 依策略掃描今天應提醒的配送
    ///
    /// 相同輸入永遠得到相同結果；找到第一個符合者即停止。
    pub fn scan(today: NaiveDate, supplier: &Supplier, policy: &AlertPolicy) -> Option<Occurrence> {
        match *policy {
            AlertPolicy::Suppressed => None,
            AlertPolicy::PreferenceBased { preferred_day } => {
                Self::scan_preference(today, supplier, preferred_day)
            }
            AlertPolicy::WindowBased { offset } => Self::scan_window(today, supplier, offset),
        }
    }

    /// 固定下單日：只在該星期觸發，找第一個今天下單仍來得及的配送
    fn scan_preference(today: NaiveDate, supplier: &Supplier, preferred_day: u8) -> Option<Occurrence> {
        if day_of_week(today) != preferred_day {
            return None;
        }

        (0..PREFERENCE_LOOKAHEAD_DAYS).find_map(|i| {
            let delivery_date = days_after(today, i);
            let entry = CalendarResolver::entry_on(supplier, delivery_date)?;
            let occurrence = Occurrence::new(delivery_date, entry);
            (occurrence.order_by_date >= today).then_some(occurrence)
        })
    }

    /// 提醒區間：找第一個「提醒起始日 <= 今天 <= 最晚下單日」的配送
    fn scan_window(today: NaiveDate, supplier: &Supplier, offset: OffsetSource) -> Option<Occurrence> {
        for i in 0..WINDOW_LOOKAHEAD_DAYS {
            let delivery_date = days_after(today, i);
            let Some(entry) = CalendarResolver::entry_on(supplier, delivery_date) else {
                continue;
            };

            let occurrence = Occurrence::new(delivery_date, entry);
            let alert_start = DeadlineCalculator::alert_start_date(delivery_date, offset.offset_for(entry));

            if DeadlineCalculator::is_within_alert_window(today, alert_start, occurrence.order_by_date) {
                return Some(occurrence);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use order_core::{DeliverySchedule, TemporaryOverride};
    use proptest::prelude::*;

    fn d(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    fn produce_co() -> Supplier {
        // 週二配送，提前 1 天，未設定提醒提前天數
        Supplier::new("SUP-001", "Produce Co").with_schedule(
            DeliverySchedule::new().with_entry(ScheduleEntry::new(2, 1, "10:00")),
        )
    }

    const LEAD_DAYS: AlertPolicy = AlertPolicy::WindowBased {
        offset: OffsetSource::LeadDays,
    };

    #[test]
    fn test_window_monday_alerts_tuesday_delivery() {
        // 2025-10-06 週一
        let occurrence = AlertScanner::scan(d(10, 6), &produce_co(), &LEAD_DAYS).unwrap();

        assert_eq!(occurrence.delivery_date, d(10, 7));
        assert_eq!(occurrence.order_by_date, d(10, 6));
        assert_eq!(occurrence.lead_days(), 1);
        assert_eq!(occurrence.cutoff_time(), "10:00");
    }

    #[test]
    fn test_window_outside_alert_days() {
        // 週三、週日都不在提醒區間
        assert!(AlertScanner::scan(d(10, 8), &produce_co(), &LEAD_DAYS).is_none());
        assert!(AlertScanner::scan(d(10, 5), &produce_co(), &LEAD_DAYS).is_none());
        // 週二當天已過最晚下單日
        assert!(AlertScanner::scan(d(10, 7), &produce_co(), &LEAD_DAYS).is_none());
    }

    #[test]
    fn test_window_explicit_offset_boundaries() {
        // 週五配送，提前期 2 天，提醒提前 3 天；D = 2025-10-10
        let supplier = Supplier::new("SUP-002", "Dairy").with_schedule(
            DeliverySchedule::new().with_entry(ScheduleEntry::new(5, 2, "12:00")),
        );
        let policy = AlertPolicy::WindowBased {
            offset: OffsetSource::SupplierDefault(3),
        };

        assert!(AlertScanner::scan(d(10, 6), &supplier, &policy).is_none()); // D-4
        assert_eq!(
            AlertScanner::scan(d(10, 7), &supplier, &policy).unwrap().delivery_date,
            d(10, 10)
        ); // D-3
        assert_eq!(
            AlertScanner::scan(d(10, 8), &supplier, &policy).unwrap().delivery_date,
            d(10, 10)
        ); // D-2
        assert!(AlertScanner::scan(d(10, 9), &supplier, &policy).is_none()); // D-1
    }

    #[test]
    fn test_window_earliest_occurrence_wins() {
        // 週二與週四都配送，提醒提前 7 天：兩者都在區間內，取較早的週二
        let supplier = Supplier::new("SUP-003", "Meat").with_schedule(
            DeliverySchedule::new()
                .with_entry(ScheduleEntry::new(4, 1, "10:00"))
                .with_entry(ScheduleEntry::new(2, 1, "10:00")),
        );
        let policy = AlertPolicy::WindowBased {
            offset: OffsetSource::StoreException(7),
        };

        let occurrence = AlertScanner::scan(d(10, 6), &supplier, &policy).unwrap();
        assert_eq!(occurrence.delivery_date, d(10, 7));
    }

    #[test]
    fn test_window_lookahead_is_fourteen_days() {
        // 只有 2025-10-20（週一）一次配送，提醒提前 20 天
        let single = Supplier::new("SUP-004", "Single Drop").with_override(TemporaryOverride::new(
            d(10, 20),
            d(10, 20),
            DeliverySchedule::new().with_entry(ScheduleEntry::new(1, 0, "10:00")),
        ));
        let policy = AlertPolicy::WindowBased {
            offset: OffsetSource::SupplierDefault(20),
        };

        // 10/06 + 14 = 10/20：超出前瞻範圍
        assert!(AlertScanner::scan(d(10, 6), &single, &policy).is_none());

        // 10/07 + 13 = 10/20：在前瞻範圍內
        let occurrence = AlertScanner::scan(d(10, 7), &single, &policy).unwrap();
        assert_eq!(occurrence.delivery_date, d(10, 20));
    }

    #[test]
    fn test_preference_only_on_preferred_day() {
        let policy = AlertPolicy::PreferenceBased { preferred_day: 1 };

        // 週一：下一個週二
        let occurrence = AlertScanner::scan(d(10, 6), &produce_co(), &policy).unwrap();
        assert_eq!(occurrence.delivery_date, d(10, 7));

        // 週三不是固定下單日
        assert!(AlertScanner::scan(d(10, 8), &produce_co(), &policy).is_none());
    }

    #[test]
    fn test_preference_skips_deliveries_that_are_too_close() {
        // 週二配送提前 3 天；週一下單趕不上隔天，改為下週二
        let supplier = Supplier::new("SUP-006", "Slow Co").with_schedule(
            DeliverySchedule::new().with_entry(ScheduleEntry::new(2, 3, "10:00")),
        );
        let policy = AlertPolicy::PreferenceBased { preferred_day: 1 };

        let occurrence = AlertScanner::scan(d(10, 6), &supplier, &policy).unwrap();
        assert_eq!(occurrence.delivery_date, d(10, 14));
        assert_eq!(occurrence.order_by_date, d(10, 11));
    }

    #[test]
    fn test_preference_without_viable_delivery() {
        // 提前期 30 天：21 天內沒有來得及的配送
        let supplier = Supplier::new("SUP-007", "Import Co").with_schedule(
            DeliverySchedule::new().with_entry(ScheduleEntry::new(2, 30, "10:00")),
        );
        let policy = AlertPolicy::PreferenceBased { preferred_day: 1 };

        assert!(AlertScanner::scan(d(10, 6), &supplier, &policy).is_none());
    }

    #[test]
    fn test_preference_lookahead_is_twenty_one_days() {
        let single_drop = |date: NaiveDate| {
            Supplier::new("SUP-008", "Single Drop").with_override(TemporaryOverride::new(
                date,
                date,
                DeliverySchedule::new().with_entry(ScheduleEntry::new(day_of_week(date), 0, "10:00")),
            ))
        };
        let policy = AlertPolicy::PreferenceBased { preferred_day: 1 };

        // 10/06 + 20 = 10/26：在前瞻範圍內
        let occurrence = AlertScanner::scan(d(10, 6), &single_drop(d(10, 26)), &policy).unwrap();
        assert_eq!(occurrence.delivery_date, d(10, 26));

        // 10/06 + 21 = 10/27：超出前瞻範圍
        assert!(AlertScanner::scan(d(10, 6), &single_drop(d(10, 27)), &policy).is_none());
    }

    #[test]
    fn test_suppressed_never_alerts() {
        assert!(AlertScanner::scan(d(10, 6), &produce_co(), &AlertPolicy::Suppressed).is_none());
    }

    proptest! {
        #[test]
        fn prop_scan_is_deterministic_and_inside_window(
            day_offset in 0i64..3650,
            weekday in 0u8..7,
            lead_days in 0u32..6,
            explicit_offset in proptest::option::of(0u32..10),
        ) {
            let today = d(1, 1) + Duration::days(day_offset);
            let supplier = Supplier::new("SUP-P", "Prop Co").with_schedule(
                DeliverySchedule::new().with_entry(ScheduleEntry::new(weekday, lead_days, "10:00")),
            );
            let offset = match explicit_offset {
                Some(days) => OffsetSource::SupplierDefault(days),
                None => OffsetSource::LeadDays,
            };
            let policy = AlertPolicy::WindowBased { offset };

            let first = AlertScanner::scan(today, &supplier, &policy);
            let second = AlertScanner::scan(today, &supplier, &policy);
            prop_assert_eq!(&first, &second);

            if let Some(occurrence) = first {
                let alert_start = DeadlineCalculator::alert_start_date(
                    occurrence.delivery_date,
                    offset.offset_for(&occurrence.entry),
                );
                prop_assert!(alert_start <= today);
                prop_assert!(today <= occurrence.order_by_date);
                prop_assert!(occurrence.delivery_date < today + Duration::days(14));
            }
        }
    }
}
