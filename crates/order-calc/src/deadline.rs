//! 下單截止與提醒起始計算

use chrono::{DateTime, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use order_core::{OrderError, Result, ScheduleEntry};

/// 往前推算日曆天
pub(crate) fn days_before(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

/// 往後推算日曆天
pub(crate) fn days_after(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

/// 截止時間計算器
pub struct DeadlineCalculator;

impl DeadlineCalculator {
    /// 最晚下單日 = 配送日期 - 提前期
    pub fn order_by_date(entry: &ScheduleEntry, delivery_date: NaiveDate) -> NaiveDate {
        days_before(delivery_date, entry.lead_days)
    }

    /// 提醒起始日 = 配送日期 - 提醒提前天數
    pub fn alert_start_date(delivery_date: NaiveDate, offset_days: u32) -> NaiveDate {
        days_before(delivery_date, offset_days)
    }

    /// 硬性截止時間：最晚下單日的截止時間（門市時區），轉為 UTC
    pub fn hard_deadline(
        entry: &ScheduleEntry,
        delivery_date: NaiveDate,
        tz: Tz,
    ) -> Result<DateTime<Utc>> {
        let cutoff = entry.cutoff()?;
        let order_by = Self::order_by_date(entry, delivery_date);
        to_utc(order_by.and_time(cutoff), tz)
    }

    /// 提醒起始時間：提醒起始日的 00:00（門市時區），轉為 UTC
    pub fn alert_start(delivery_date: NaiveDate, offset_days: u32, tz: Tz) -> Result<DateTime<Utc>> {
        let start = Self::alert_start_date(delivery_date, offset_days);
        to_utc(start.and_time(NaiveTime::MIN), tz)
    }

    /// 日層級的區間判斷：提醒起始日 <= 今天 <= 最晚下單日（不考慮截止時間）
    pub fn is_within_alert_window(
        today: NaiveDate,
        alert_start_date: NaiveDate,
        order_by_date: NaiveDate,
    ) -> bool {
        alert_start_date <= today && today <= order_by_date
    }
}

/// 門市當地時間轉 UTC
///
/// 夏令時重疊時取較早者；落在夏令時跳躍空隙時順延一小時。
fn to_utc(naive: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>> {
    if let Some(local) = naive.and_local_timezone(tz).earliest() {
        return Ok(local.with_timezone(&Utc));
    }

    (naive + Duration::hours(1))
        .and_local_timezone(tz)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| OrderError::InvalidDate(format!("無法解析當地時間 {} ({})", naive, tz.name())))
}
