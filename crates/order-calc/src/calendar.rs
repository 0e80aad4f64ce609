//! 配送日曆解析

use chrono::NaiveDate;
use order_core::{DeliverySchedule, ScheduleEntry, Supplier};

/// 配送日曆解析器
pub struct CalendarResolver;

impl CalendarResolver {
    /// 取得指定日期生效的每週排程
    ///
    /// 日期落在任一臨時覆寫區間內時使用該覆寫；多個區間重疊時以清單中第一個為準。
    pub fn resolve(supplier: &Supplier, date: NaiveDate) -> &DeliverySchedule {
        supplier
            .temporary_overrides
            .iter()
            .find(|o| o.covers(date))
            .map(|o| &o.schedule)
            .unwrap_or(&supplier.default_schedule)
    }

    /// 取得指定日期的排程項目（`None` 表示當天沒有配送）
    pub fn entry_on(supplier: &Supplier, date: NaiveDate) -> Option<&ScheduleEntry> {
        Self::resolve(supplier, date).entry_on(date)
    }

    /// 檢查供應商是否有任何可用排程
    pub fn has_any_schedule(supplier: &Supplier) -> bool {
        !supplier.default_schedule.is_empty()
            || supplier
                .temporary_overrides
                .iter()
                .any(|o| !o.schedule.is_empty())
    }
}
