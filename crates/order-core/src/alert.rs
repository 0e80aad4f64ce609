//! 訂貨提醒（查詢時即時計算，不持久化）

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 訂貨提醒
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub supplier_id: String,
    pub supplier_name: String,

    /// 提醒所針對的配送日期
    pub delivery_date: NaiveDate,

    /// 最晚下單日（配送日期 - 提前期）
    pub order_by_date: NaiveDate,

    /// 下單截止時間（HH:MM）
    pub cutoff_time: String,

    /// 提前期（天）
    pub lead_days: u32,

    /// 是否由門市固定下單日觸發
    pub is_preference_based: bool,

    /// 固定下單星期
    pub preferred_day: Option<u8>,
}
