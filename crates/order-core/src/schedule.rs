//! 每週配送排程模型

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::{OrderError, Result};

/// 取得日期的星期索引（0 = 週日, 1 = 週一, ..., 6 = 週六）
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// 排程項目：某個星期幾有配送，以及下單的提前天數與截止時間
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// 配送星期（0 = 週日 ... 6 = 週六）
    pub day_of_week: u8,

    /// 提前期（天）
    pub lead_days: u32,

    /// 下單截止時間（HH:MM，門市時區）
    pub cutoff_time: String,
}

impl ScheduleEntry {
    /// 創建新的排程項目
    pub fn new(day_of_week: u8, lead_days: u32, cutoff_time: impl Into<String>) -> Self {
        Self {
            day_of_week,
            lead_days,
            cutoff_time: cutoff_time.into(),
        }
    }

    /// 解析截止時間
    pub fn cutoff(&self) -> Result<NaiveTime> {
        NaiveTime::parse_from_str(&self.cutoff_time, "%H:%M").map_err(|e| {
            OrderError::InvalidSchedule(format!(
                "截止時間格式錯誤 '{}': {}",
                self.cutoff_time, e
            ))
        })
    }
}

/// 每週配送排程（每個星期最多一筆）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeliverySchedule {
    entries: Vec<ScheduleEntry>,
}

impl DeliverySchedule {
    /// 創建空排程
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：添加排程項目
    pub fn with_entry(mut self, entry: ScheduleEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// 所有排程項目
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 查詢指定星期的排程項目
    pub fn entry_for(&self, day_of_week: u8) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.day_of_week == day_of_week)
    }

    /// 查詢指定日期的排程項目
    pub fn entry_on(&self, date: NaiveDate) -> Option<&ScheduleEntry> {
        self.entry_for(day_of_week(date))
    }

    /// 驗證排程：星期範圍、重複星期、截止時間格式
    pub fn validate(&self) -> Result<()> {
        let mut seen = [false; 7];

        for entry in &self.entries {
            let index = entry.day_of_week as usize;
            if index > 6 {
                return Err(OrderError::InvalidSchedule(format!(
                    "星期索引超出範圍: {}",
                    entry.day_of_week
                )));
            }
            if seen[index] {
                return Err(OrderError::InvalidSchedule(format!(
                    "星期 {} 重複設定",
                    entry.day_of_week
                )));
            }
            seen[index] = true;

            entry.cutoff()?;
        }

        Ok(())
    }
}

impl FromIterator<ScheduleEntry> for DeliverySchedule {
    fn from_iter<I: IntoIterator<Item = ScheduleEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// 臨時排程覆寫（例如假期期間）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporaryOverride {
    /// 起始日期（含）
    pub start_date: NaiveDate,

    /// 結束日期（含）
    pub end_date: NaiveDate,

    /// 覆寫期間使用的排程
    pub schedule: DeliverySchedule,
}

impl TemporaryOverride {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, schedule: DeliverySchedule) -> Self {
        Self {
            start_date,
            end_date,
            schedule,
        }
    }

    /// 檢查日期是否落在覆寫區間內
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// 檢查兩個覆寫區間是否重疊
    pub fn overlaps(&self, other: &TemporaryOverride) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }
}
