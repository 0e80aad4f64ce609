//! 提醒策略解析（門市固定下單日 / 提醒區間）

use order_core::{ScheduleEntry, StoreSettings, Supplier};

/// 提醒提前天數的來源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetSource {
    /// 門市例外設定
    StoreException(u32),
    /// 供應商預設
    SupplierDefault(u32),
    /// 門市層級預設
    StoreDefault(u32),
    /// 未設定，使用該次配送的提前期
    LeadDays,
}

impl OffsetSource {
    /// 明確設定的天數（`LeadDays` 為 `None`）
    pub fn explicit_days(&self) -> Option<u32> {
        match *self {
            OffsetSource::StoreException(days)
            | OffsetSource::SupplierDefault(days)
            | OffsetSource::StoreDefault(days) => Some(days),
            OffsetSource::LeadDays => None,
        }
    }

    /// 套用到指定排程項目的提醒提前天數
    pub fn offset_for(&self, entry: &ScheduleEntry) -> u32 {
        self.explicit_days().unwrap_or(entry.lead_days)
    }
}

/// 提醒策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertPolicy {
    /// 門市忽略此供應商
    Suppressed,
    /// 門市固定在某個星期下單
    PreferenceBased { preferred_day: u8 },
    /// 依提醒區間判斷
    WindowBased { offset: OffsetSource },
}

/// 解析所需的上下文
pub struct PolicyContext<'a> {
    pub settings: &'a StoreSettings,
    pub supplier: &'a Supplier,
}

type OffsetResolver = fn(&PolicyContext<'_>) -> Option<OffsetSource>;

/// 提前天數的優先順序：門市例外 > 供應商預設 > 門市預設 > 提前期
const OFFSET_CHAIN: [OffsetResolver; 3] = [
    store_exception_offset,
    supplier_default_offset,
    store_default_offset,
];

fn store_exception_offset(ctx: &PolicyContext<'_>) -> Option<OffsetSource> {
    ctx.settings
        .exception_for(&ctx.supplier.id)
        .and_then(|e| e.alert_offset_days)
        .map(OffsetSource::StoreException)
}

fn supplier_default_offset(ctx: &PolicyContext<'_>) -> Option<OffsetSource> {
    ctx.supplier
        .alert_settings
        .default_offset_days
        .map(OffsetSource::SupplierDefault)
}

fn store_default_offset(ctx: &PolicyContext<'_>) -> Option<OffsetSource> {
    ctx.settings.default_offset_days.map(OffsetSource::StoreDefault)
}

/// 門市偏好解析器
pub struct PreferenceResolver;

impl PreferenceResolver {
    /// 解析（門市, 供應商）的提醒策略
    pub fn resolve(settings: &StoreSettings, supplier: &Supplier) -> AlertPolicy {
        let ignored = settings
            .exception_for(&supplier.id)
            .is_some_and(|e| e.ignored);
        if ignored {
            return AlertPolicy::Suppressed;
        }

        if let Some(preferred_day) = supplier.preferred_order_day(&settings.store_id) {
            return AlertPolicy::PreferenceBased { preferred_day };
        }

        let ctx = PolicyContext { settings, supplier };
        AlertPolicy::WindowBased {
            offset: Self::resolve_offset(&ctx),
        }
    }

    /// 依序嘗試各來源，第一個有值者生效
    pub fn resolve_offset(ctx: &PolicyContext<'_>) -> OffsetSource {
        OFFSET_CHAIN
            .iter()
            .find_map(|resolver| resolver(ctx))
            .unwrap_or(OffsetSource::LeadDays)
    }
}
