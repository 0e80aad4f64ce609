//! 訂貨計劃產生：購物清單 → 依供應商合併、依截止時間排序的計劃

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use order_core::{
    Plan, PlanItem, PlanResult, Result, StoreSettingsSource, Supplier, SupplierDirectory,
    UnmatchedItem, UnmatchedReason, PLAN_LOOKAHEAD_DAYS,
};
use rust_decimal::Decimal;

use crate::calendar::CalendarResolver;
use crate::deadline::{days_after, DeadlineCalculator};
use crate::matcher::{find_match, CatalogMatcher, SubstringMatcher};

/// 可下單的配送
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateDelivery {
    pub delivery_date: NaiveDate,
    pub order_deadline: DateTime<Utc>,
}

/// 已比對到供應商並找到配送的品項
#[derive(Debug, Clone)]
pub struct MatchedItem {
    pub supplier_id: String,
    pub supplier_name: String,
    pub minimum_order_value: Option<Decimal>,
    pub is_tax_exclusive: Option<bool>,
    pub item: PlanItem,
    pub delivery: CandidateDelivery,
}

impl MatchedItem {
    fn new(supplier: &Supplier, item: PlanItem, delivery: CandidateDelivery) -> Self {
        Self {
            supplier_id: supplier.id.clone(),
            supplier_name: supplier.name.clone(),
            minimum_order_value: supplier.minimum_order_value,
            is_tax_exclusive: supplier.minimum_order_is_tax_exclusive,
            item,
            delivery,
        }
    }
}

/// 訂貨計劃產生器
pub struct OrderPlanner {
    directory: Arc<dyn SupplierDirectory>,
    settings: Arc<dyn StoreSettingsSource>,
    matcher: Box<dyn CatalogMatcher>,
}

impl OrderPlanner {
    /// 創建新的計劃產生器（預設使用雙向子字串比對）
    pub fn new(directory: Arc<dyn SupplierDirectory>, settings: Arc<dyn StoreSettingsSource>) -> Self {
        Self {
            directory,
            settings,
            matcher: Box::new(SubstringMatcher),
        }
    }

    /// 建構器模式：替換比對策略
    pub fn with_matcher(mut self, matcher: impl CatalogMatcher + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    /// 依購物清單產生訂貨計劃
    ///
    /// 需要門市時區計算截止時間，未設定時回傳 `ConfigurationError`。
    pub fn generate_plan<S: AsRef<str>>(
        &self,
        item_texts: &[S],
        store_id: &str,
        now: DateTime<Utc>,
    ) -> Result<PlanResult> {
        let settings = self.settings.store_settings(store_id)?;
        let tz = settings.tz()?;
        let today = now.with_timezone(&tz).date_naive();

        let suppliers: Vec<Supplier> = self
            .directory
            .list_active_suppliers(store_id)?
            .into_iter()
            .filter(|s| s.is_available_to(store_id))
            .collect();

        tracing::info!(
            "開始產生訂貨計劃：門市 {}，品項 {} 筆，供應商 {} 家",
            store_id,
            item_texts.len(),
            suppliers.len()
        );

        // 同一供應商在同一時刻的最近配送相同，快取結果
        let mut deliveries: HashMap<String, Result<Option<CandidateDelivery>>> = HashMap::new();
        let mut matched = Vec::new();
        let mut unmatched = Vec::new();

        for raw in item_texts {
            let raw = raw.as_ref();
            let query = raw.trim();
            if query.is_empty() {
                continue;
            }

            let Some((supplier, catalog_item)) = find_match(self.matcher.as_ref(), query, &suppliers)
            else {
                tracing::debug!("品項 '{}' 沒有符合的供應商", query);
                unmatched.push(UnmatchedItem {
                    text: raw.to_string(),
                    reason: UnmatchedReason::NoCatalogMatch,
                });
                continue;
            };

            let delivery = deliveries
                .entry(supplier.id.clone())
                .or_insert_with(|| Self::nearest_delivery(supplier, today, now, tz));

            match delivery {
                Ok(Some(delivery)) => {
                    tracing::debug!(
                        "品項 '{}' → {} / {}，配送 {}",
                        query,
                        supplier.name,
                        catalog_item.name,
                        delivery.delivery_date
                    );
                    let item = PlanItem {
                        searched_text: query.to_string(),
                        matched_catalog_name: catalog_item.name.clone(),
                    };
                    matched.push(MatchedItem::new(supplier, item, *delivery));
                }
                Ok(None) => {
                    tracing::debug!(
                        "品項 '{}' 符合 {}，但 {} 天內沒有可下單的配送",
                        query,
                        supplier.name,
                        PLAN_LOOKAHEAD_DAYS
                    );
                    unmatched.push(UnmatchedItem {
                        text: raw.to_string(),
                        reason: UnmatchedReason::NoViableDelivery {
                            supplier_id: supplier.id.clone(),
                            supplier_name: supplier.name.clone(),
                        },
                    });
                }
                Err(e) => {
                    tracing::warn!("供應商 {} 排程無法計算: {}", supplier.id, e);
                    unmatched.push(UnmatchedItem {
                        text: raw.to_string(),
                        reason: UnmatchedReason::SupplierMisconfigured {
                            supplier_id: supplier.id.clone(),
                            message: e.to_string(),
                        },
                    });
                }
            }
        }

        let plans = Self::consolidate(matched);

        tracing::info!(
            "訂貨計劃完成：計劃 {} 份，未比對 {} 筆",
            plans.len(),
            unmatched.len()
        );

        Ok(PlanResult { plans, unmatched })
    }

    /// 最近一次仍可下單的配送（截止時間晚於現在）
    pub fn nearest_delivery(
        supplier: &Supplier,
        today: NaiveDate,
        now: DateTime<Utc>,
        tz: Tz,
    ) -> Result<Option<CandidateDelivery>> {
        for i in 0..PLAN_LOOKAHEAD_DAYS {
            let delivery_date = days_after(today, i);
            let Some(entry) = CalendarResolver::entry_on(supplier, delivery_date) else {
                continue;
            };

            let order_deadline = DeadlineCalculator::hard_deadline(entry, delivery_date, tz)?;
            if order_deadline > now {
                return Ok(Some(CandidateDelivery {
                    delivery_date,
                    order_deadline,
                }));
            }
        }

        Ok(None)
    }

    /// 依供應商合併品項
    ///
    /// 計劃的截止時間與配送日期取所有品項中截止時間最早者；
    /// 計劃依截止時間排序，相同時保留供應商首次出現的順序。
    pub fn consolidate(matched: Vec<MatchedItem>) -> Vec<Plan> {
        let mut plans: Vec<Plan> = Vec::new();

        for m in matched {
            match plans.iter_mut().find(|p| p.supplier_id == m.supplier_id) {
                Some(plan) => {
                    if m.delivery.order_deadline < plan.order_deadline {
                        plan.order_deadline = m.delivery.order_deadline;
                        plan.delivery_date = m.delivery.delivery_date;
                    }
                    plan.items.push(m.item);
                }
                None => plans.push(Plan {
                    supplier_id: m.supplier_id,
                    supplier_name: m.supplier_name,
                    items: vec![m.item],
                    order_deadline: m.delivery.order_deadline,
                    delivery_date: m.delivery.delivery_date,
                    minimum_order_value: m.minimum_order_value,
                    is_tax_exclusive: m.is_tax_exclusive,
                }),
            }
        }

        plans.sort_by_key(|p| p.order_deadline);
        plans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use order_core::{DeliverySchedule, OrderError, ScheduleEntry, StoreScope, StoreSettings};
    use order_store::{InMemoryStoreSettings, InMemorySupplierDirectory};

    fn d(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    fn produce_co() -> Supplier {
        Supplier::new("SUP-001", "Produce Co")
            .with_schedule(DeliverySchedule::new().with_entry(ScheduleEntry::new(2, 1, "10:00")))
            .with_catalog(["Round Tomatoes 5kg", "Red Onions"])
            .with_minimum_order(Decimal::from(150), true)
    }

    fn dairy() -> Supplier {
        // 每天配送，提前 0 天，截止 06:00
        let schedule = (0..7).map(|day| ScheduleEntry::new(day, 0, "06:00")).collect();
        Supplier::new("SUP-002", "Dairy Farm")
            .with_schedule(schedule)
            .with_catalog(["Whole Milk", "Butter"])
    }

    fn planner(suppliers: Vec<Supplier>) -> OrderPlanner {
        let settings = StoreSettings::new("STORE-A").with_timezone("UTC");
        OrderPlanner::new(
            Arc::new(InMemorySupplierDirectory::new(suppliers)),
            Arc::new(InMemoryStoreSettings::new(vec![settings])),
        )
    }

    #[test]
    fn test_match_and_unmatched() {
        let planner = planner(vec![produce_co()]);
        // 週一 08:00 UTC
        let now = Utc.with_ymd_and_hms(2025, 10, 6, 8, 0, 0).unwrap();

        let result = planner.generate_plan(&["tomatoes", "xyz123"], "STORE-A", now).unwrap();

        assert_eq!(result.plans.len(), 1);
        let plan = &result.plans[0];
        assert_eq!(plan.items[0].searched_text, "tomatoes");
        assert_eq!(plan.items[0].matched_catalog_name, "Round Tomatoes 5kg");
        assert_eq!(plan.delivery_date, d(10, 7));
        assert_eq!(plan.order_deadline, Utc.with_ymd_and_hms(2025, 10, 6, 10, 0, 0).unwrap());
        assert_eq!(plan.minimum_order_value, Some(Decimal::from(150)));
        assert_eq!(plan.is_tax_exclusive, Some(true));

        assert_eq!(result.unmatched_texts(), vec!["xyz123"]);
        assert_eq!(result.unmatched[0].reason, UnmatchedReason::NoCatalogMatch);
    }

    #[test]
    fn test_deadline_passed_rolls_to_next_week() {
        let planner = planner(vec![produce_co()]);
        // 週一 11:00 UTC：本週截止已過
        let now = Utc.with_ymd_and_hms(2025, 10, 6, 11, 0, 0).unwrap();

        let result = planner.generate_plan(&["Red Onions"], "STORE-A", now).unwrap();

        assert_eq!(result.plans[0].delivery_date, d(10, 14));
    }

    #[test]
    fn test_items_for_same_supplier_are_merged() {
        let planner = planner(vec![produce_co(), dairy()]);
        let now = Utc.with_ymd_and_hms(2025, 10, 6, 8, 0, 0).unwrap();

        let result = planner
            .generate_plan(&["tomatoes", "milk", " red onions "], "STORE-A", now)
            .unwrap();

        assert_eq!(result.plans.len(), 2);
        // 蔬果今天 10:00 截止，乳品明天 06:00 截止
        assert_eq!(result.plans[0].supplier_id, "SUP-001");
        assert_eq!(result.plans[0].item_count(), 2);
        assert_eq!(result.plans[0].items[1].searched_text, "red onions");
        assert_eq!(result.plans[1].supplier_id, "SUP-002");
        assert_eq!(result.plans[1].delivery_date, d(10, 7));
    }

    #[test]
    fn test_consolidation_takes_tightest_deadline() {
        let supplier = produce_co();
        let early = CandidateDelivery {
            delivery_date: d(10, 7),
            order_deadline: Utc.with_ymd_and_hms(2025, 10, 6, 10, 0, 0).unwrap(),
        };
        let late = CandidateDelivery {
            delivery_date: d(10, 14),
            order_deadline: Utc.with_ymd_and_hms(2025, 10, 13, 10, 0, 0).unwrap(),
        };
        let item = |text: &str| PlanItem {
            searched_text: text.to_string(),
            matched_catalog_name: text.to_string(),
        };

        let plans = OrderPlanner::consolidate(vec![
            MatchedItem::new(&supplier, item("onions"), late),
            MatchedItem::new(&supplier, item("tomatoes"), early),
        ]);

        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].order_deadline, early.order_deadline);
        assert_eq!(plans[0].delivery_date, d(10, 7));
        assert_eq!(plans[0].items.len(), 2);
    }

    #[test]
    fn test_no_viable_delivery_is_reported() {
        // 只在覆寫期間（已過去）配送
        let supplier = Supplier::new("SUP-003", "Seasonal")
            .with_catalog(["Pumpkin"])
            .with_override(order_core::TemporaryOverride::new(
                d(9, 1),
                d(9, 30),
                DeliverySchedule::new().with_entry(ScheduleEntry::new(1, 0, "10:00")),
            ));
        let planner = planner(vec![supplier]);
        let now = Utc.with_ymd_and_hms(2025, 10, 6, 8, 0, 0).unwrap();

        let result = planner.generate_plan(&["pumpkin"], "STORE-A", now).unwrap();

        assert!(result.plans.is_empty());
        assert_eq!(
            result.unmatched[0].reason,
            UnmatchedReason::NoViableDelivery {
                supplier_id: "SUP-003".to_string(),
                supplier_name: "Seasonal".to_string(),
            }
        );
    }

    #[test]
    fn test_plan_lookahead_is_fourteen_days() {
        let single_drop = |date: NaiveDate| {
            Supplier::new("SUP-006", "Single Drop")
                .with_catalog(["Truffles"])
                .with_override(order_core::TemporaryOverride::new(
                    date,
                    date,
                    DeliverySchedule::new()
                        .with_entry(ScheduleEntry::new(order_core::day_of_week(date), 0, "10:00")),
                ))
        };
        let now = Utc.with_ymd_and_hms(2025, 10, 6, 8, 0, 0).unwrap();

        // 10/06 + 13 = 10/19：在前瞻範圍內
        let found =
            OrderPlanner::nearest_delivery(&single_drop(d(10, 19)), d(10, 6), now, Tz::UTC)
                .unwrap();
        assert_eq!(found.map(|c| c.delivery_date), Some(d(10, 19)));

        // 10/06 + 14 = 10/20：超出前瞻範圍
        let missing =
            OrderPlanner::nearest_delivery(&single_drop(d(10, 20)), d(10, 6), now, Tz::UTC)
                .unwrap();
        assert!(missing.is_none());

        let result = planner(vec![single_drop(d(10, 20))])
            .generate_plan(&["truffles"], "STORE-A", now)
            .unwrap();
        assert!(result.plans.is_empty());
        assert!(matches!(
            result.unmatched[0].reason,
            UnmatchedReason::NoViableDelivery { .. }
        ));
    }

    #[test]
    fn test_first_matching_supplier_wins_even_without_delivery() {
        // 清單順序在前的供應商優先，即使它沒有可用配送也不改找下一家
        let empty = Supplier::new("SUP-004", "No Schedule").with_catalog(["Tomatoes"]);
        let planner = planner(vec![empty, produce_co()]);
        let now = Utc.with_ymd_and_hms(2025, 10, 6, 8, 0, 0).unwrap();

        let result = planner.generate_plan(&["tomatoes"], "STORE-A", now).unwrap();

        assert!(result.plans.is_empty());
        assert!(matches!(
            result.unmatched[0].reason,
            UnmatchedReason::NoViableDelivery { .. }
        ));
    }

    #[test]
    fn test_store_scoped_supplier_excluded_elsewhere() {
        let exclusive = produce_co().with_store_scope(StoreScope::Store("STORE-B".to_string()));
        let planner = planner(vec![exclusive]);
        let now = Utc.with_ymd_and_hms(2025, 10, 6, 8, 0, 0).unwrap();

        let result = planner.generate_plan(&["tomatoes"], "STORE-A", now).unwrap();
        assert_eq!(result.unmatched_texts(), vec!["tomatoes"]);
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let planner = planner(vec![produce_co()]);
        let now = Utc.with_ymd_and_hms(2025, 10, 6, 8, 0, 0).unwrap();

        let result = planner.generate_plan(&["", "   "], "STORE-A", now).unwrap();
        assert_eq!(result, PlanResult::default());
    }

    #[test]
    fn test_misconfigured_supplier_is_reported() {
        let broken = Supplier::new("SUP-005", "Broken")
            .with_schedule(DeliverySchedule::new().with_entry(ScheduleEntry::new(2, 1, "noon")))
            .with_catalog(["Flour"]);
        let planner = planner(vec![broken]);
        let now = Utc.with_ymd_and_hms(2025, 10, 6, 8, 0, 0).unwrap();

        let result = planner.generate_plan(&["flour"], "STORE-A", now).unwrap();
        assert!(matches!(
            result.unmatched[0].reason,
            UnmatchedReason::SupplierMisconfigured { .. }
        ));
    }

    #[test]
    fn test_plan_requires_store_timezone() {
        let planner = OrderPlanner::new(
            Arc::new(InMemorySupplierDirectory::new(vec![produce_co()])),
            Arc::new(InMemoryStoreSettings::new(vec![StoreSettings::new("STORE-A")])),
        );
        let now = Utc.with_ymd_and_hms(2025, 10, 6, 8, 0, 0).unwrap();

        let result = planner.generate_plan(&["tomatoes"], "STORE-A", now);
        assert!(matches!(result, Err(OrderError::ConfigurationError(_))));
    }
}
