//! 訂貨計劃模型（由購物清單產生）

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 計劃中的單一品項
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanItem {
    /// 使用者輸入的文字（已去除前後空白）
    pub searched_text: String,

    /// 比對到的目錄品名
    pub matched_catalog_name: String,
}

/// 單一供應商的合併訂貨計劃
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub supplier_id: String,
    pub supplier_name: String,

    /// 合併後的品項
    pub items: Vec<PlanItem>,

    /// 下單截止時間（所有品項中最早者）
    pub order_deadline: DateTime<Utc>,

    /// 對應的配送日期
    pub delivery_date: NaiveDate,

    /// 最低訂購金額
    pub minimum_order_value: Option<Decimal>,

    /// 最低訂購金額是否為未稅
    pub is_tax_exclusive: Option<bool>,
}

impl Plan {
    /// 品項數量
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// 無法排入計劃的原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum UnmatchedReason {
    /// 沒有任何供應商目錄符合
    NoCatalogMatch,

    /// 有符合的供應商，但前瞻期間內沒有可下單的配送
    #[serde(rename_all = "camelCase")]
    NoViableDelivery {
        supplier_id: String,
        supplier_name: String,
    },

    /// 符合的供應商排程資料有誤，無法計算截止時間
    #[serde(rename_all = "camelCase")]
    SupplierMisconfigured { supplier_id: String, message: String },
}

/// 未能排入計劃的品項
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmatchedItem {
    /// 原始輸入文字
    pub text: String,
    pub reason: UnmatchedReason,
}

/// 訂貨計劃產生結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResult {
    /// 依截止時間排序的計劃
    pub plans: Vec<Plan>,

    pub unmatched: Vec<UnmatchedItem>,
}

impl PlanResult {
    /// 未比對到的原始文字
    pub fn unmatched_texts(&self) -> Vec<&str> {
        self.unmatched.iter().map(|u| u.text.as_str()).collect()
    }

    /// 查詢指定供應商的計劃
    pub fn plan_for(&self, supplier_id: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.supplier_id == supplier_id)
    }
}
