//! 商品目錄比對

use order_core::{CatalogItem, Supplier};

/// 目錄比對策略
pub trait CatalogMatcher: Send + Sync {
    /// 查詢文字是否符合目錄品名
    fn matches(&self, query: &str, catalog_name: &str) -> bool;
}

/// 正規化：去除前後空白並轉小寫
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// 雙向子字串比對（不分大小寫）
///
/// 查詢包含品名，或品名包含查詢，即視為符合。短字串容易誤判，
/// 需要更嚴格的比對時可替換為其他 `CatalogMatcher`。
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl CatalogMatcher for SubstringMatcher {
    fn matches(&self, query: &str, catalog_name: &str) -> bool {
        let query = normalize(query);
        let name = normalize(catalog_name);

        if query.is_empty() || name.is_empty() {
            return false;
        }

        query.contains(&name) || name.contains(&query)
    }
}

/// 依供應商清單順序、再依目錄順序，回傳第一個符合的（供應商, 品項）
pub fn find_match<'a>(
    matcher: &dyn CatalogMatcher,
    query: &str,
    suppliers: &'a [Supplier],
) -> Option<(&'a Supplier, &'a CatalogItem)> {
    suppliers.iter().find_map(|supplier| {
        supplier
            .catalog_items
            .iter()
            .find(|item| matcher.matches(query, &item.name))
            .map(|item| (supplier, item))
    })
}
