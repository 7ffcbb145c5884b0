//! Profit margin by product category

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::Serialize;

use super::{genuine_sales, percentage, to_f64};
use crate::models::{InventoryItem, Transaction};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMargin {
    pub category: String,
    /// `profit / revenue × 100`, 0 for a category without revenue
    pub margin: f64,
    pub revenue: Decimal,
    pub profit: Decimal,
}

/// Revenue, profit and margin of genuine sales per item category, highest
/// margin first. Sales of items missing from the catalog are skipped.
pub fn margin_by_category(
    transactions: &[Transaction],
    items: &[InventoryItem],
) -> Vec<CategoryMargin> {
    let category_of: HashMap<&str, &str> = items
        .iter()
        .map(|item| (item.id.as_str(), item.category.as_str()))
        .collect();

    let mut totals: BTreeMap<&str, (Decimal, Decimal)> = BTreeMap::new();
    for tx in genuine_sales(transactions) {
        let Some(&category) = category_of.get(tx.item_id.as_str()) else {
            continue;
        };
        let (revenue, profit) = totals.entry(category).or_default();
        *revenue += tx.total_revenue;
        *profit += tx.profit;
    }

    let mut margins: Vec<CategoryMargin> = totals
        .into_iter()
        .map(|(category, (revenue, profit))| CategoryMargin {
            category: category.to_string(),
            margin: percentage(to_f64(profit), to_f64(revenue)),
            revenue,
            profit,
        })
        .collect();
    margins.sort_by(|a, b| b.margin.total_cmp(&a.margin));
    margins
}
