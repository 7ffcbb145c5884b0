//! Dead stock detection

use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime};

use super::genuine_sales;
use crate::models::{InventoryItem, Transaction};

pub const DEFAULT_DEAD_STOCK_DAYS: u32 = 90;

/// Items that never sold, or whose latest genuine sale is older than
/// `days_since_last_sale` days before `now`. Catalog order is preserved.
///
/// A window reaching past the earliest representable date leaves only the
/// never-sold items.
pub fn find_dead_stock<'a>(
    items: &'a [InventoryItem],
    transactions: &[Transaction],
    days_since_last_sale: u32,
    now: NaiveDateTime,
) -> Vec<&'a InventoryItem> {
    let last_sale = last_sale_by_item(transactions);
    let cutoff = now.checked_sub_signed(Duration::days(i64::from(days_since_last_sale)));

    items
        .iter()
        .filter(|item| match (last_sale.get(item.id.as_str()), cutoff) {
            (Some(last), Some(cutoff)) => *last < cutoff,
            (Some(_), None) => false,
            (None, _) => true,
        })
        .collect()
}

/// Latest genuine-sale timestamp per item
pub fn last_sale_by_item(transactions: &[Transaction]) -> HashMap<&str, NaiveDateTime> {
    let mut last_sale: HashMap<&str, NaiveDateTime> = HashMap::new();
    for tx in genuine_sales(transactions) {
        last_sale
            .entry(tx.item_id.as_str())
            .and_modify(|last| *last = (*last).max(tx.timestamp))
            .or_insert(tx.timestamp);
    }
    last_sale
}
