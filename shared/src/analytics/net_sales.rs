//! Gross sales net of returns, per item

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::genuine_sales;
use crate::models::{Restock, Transaction};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetSales {
    pub item_id: String,
    pub item_name: String,
    pub gross_sales: i64,
    pub returns: i64,
    pub net_sales: i64,
    pub gross_revenue: Decimal,
    pub return_value: Decimal,
}

/// Genuine sales quantity minus returned quantity for every item with
/// either, highest net sales first (ties by item id)
pub fn net_sales(transactions: &[Transaction], restocks: &[Restock]) -> Vec<NetSales> {
    let mut rows: HashMap<&str, NetSales> = HashMap::new();

    for tx in genuine_sales(transactions) {
        let row = rows
            .entry(tx.item_id.as_str())
            .or_insert_with(|| empty_row(&tx.item_id, &tx.item_name));
        row.gross_sales += tx.quantity;
        row.gross_revenue += tx.total_revenue;
    }
    for restock in restocks.iter().filter(|r| r.is_return()) {
        let row = rows
            .entry(restock.item_id.as_str())
            .or_insert_with(|| empty_row(&restock.item_id, &restock.item_name));
        row.returns += restock.quantity;
        row.return_value += restock.total_cost;
    }

    let mut result: Vec<NetSales> = rows
        .into_values()
        .map(|mut row| {
            row.net_sales = row.gross_sales - row.returns;
            row
        })
        .collect();
    result.sort_by(|a, b| b.net_sales.cmp(&a.net_sales).then_with(|| a.item_id.cmp(&b.item_id)));
    result
}

fn empty_row(item_id: &str, item_name: &str) -> NetSales {
    NetSales {
        item_id: item_id.to_string(),
        item_name: item_name.to_string(),
        gross_sales: 0,
        returns: 0,
        net_sales: 0,
        gross_revenue: Decimal::ZERO,
        return_value: Decimal::ZERO,
    }
}
