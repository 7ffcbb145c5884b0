//! Dashboard stock and sales summaries

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::{percentage, to_f64};
use crate::models::{InventoryItem, MovementKind, Transaction, TransactionType};
use crate::types::TimestampRange;

/// An item at or below its reorder level
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LowStockAlert {
    pub item_id: String,
    pub item_name: String,
    pub category: String,
    pub quantity: i64,
    pub reorder_level: i64,
    pub shortfall: i64,
    pub out_of_stock: bool,
}

/// Value of the stock on hand
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryValuation {
    pub item_count: usize,
    pub total_units: i64,
    pub cost_value: Decimal,
    pub retail_value: Decimal,
    pub potential_profit: Decimal,
}

/// Sales totals over a time range
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub sale_count: usize,
    pub units_sold: i64,
    pub revenue: Decimal,
    pub cost_of_goods_sold: Decimal,
    pub profit: Decimal,
    pub margin: f64,
    /// Movements in range that are not genuine sales, keyed by
    /// `transactionType` (restock records under `restock`)
    pub excluded_movements: BTreeMap<String, usize>,
}

/// Items whose quantity is at or below their reorder level, largest
/// shortfall first
pub fn low_stock_items(items: &[InventoryItem]) -> Vec<LowStockAlert> {
    let mut alerts: Vec<LowStockAlert> = items
        .iter()
        .filter(|item| item.is_low_stock())
        .map(|item| LowStockAlert {
            item_id: item.id.clone(),
            item_name: item.name.clone(),
            category: item.category.clone(),
            quantity: item.quantity,
            reorder_level: item.reorder_level,
            shortfall: item.reorder_level - item.quantity,
            out_of_stock: item.quantity == 0,
        })
        .collect();
    alerts.sort_by(|a, b| b.shortfall.cmp(&a.shortfall));
    alerts
}

pub fn inventory_valuation(items: &[InventoryItem]) -> InventoryValuation {
    let cost_value: Decimal = items.iter().map(InventoryItem::stock_cost_value).sum();
    let retail_value: Decimal = items.iter().map(InventoryItem::stock_retail_value).sum();
    InventoryValuation {
        item_count: items.len(),
        total_units: items.iter().map(|item| item.quantity).sum(),
        cost_value,
        retail_value,
        potential_profit: retail_value - cost_value,
    }
}

/// Totals of genuine sales within `range`
pub fn sales_summary(transactions: &[Transaction], range: &TimestampRange) -> SalesSummary {
    let mut summary = SalesSummary {
        sale_count: 0,
        units_sold: 0,
        revenue: Decimal::ZERO,
        cost_of_goods_sold: Decimal::ZERO,
        profit: Decimal::ZERO,
        margin: 0.0,
        excluded_movements: BTreeMap::new(),
    };

    for tx in transactions.iter().filter(|tx| range.contains(&tx.timestamp)) {
        if tx.is_genuine_sale() {
            summary.sale_count += 1;
            summary.units_sold += tx.quantity;
            summary.revenue += tx.total_revenue;
            summary.cost_of_goods_sold += tx.total_cost;
            summary.profit += tx.profit;
            continue;
        }
        let bucket = match (tx.kind, tx.transaction_type) {
            (MovementKind::Restock, _) => MovementKind::Restock.as_str(),
            (MovementKind::Sale, TransactionType::Sale) => continue,
            (MovementKind::Sale, other) => other.as_str(),
        };
        *summary.excluded_movements.entry(bucket.to_string()).or_insert(0) += 1;
    }

    summary.margin = percentage(to_f64(summary.profit), to_f64(summary.revenue));
    summary
}
