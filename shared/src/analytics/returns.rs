//! Return-rate analytics
//!
//! Returns are restocks whose reason is `damaged-return` or
//! `supplier-return`. Rates are expressed against genuine sales quantity.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::{genuine_sales, percentage};
use crate::models::{InventoryItem, Restock, ReturnReason, Transaction};

/// Portfolio-wide return report
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReturnAnalytics {
    /// Number of return records
    pub total_returns: usize,
    pub total_return_quantity: i64,
    pub total_return_value: Decimal,
    pub total_sales_quantity: i64,
    pub return_rate: f64,
    pub damaged_return_rate: f64,
    pub supplier_return_rate: f64,
    pub by_reason: Vec<ReasonBreakdown>,
    pub by_item: Vec<ItemReturnBreakdown>,
    /// Some item has returns but no recorded sales; rates for it are not
    /// meaningful and the dashboard should warn
    pub has_returns_without_sales: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReasonBreakdown {
    pub reason: ReturnReason,
    pub label: String,
    pub count: usize,
    pub quantity: i64,
    pub value: Decimal,
    /// Share of total return quantity
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemReturnBreakdown {
    pub item_id: String,
    pub item_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub return_quantity: i64,
    pub return_value: Decimal,
    pub sales_quantity: i64,
    pub return_rate: f64,
    pub has_returns_without_sales: bool,
}

#[derive(Default)]
struct Tally {
    count: usize,
    quantity: i64,
    value: Decimal,
}

impl Tally {
    fn add(&mut self, restock: &Restock) {
        self.count += 1;
        self.quantity += restock.quantity;
        self.value += restock.total_cost;
    }
}

/// Build the return report for a snapshot
pub fn return_analytics(
    restocks: &[Restock],
    transactions: &[Transaction],
    items: &[InventoryItem],
) -> ReturnAnalytics {
    let sales_by_item = sales_quantity_by_item(transactions);
    let total_sales_quantity: i64 = sales_by_item.values().sum();

    let mut by_reason: HashMap<ReturnReason, Tally> = HashMap::new();
    // keyed by item id, keeps the first name seen on a return record
    let mut by_item: HashMap<&str, (&str, Tally)> = HashMap::new();
    let mut total = Tally::default();

    for restock in restocks {
        let Some(reason) = restock.return_reason() else {
            continue;
        };
        total.add(restock);
        by_reason.entry(reason).or_default().add(restock);
        by_item
            .entry(restock.item_id.as_str())
            .or_insert_with(|| (restock.item_name.as_str(), Tally::default()))
            .1
            .add(restock);
    }

    let rate = |quantity: i64| percentage(quantity as f64, total_sales_quantity as f64);
    let reason_quantity =
        |reason: ReturnReason| by_reason.get(&reason).map_or(0, |tally| tally.quantity);
    let damaged_return_rate = rate(reason_quantity(ReturnReason::DamagedReturn));
    let supplier_return_rate = rate(reason_quantity(ReturnReason::SupplierReturn));

    let reasons: Vec<ReasonBreakdown> = ReturnReason::ALL
        .into_iter()
        .filter_map(|reason| {
            let tally = by_reason.get(&reason)?;
            Some(ReasonBreakdown {
                reason,
                label: reason.label().to_string(),
                count: tally.count,
                quantity: tally.quantity,
                value: tally.value,
                percentage: percentage(tally.quantity as f64, total.quantity as f64),
            })
        })
        .collect();

    let catalog: HashMap<&str, &InventoryItem> =
        items.iter().map(|item| (item.id.as_str(), item)).collect();

    let mut item_breakdown: Vec<ItemReturnBreakdown> = by_item
        .into_iter()
        .map(|(item_id, (fallback_name, tally))| {
            let item = catalog.get(item_id);
            let sales_quantity = sales_by_item.get(item_id).copied().unwrap_or(0);
            ItemReturnBreakdown {
                item_id: item_id.to_string(),
                item_name: item.map_or(fallback_name, |item| item.name.as_str()).to_string(),
                category: item.map(|item| item.category.clone()),
                return_quantity: tally.quantity,
                return_value: tally.value,
                sales_quantity,
                return_rate: percentage(tally.quantity as f64, sales_quantity as f64),
                has_returns_without_sales: tally.quantity > 0 && sales_quantity == 0,
            }
        })
        .collect();
    item_breakdown.sort_by(|a, b| {
        b.return_quantity
            .cmp(&a.return_quantity)
            .then_with(|| a.item_id.cmp(&b.item_id))
    });

    ReturnAnalytics {
        total_returns: total.count,
        total_return_quantity: total.quantity,
        total_return_value: total.value,
        total_sales_quantity,
        return_rate: rate(total.quantity),
        damaged_return_rate,
        supplier_return_rate,
        by_reason: reasons,
        has_returns_without_sales: item_breakdown.iter().any(|item| item.has_returns_without_sales),
        by_item: item_breakdown,
    }
}

/// Genuine sales quantity per item id
pub(crate) fn sales_quantity_by_item(transactions: &[Transaction]) -> HashMap<&str, i64> {
    let mut quantities: HashMap<&str, i64> = HashMap::new();
    for tx in genuine_sales(transactions) {
        *quantities.entry(tx.item_id.as_str()).or_default() += tx.quantity;
    }
    quantities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{item, movement, restock, sale};
    use crate::models::TransactionType;

    const AT: &str = "2024-05-01 / 10:00 AM";

    #[test]
    fn test_damaged_only_rates() {
        let items = vec![item("a", "General", 10, 5)];
        let txs = vec![sale("a", 60, 10, AT), sale("a", 40, 10, AT)];
        let restocks = vec![restock("a", 10, 50, "damaged-return")];

        let report = return_analytics(&restocks, &txs, &items);
        assert_eq!(report.total_sales_quantity, 100);
        assert_eq!(report.total_return_quantity, 10);
        assert_eq!(report.return_rate, 10.0);
        assert_eq!(report.damaged_return_rate, 10.0);
        assert_eq!(report.supplier_return_rate, 0.0);
        assert!(!report.has_returns_without_sales);
    }

    #[test]
    fn test_ordinary_restocks_are_not_returns() {
        let txs = vec![sale("a", 10, 10, AT)];
        let restocks = vec![restock("a", 500, 2500, "new-stock"), restock("a", 3, 9, "")];
        let report = return_analytics(&restocks, &txs, &[]);
        assert_eq!(report.total_returns, 0);
        assert_eq!(report.return_rate, 0.0);
        assert!(report.by_reason.is_empty());
        assert!(report.by_item.is_empty());
    }

    #[test]
    fn test_reason_breakdown() {
        let txs = vec![sale("a", 50, 10, AT), sale("b", 50, 10, AT)];
        let restocks = vec![
            restock("a", 3, 30, "damaged-return"),
            restock("b", 2, 20, "damaged-return"),
            restock("b", 15, 75, "supplier-return"),
        ];
        let report = return_analytics(&restocks, &txs, &[]);

        assert_eq!(report.total_returns, 3);
        assert_eq!(report.total_return_value, Decimal::from(125));
        assert_eq!(report.by_reason.len(), 2);

        let damaged = &report.by_reason[0];
        assert_eq!(damaged.label, "Damaged Stock");
        assert_eq!(damaged.count, 2);
        assert_eq!(damaged.quantity, 5);
        assert_eq!(damaged.value, Decimal::from(50));
        assert_eq!(damaged.percentage, 25.0);

        let supplier = &report.by_reason[1];
        assert_eq!(supplier.label, "Returns to Supplier");
        assert_eq!(supplier.percentage, 75.0);

        assert_eq!(report.damaged_return_rate, 5.0);
        assert_eq!(report.supplier_return_rate, 15.0);
        assert_eq!(report.return_rate, 20.0);
    }

    #[test]
    fn test_reason_order_is_fixed() {
        let txs = vec![sale("a", 10, 10, AT)];
        let restocks = vec![
            restock("a", 1, 10, "supplier-return"),
            restock("a", 1, 10, "damaged-return"),
        ];
        let report = return_analytics(&restocks, &txs, &[]);
        let reasons: Vec<ReturnReason> = report.by_reason.iter().map(|r| r.reason).collect();
        assert_eq!(reasons, ReturnReason::ALL);

        let supplier_only = return_analytics(&restocks[..1], &txs, &[]);
        assert_eq!(supplier_only.by_reason.len(), 1);
        assert_eq!(supplier_only.by_reason[0].reason, ReturnReason::SupplierReturn);
    }

    #[test]
    fn test_item_breakdown_and_rates() {
        let items = vec![item("a", "Kitchen", 10, 5), item("b", "Pantry", 10, 5)];
        let txs = vec![sale("a", 40, 10, AT), sale("b", 10, 10, AT)];
        let restocks = vec![
            restock("a", 2, 10, "damaged-return"),
            restock("b", 5, 25, "supplier-return"),
        ];
        let report = return_analytics(&restocks, &txs, &items);

        assert_eq!(report.by_item[0].item_id, "b");
        assert_eq!(report.by_item[0].return_rate, 50.0);
        assert_eq!(report.by_item[0].category.as_deref(), Some("Pantry"));
        assert_eq!(report.by_item[1].item_id, "a");
        assert_eq!(report.by_item[1].return_rate, 5.0);
    }

    #[test]
    fn test_returns_without_sales_are_flagged() {
        let items = vec![item("a", "Kitchen", 10, 5), item("ghost", "Kitchen", 0, 5)];
        let txs = vec![
            sale("a", 20, 10, AT),
            movement("ghost", 20, AT, TransactionType::Demo),
        ];
        let restocks = vec![restock("ghost", 4, 20, "damaged-return")];
        let report = return_analytics(&restocks, &txs, &items);

        let ghost = &report.by_item[0];
        assert!(ghost.has_returns_without_sales);
        assert_eq!(ghost.sales_quantity, 0);
        assert_eq!(ghost.return_rate, 0.0);
        assert!(report.has_returns_without_sales);
        // the portfolio denominator is left as recorded
        assert_eq!(report.return_rate, 20.0);
    }

    #[test]
    fn test_no_sales_at_all() {
        let restocks = vec![restock("a", 4, 20, "supplier-return")];
        let report = return_analytics(&restocks, &[], &[]);
        assert_eq!(report.return_rate, 0.0);
        assert_eq!(report.by_item[0].item_name, "Item a");
        assert_eq!(report.by_item[0].category, None);
        assert!(report.has_returns_without_sales);
    }
}
