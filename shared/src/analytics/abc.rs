//! ABC (Pareto) classification of items by revenue contribution

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::{genuine_sales, percentage, to_f64};
use crate::models::{InventoryItem, Restock, Transaction};

/// Upper cumulative-revenue bound (inclusive) for class A
pub const CLASS_A_THRESHOLD: f64 = 80.0;
/// Upper cumulative-revenue bound (inclusive) for class B
pub const CLASS_B_THRESHOLD: f64 = 95.0;

/// Revenue class
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AbcCategory {
    A,
    B,
    C,
}

impl AbcCategory {
    /// Class for a running cumulative revenue percentage
    pub fn from_cumulative_percentage(cumulative: f64) -> Self {
        if cumulative <= CLASS_A_THRESHOLD {
            AbcCategory::A
        } else if cumulative <= CLASS_B_THRESHOLD {
            AbcCategory::B
        } else {
            AbcCategory::C
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            AbcCategory::A => {
                "High priority: keep well stocked, review demand weekly and never let it run out"
            }
            AbcCategory::B => "Medium priority: review stock levels monthly and reorder on schedule",
            AbcCategory::C => {
                "Low priority: keep minimal stock and consider bundling or clearing slow units"
            }
        }
    }
}

/// One item's place in the revenue ranking
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AbcAnalysis {
    pub item_id: String,
    pub item_name: String,
    pub revenue: Decimal,
    pub cumulative_revenue: Decimal,
    pub cumulative_percentage: f64,
    pub category: AbcCategory,
    pub recommendation: String,
}

/// Classify every item by its gross genuine-sale revenue
pub fn classify_abc(items: &[InventoryItem], transactions: &[Transaction]) -> Vec<AbcAnalysis> {
    let revenue = revenue_by_item(transactions);
    let ranked = items
        .iter()
        .map(|item| (item, revenue.get(item.id.as_str()).copied().unwrap_or_default()))
        .collect();
    rank(ranked)
}

/// Classify items by revenue net of return costs.
///
/// The `totalCost` of damaged and supplier returns is subtracted from each
/// item's revenue; items left with zero or negative revenue are not ranked.
pub fn classify_abc_net_of_returns(
    items: &[InventoryItem],
    transactions: &[Transaction],
    restocks: &[Restock],
) -> Vec<AbcAnalysis> {
    let mut revenue = revenue_by_item(transactions);
    for restock in restocks.iter().filter(|r| r.is_return()) {
        *revenue.entry(restock.item_id.as_str()).or_default() -= restock.total_cost;
    }

    let ranked = items
        .iter()
        .filter_map(|item| {
            let net = revenue.get(item.id.as_str()).copied().unwrap_or_default();
            (net > Decimal::ZERO).then_some((item, net))
        })
        .collect();
    rank(ranked)
}

fn revenue_by_item(transactions: &[Transaction]) -> HashMap<&str, Decimal> {
    let mut revenue: HashMap<&str, Decimal> = HashMap::new();
    for tx in genuine_sales(transactions) {
        *revenue.entry(tx.item_id.as_str()).or_default() += tx.total_revenue;
    }
    revenue
}

/// Sort descending by revenue and assign classes from the running share.
///
/// A zero revenue total puts every item in class C with a 0% share.
fn rank(mut ranked: Vec<(&InventoryItem, Decimal)>) -> Vec<AbcAnalysis> {
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let total: Decimal = ranked.iter().map(|(_, revenue)| *revenue).sum();
    let total_f64 = to_f64(total);

    let mut cumulative = Decimal::ZERO;
    ranked
        .into_iter()
        .map(|(item, revenue)| {
            cumulative += revenue;
            let (cumulative_percentage, category) = if total.is_zero() {
                (0.0, AbcCategory::C)
            } else {
                let share = percentage(to_f64(cumulative), total_f64);
                (share, AbcCategory::from_cumulative_percentage(share))
            };
            AbcAnalysis {
                item_id: item.id.clone(),
                item_name: item.name.clone(),
                revenue,
                cumulative_revenue: cumulative,
                cumulative_percentage,
                category,
                recommendation: category.recommendation().to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{item, movement, restock, sale};
    use crate::models::TransactionType;

    const AT: &str = "2024-05-01 / 10:00 AM";

    fn catalog() -> Vec<InventoryItem> {
        ["a", "b", "c", "d"].iter().map(|id| item(id, "General", 10, 5)).collect()
    }

    #[test]
    fn test_pareto_split() {
        // revenue: a=700, b=100, c=150, d=50 → total 1000
        let txs = vec![
            sale("a", 70, 10, AT),
            sale("b", 10, 10, AT),
            sale("c", 15, 10, AT),
            sale("d", 5, 10, AT),
        ];
        let result = classify_abc(&catalog(), &txs);

        let order: Vec<&str> = result.iter().map(|r| r.item_id.as_str()).collect();
        assert_eq!(order, ["a", "c", "b", "d"]);

        let classes: Vec<AbcCategory> = result.iter().map(|r| r.category).collect();
        // cumulative: 70%, 85%, 95%, 100%
        assert_eq!(classes, [AbcCategory::A, AbcCategory::B, AbcCategory::B, AbcCategory::C]);
        assert_eq!(result[2].cumulative_percentage, 95.0);
        assert_eq!(result[3].cumulative_percentage, 100.0);
    }

    #[test]
    fn test_threshold_boundaries_are_inclusive() {
        assert_eq!(AbcCategory::from_cumulative_percentage(80.0), AbcCategory::A);
        assert_eq!(AbcCategory::from_cumulative_percentage(80.0001), AbcCategory::B);
        assert_eq!(AbcCategory::from_cumulative_percentage(95.0), AbcCategory::B);
        assert_eq!(AbcCategory::from_cumulative_percentage(95.0001), AbcCategory::C);
    }

    #[test]
    fn test_items_without_sales_are_ranked_last() {
        let txs = vec![sale("b", 10, 10, AT)];
        let result = classify_abc(&catalog(), &txs);
        assert_eq!(result.len(), 4);
        assert_eq!(result[0].item_id, "b");
        assert_eq!(result[0].category, AbcCategory::C);
        assert!(result[1..].iter().all(|r| r.revenue.is_zero()));
    }

    #[test]
    fn test_non_sale_movements_are_ignored() {
        let txs = vec![
            sale("a", 1, 10, AT),
            movement("b", 100, AT, TransactionType::Transfer),
            movement("c", 100, AT, TransactionType::Demo),
        ];
        let result = classify_abc(&catalog(), &txs);
        assert_eq!(result[0].item_id, "a");
        assert_eq!(result[0].revenue, Decimal::from(10));
    }

    #[test]
    fn test_zero_total_revenue_is_guarded() {
        let result = classify_abc(&catalog(), &[]);
        assert_eq!(result.len(), 4);
        assert!(result
            .iter()
            .all(|r| r.category == AbcCategory::C && r.cumulative_percentage == 0.0));
        assert!(classify_abc(&[], &[]).is_empty());
    }

    #[test]
    fn test_recommendation_follows_category() {
        let txs = vec![sale("a", 10, 10, AT)];
        let result = classify_abc(&catalog(), &txs);
        assert_eq!(result[0].recommendation, AbcCategory::C.recommendation());
        assert_ne!(AbcCategory::A.recommendation(), AbcCategory::B.recommendation());
    }

    #[test]
    fn test_net_of_returns_drops_non_positive_items() {
        let txs = vec![
            sale("a", 50, 10, AT), // 500
            sale("b", 30, 10, AT), // 300
            sale("c", 10, 10, AT), // 100
        ];
        let restocks = vec![
            restock("a", 5, 450, "damaged-return"),   // a → 50
            restock("c", 2, 100, "supplier-return"),  // c → 0, dropped
            restock("b", 20, 999, "new-stock"),       // ordinary restock, ignored
        ];
        let result = classify_abc_net_of_returns(&catalog(), &txs, &restocks);

        let order: Vec<(&str, Decimal)> =
            result.iter().map(|r| (r.item_id.as_str(), r.revenue)).collect();
        assert_eq!(order, [("b", Decimal::from(300)), ("a", Decimal::from(50))]);
        assert!((result.last().unwrap().cumulative_percentage - 100.0).abs() < 1e-9);
    }
}
