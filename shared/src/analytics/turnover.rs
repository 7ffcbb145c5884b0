//! Inventory turnover and velocity classification

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{genuine_sales_of, to_f64};
use crate::models::{InventoryItem, Transaction};
use crate::types::TimestampRange;

/// Default lookback window in days
pub const DEFAULT_TURNOVER_PERIOD_DAYS: u32 = 90;

/// Velocity bucket derived from days-to-sell
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TurnoverStatus {
    FastMoving,
    Normal,
    SlowMoving,
    DeadStock,
}

impl TurnoverStatus {
    pub fn from_days_to_sell(days_to_sell: f64) -> Self {
        if days_to_sell < 30.0 {
            TurnoverStatus::FastMoving
        } else if days_to_sell < 90.0 {
            TurnoverStatus::Normal
        } else if days_to_sell < 180.0 {
            TurnoverStatus::SlowMoving
        } else {
            TurnoverStatus::DeadStock
        }
    }
}

/// Turnover of one item over the analysis window.
///
/// Infinite values serialize as JSON `null`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryTurnover {
    pub item_id: String,
    pub item_name: String,
    pub period_days: u32,
    pub cogs_sold: Decimal,
    pub average_inventory_value: Decimal,
    pub turnover_ratio: f64,
    pub days_to_sell: f64,
    pub status: TurnoverStatus,
}

/// `cogs_sold / inventory_value`, with a zero denominator giving 0 when
/// nothing sold and +∞ otherwise
pub fn turnover_ratio(cogs_sold: Decimal, inventory_value: Decimal) -> f64 {
    if inventory_value.is_zero() {
        if cogs_sold.is_zero() {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        to_f64(cogs_sold) / to_f64(inventory_value)
    }
}

/// Turnover for every item over the `period_days` before `now`
pub fn analyze_turnover(
    items: &[InventoryItem],
    transactions: &[Transaction],
    period_days: u32,
    now: NaiveDateTime,
) -> Vec<InventoryTurnover> {
    let window = TimestampRange::trailing_days(now, period_days);

    items
        .iter()
        .map(|item| {
            let cogs_sold: Decimal = genuine_sales_of(transactions, &item.id)
                .filter(|tx| window.contains(&tx.timestamp))
                .map(|tx| tx.total_cost)
                .sum();
            let average_inventory_value = item.average_inventory_value();
            let ratio = turnover_ratio(cogs_sold, average_inventory_value);
            let days_to_sell = if ratio > 0.0 {
                f64::from(period_days) / ratio
            } else {
                f64::INFINITY
            };

            InventoryTurnover {
                item_id: item.id.clone(),
                item_name: item.name.clone(),
                period_days,
                cogs_sold,
                average_inventory_value,
                turnover_ratio: ratio,
                days_to_sell,
                status: TurnoverStatus::from_days_to_sell(days_to_sell),
            }
        })
        .collect()
}
