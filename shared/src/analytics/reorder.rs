//! Reorder point with statistical safety stock

use super::genuine_sales_of;
use crate::models::Transaction;

/// Number of most recent sale records considered
pub const REORDER_SAMPLE_SIZE: usize = 30;

/// z-score for a 95% one-tailed service level
pub const SAFETY_Z_SCORE: f64 = 1.65;

pub const DEFAULT_LEAD_TIME_DAYS: u32 = 7;
pub const DEFAULT_SERVICE_LEVEL: f64 = 0.95;

/// Stock level at which `item_id` should be reordered.
///
/// Demand is estimated from the latest 30 genuine sale records: average
/// daily sales is their total quantity over 30, and safety stock is
/// `1.65 × σ × √lead_time` with σ the population standard deviation of the
/// per-record quantities. `service_level` is accepted but z stays at 1.65.
pub fn reorder_point(
    transactions: &[Transaction],
    item_id: &str,
    lead_time_days: u32,
    _service_level: f64,
) -> u64 {
    let mut sales: Vec<&Transaction> = genuine_sales_of(transactions, item_id).collect();
    if sales.is_empty() {
        return 0;
    }
    sales.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sales.truncate(REORDER_SAMPLE_SIZE);

    let quantities: Vec<f64> = sales.iter().map(|tx| tx.quantity as f64).collect();
    let total: f64 = quantities.iter().sum();
    let avg_daily_sales = total / REORDER_SAMPLE_SIZE as f64;

    let mean = total / quantities.len() as f64;
    let variance =
        quantities.iter().map(|q| (q - mean).powi(2)).sum::<f64>() / quantities.len() as f64;
    let std_dev = variance.sqrt();

    let lead_time = f64::from(lead_time_days);
    let safety_stock = SAFETY_Z_SCORE * std_dev * lead_time.sqrt();

    (avg_daily_sales * lead_time + safety_stock).ceil().max(0.0) as u64
}
