//! Per-item demand forecasting with least-squares regression

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::genuine_sales_of;
use crate::models::Transaction;

/// Fewer genuine sales than this yields no forecast
pub const MIN_FORECAST_SALES: usize = 3;

/// Default forecast horizon in days
pub const DEFAULT_FORECAST_DAYS: u32 = 30;

/// Multiplier applied to predicted demand for the suggested order
pub const REORDER_BUFFER: f64 = 1.5;

/// Demand projection for one item
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveAnalytics {
    pub item_id: String,
    pub item_name: String,
    pub predicted_demand: f64,
    pub recommended_reorder_quantity: u64,
    pub trend: DemandTrend,
    /// Heuristic score in `[0, 100]`
    pub confidence: f64,
    pub days_to_forecast: u32,
    /// Number of distinct sale days fed to the regression
    pub data_points: usize,
}

/// Direction of recent demand relative to earlier demand
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DemandTrend {
    Increasing,
    Decreasing,
    Stable,
}

/// Fitted line `y = slope·x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Ordinary least squares of `ys` against their index `0..n`.
    ///
    /// A degenerate fit (one point) has slope 0 and passes through the mean.
    pub fn fit(ys: &[f64]) -> Self {
        let n = ys.len() as f64;
        if ys.is_empty() {
            return Self {
                slope: 0.0,
                intercept: 0.0,
            };
        }

        let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
        for (i, y) in ys.iter().enumerate() {
            let x = i as f64;
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_xx += x * x;
        }

        let denominator = n * sum_xx - sum_x * sum_x;
        let slope = if denominator == 0.0 {
            0.0
        } else {
            (n * sum_xy - sum_x * sum_y) / denominator
        };
        let intercept = (sum_y - slope * sum_x) / n;

        Self { slope, intercept }
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Project demand for `item_id` over the next `days_to_forecast` days.
///
/// Returns `None` when the item has fewer than three genuine sales.
pub fn forecast_demand(
    transactions: &[Transaction],
    item_id: &str,
    days_to_forecast: u32,
) -> Option<PredictiveAnalytics> {
    let mut sales: Vec<&Transaction> = genuine_sales_of(transactions, item_id).collect();
    if sales.len() < MIN_FORECAST_SALES {
        return None;
    }
    sales.sort_by_key(|tx| tx.timestamp);

    let daily = daily_quantities(&sales);
    let fit = LinearFit::fit(&daily);
    let n = daily.len() as f64;

    let base_demand = fit.predict(n).round().max(0.0);
    let predicted_demand = base_demand * f64::from(days_to_forecast) / 30.0;
    let recommended_reorder_quantity = (predicted_demand * REORDER_BUFFER).ceil() as u64;

    let item_name = sales
        .last()
        .map(|tx| tx.item_name.clone())
        .unwrap_or_default();

    Some(PredictiveAnalytics {
        item_id: item_id.to_string(),
        item_name,
        predicted_demand,
        recommended_reorder_quantity,
        trend: classify_trend(&daily),
        confidence: confidence_score(&daily, &fit),
        days_to_forecast,
        data_points: daily.len(),
    })
}

/// Quantity sold per calendar day, in date order, days without sales omitted
fn daily_quantities(sales: &[&Transaction]) -> Vec<f64> {
    let mut by_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for tx in sales {
        *by_day.entry(tx.timestamp.date()).or_insert(0) += tx.quantity;
    }
    by_day.into_values().map(|qty| qty as f64).collect()
}

/// Compare the last seven points against everything before them
fn classify_trend(points: &[f64]) -> DemandTrend {
    let split = points.len().saturating_sub(7);
    let (older, recent) = points.split_at(split);

    let recent_avg = recent.iter().sum::<f64>() / recent.len().max(1) as f64;
    let older_avg = older.iter().sum::<f64>() / split.max(1) as f64;

    if recent_avg > older_avg * 1.2 {
        DemandTrend::Increasing
    } else if recent_avg < older_avg * 0.8 {
        DemandTrend::Decreasing
    } else {
        DemandTrend::Stable
    }
}

/// `100 − (residual variance / mean) × 10`, clamped to `[0, 100]`
fn confidence_score(points: &[f64], fit: &LinearFit) -> f64 {
    let n = points.len() as f64;
    let mean = points.iter().sum::<f64>() / n;
    if mean <= 0.0 {
        return 0.0;
    }

    let variance = points
        .iter()
        .enumerate()
        .map(|(i, y)| (y - fit.predict(i as f64)).powi(2))
        .sum::<f64>()
        / n;

    (100.0 - (variance / mean) * 10.0).clamp(0.0, 100.0)
}
