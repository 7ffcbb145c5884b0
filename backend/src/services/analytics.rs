//! Analytics service: loads a snapshot and runs the engine over it

use chrono::NaiveDateTime;
use serde::Serialize;
use shared::analytics::{
    analyze_turnover, classify_abc, classify_abc_net_of_returns, find_dead_stock,
    forecast_demand, inventory_valuation, low_stock_items, margin_by_category, net_sales,
    reorder_point, return_analytics, sales_summary, AbcAnalysis, CategoryMargin,
    InventoryTurnover, InventoryValuation, LowStockAlert, NetSales, PredictiveAnalytics,
    ReturnAnalytics, SalesSummary,
};
use shared::{InventoryItem, TimestampRange};

use crate::config::AnalyticsConfig;
use crate::error::AppResult;
use crate::sources::SnapshotSource;

/// Analytics service
#[derive(Clone)]
pub struct AnalyticsService {
    source: SnapshotSource,
    defaults: AnalyticsConfig,
}

/// Forecast outcome; `forecast` is absent when there is not enough history
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResponse {
    pub item_id: String,
    pub insufficient_data: bool,
    pub forecast: Option<PredictiveAnalytics>,
}

/// Reorder point, compared with the stock on hand when the item is cataloged
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderPointReport {
    pub item_id: String,
    pub lead_time_days: u32,
    pub service_level: f64,
    pub reorder_point: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needs_reorder: Option<bool>,
}

impl AnalyticsService {
    pub fn new(source: SnapshotSource, defaults: AnalyticsConfig) -> Self {
        Self { source, defaults }
    }

    /// Demand forecast for one item
    pub async fn forecast(&self, item_id: &str, days: Option<u32>) -> AppResult<ForecastResponse> {
        let snapshot = self.source.load().await?;
        let days = days.unwrap_or(self.defaults.forecast_days);
        let forecast = forecast_demand(&snapshot.transactions, item_id, days);

        if forecast.is_none() {
            tracing::debug!("Not enough sales history to forecast {}", item_id);
        }

        Ok(ForecastResponse {
            item_id: item_id.to_string(),
            insufficient_data: forecast.is_none(),
            forecast,
        })
    }

    /// ABC classification, optionally net of returns
    pub async fn abc(&self, net_of_returns: bool) -> AppResult<Vec<AbcAnalysis>> {
        let snapshot = self.source.load().await?;
        let result = if net_of_returns {
            classify_abc_net_of_returns(&snapshot.items, &snapshot.transactions, &snapshot.restocks)
        } else {
            classify_abc(&snapshot.items, &snapshot.transactions)
        };
        Ok(result)
    }

    pub async fn turnover(
        &self,
        period_days: Option<u32>,
        now: NaiveDateTime,
    ) -> AppResult<Vec<InventoryTurnover>> {
        let snapshot = self.source.load().await?;
        let period_days = period_days.unwrap_or(self.defaults.turnover_period_days);
        Ok(analyze_turnover(&snapshot.items, &snapshot.transactions, period_days, now))
    }

    pub async fn reorder_point(
        &self,
        item_id: &str,
        lead_time_days: Option<u32>,
        service_level: Option<f64>,
    ) -> AppResult<ReorderPointReport> {
        let snapshot = self.source.load().await?;
        let lead_time_days = lead_time_days.unwrap_or(self.defaults.lead_time_days);
        let service_level = service_level.unwrap_or(self.defaults.service_level);

        let point = reorder_point(&snapshot.transactions, item_id, lead_time_days, service_level);
        let current_quantity = snapshot.item(item_id).map(|item| item.quantity);

        Ok(ReorderPointReport {
            item_id: item_id.to_string(),
            lead_time_days,
            service_level,
            reorder_point: point,
            current_quantity,
            needs_reorder: current_quantity.map(|qty| qty <= point as i64),
        })
    }

    pub async fn dead_stock(
        &self,
        days: Option<u32>,
        now: NaiveDateTime,
    ) -> AppResult<Vec<InventoryItem>> {
        let snapshot = self.source.load().await?;
        let days = days.unwrap_or(self.defaults.dead_stock_days);
        let dead: Vec<InventoryItem> = find_dead_stock(&snapshot.items, &snapshot.transactions, days, now)
            .into_iter()
            .cloned()
            .collect();

        tracing::info!("{} of {} items are dead stock", dead.len(), snapshot.items.len());
        Ok(dead)
    }

    pub async fn margins(&self) -> AppResult<Vec<CategoryMargin>> {
        let snapshot = self.source.load().await?;
        Ok(margin_by_category(&snapshot.transactions, &snapshot.items))
    }

    pub async fn returns(&self) -> AppResult<ReturnAnalytics> {
        let snapshot = self.source.load().await?;
        let report = return_analytics(&snapshot.restocks, &snapshot.transactions, &snapshot.items);

        if report.has_returns_without_sales {
            tracing::warn!(
                "Returns recorded without matching sales for {} item(s)",
                report.by_item.iter().filter(|item| item.has_returns_without_sales).count()
            );
        }
        Ok(report)
    }

    pub async fn net_sales(&self) -> AppResult<Vec<NetSales>> {
        let snapshot = self.source.load().await?;
        Ok(net_sales(&snapshot.transactions, &snapshot.restocks))
    }

    pub async fn low_stock(&self) -> AppResult<Vec<LowStockAlert>> {
        let snapshot = self.source.load().await?;
        Ok(low_stock_items(&snapshot.items))
    }

    pub async fn valuation(&self) -> AppResult<InventoryValuation> {
        let snapshot = self.source.load().await?;
        Ok(inventory_valuation(&snapshot.items))
    }

    pub async fn sales_summary(&self, range: TimestampRange) -> AppResult<SalesSummary> {
        let snapshot = self.source.load().await?;
        Ok(sales_summary(&snapshot.transactions, &range))
    }
}
