//! HTTP handlers for inventory analytics endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use shared::analytics::{
    AbcAnalysis, CategoryMargin, InventoryTurnover, InventoryValuation, LowStockAlert, NetSales,
    ReturnAnalytics, SalesSummary,
};
use shared::{InventoryItem, TimestampRange};
use validator::Validate;

use super::validate_query;
use crate::error::{AppError, AppResult};
use crate::services::analytics::{AnalyticsService, ForecastResponse, ReorderPointReport};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct ForecastQuery {
    #[validate(range(min = 1, max = 365))]
    pub days: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct AbcQuery {
    pub net_of_returns: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TurnoverQuery {
    #[validate(range(min = 1, max = 730))]
    pub period_days: Option<u32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReorderQuery {
    #[validate(range(min = 1, max = 365))]
    pub lead_time_days: Option<u32>,
    #[validate(range(min = 0.5, max = 0.9999))]
    pub service_level: Option<f64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DeadStockQuery {
    #[validate(range(max = 3650))]
    pub days: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SalesSummaryQuery {
    /// First day included, `YYYY-MM-DD`
    pub start: Option<String>,
    /// Last day included, `YYYY-MM-DD`
    pub end: Option<String>,
}

fn service(state: &AppState) -> AnalyticsService {
    AnalyticsService::new(state.source.clone(), state.config.analytics.clone())
}

/// Wall-clock time in the same local frame as provider timestamps
fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn parse_day(field: &str, value: Option<&str>) -> AppResult<Option<NaiveDate>> {
    value
        .map(|raw| {
            raw.parse::<NaiveDate>()
                .map_err(|_| AppError::validation(field, format!("{} must be YYYY-MM-DD", field)))
        })
        .transpose()
}

/// Forecast demand for an item
pub async fn get_forecast(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Query(query): Query<ForecastQuery>,
) -> AppResult<Json<ForecastResponse>> {
    validate_query(&query)?;
    let response = service(&state).forecast(&item_id, query.days).await?;
    Ok(Json(response))
}

/// ABC classification
pub async fn get_abc_analysis(
    State(state): State<AppState>,
    Query(query): Query<AbcQuery>,
) -> AppResult<Json<Vec<AbcAnalysis>>> {
    let result = service(&state)
        .abc(query.net_of_returns.unwrap_or(false))
        .await?;
    Ok(Json(result))
}

/// Inventory turnover per item
pub async fn get_turnover(
    State(state): State<AppState>,
    Query(query): Query<TurnoverQuery>,
) -> AppResult<Json<Vec<InventoryTurnover>>> {
    validate_query(&query)?;
    let result = service(&state).turnover(query.period_days, now()).await?;
    Ok(Json(result))
}

/// Reorder point for an item
pub async fn get_reorder_point(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Query(query): Query<ReorderQuery>,
) -> AppResult<Json<ReorderPointReport>> {
    validate_query(&query)?;
    let report = service(&state)
        .reorder_point(&item_id, query.lead_time_days, query.service_level)
        .await?;
    Ok(Json(report))
}

/// Items without a recent sale
pub async fn get_dead_stock(
    State(state): State<AppState>,
    Query(query): Query<DeadStockQuery>,
) -> AppResult<Json<Vec<InventoryItem>>> {
    validate_query(&query)?;
    let items = service(&state).dead_stock(query.days, now()).await?;
    Ok(Json(items))
}

/// Margin by category
pub async fn get_category_margins(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CategoryMargin>>> {
    Ok(Json(service(&state).margins().await?))
}

/// Return analytics
pub async fn get_return_analytics(
    State(state): State<AppState>,
) -> AppResult<Json<ReturnAnalytics>> {
    Ok(Json(service(&state).returns().await?))
}

/// Net sales per item
pub async fn get_net_sales(State(state): State<AppState>) -> AppResult<Json<Vec<NetSales>>> {
    Ok(Json(service(&state).net_sales().await?))
}

/// Items at or below their reorder level
pub async fn get_low_stock(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<LowStockAlert>>> {
    Ok(Json(service(&state).low_stock().await?))
}

/// Value of the stock on hand
pub async fn get_valuation(
    State(state): State<AppState>,
) -> AppResult<Json<InventoryValuation>> {
    Ok(Json(service(&state).valuation().await?))
}

/// Sales totals, optionally bounded by day
pub async fn get_sales_summary(
    State(state): State<AppState>,
    Query(query): Query<SalesSummaryQuery>,
) -> AppResult<Json<SalesSummary>> {
    let start = parse_day("start", query.start.as_deref())?;
    let end = parse_day("end", query.end.as_deref())?;
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(AppError::validation("start", "start must not be after end"));
        }
    }

    let range = TimestampRange::new(
        start.and_then(|day| day.and_hms_opt(0, 0, 0)),
        end.and_then(|day| day.and_hms_opt(23, 59, 59)),
    );
    Ok(Json(service(&state).sales_summary(range).await?))
}
