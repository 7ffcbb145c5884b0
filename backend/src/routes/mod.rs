//! Route definitions for the Stockroom analytics server

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check, including source reachability
        .route("/health", get(handlers::health_check))
        // Read-only analytics over the current snapshot
        .nest("/analytics", analytics_routes())
}

/// Analytics routes
fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/forecast/:item_id", get(handlers::get_forecast))
        .route("/abc", get(handlers::get_abc_analysis))
        .route("/turnover", get(handlers::get_turnover))
        .route("/reorder-point/:item_id", get(handlers::get_reorder_point))
        .route("/dead-stock", get(handlers::get_dead_stock))
        .route("/margins", get(handlers::get_category_margins))
        .route("/returns", get(handlers::get_return_analytics))
        .route("/net-sales", get(handlers::get_net_sales))
        // Stock and sales summaries
        .route("/low-stock", get(handlers::get_low_stock))
        .route("/valuation", get(handlers::get_valuation))
        .route("/sales-summary", get(handlers::get_sales_summary))
}
