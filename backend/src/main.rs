//! Stockroom - Inventory Analytics Server
//!
//! Read-only analytics over inventory snapshots: demand forecasting,
//! ABC classification, turnover, reorder points, dead stock, margins
//! and return analysis.

use axum::{http::Uri, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod handlers;
mod routes;
mod services;
mod sources;

pub use config::Config;
use sources::SnapshotSource;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub source: SnapshotSource,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockroom_server=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Stockroom Analytics Server");
    tracing::info!("Environment: {}", config.environment);

    // Connect the snapshot source
    tracing::info!("Opening {:?} snapshot source...", config.source.kind);
    let source = SnapshotSource::from_config(&config.source).await?;

    match &source {
        SnapshotSource::Postgres(pg) if config.source.run_migrations => {
            tracing::info!("Running database migrations...");
            sqlx::migrate!("./migrations").run(pg.pool()).await?;
            tracing::info!("Migrations completed");
        }
        SnapshotSource::Csv(csv) => {
            tracing::info!("Reading CSV snapshots from {}", csv.dir().display());
        }
        _ => {}
    }

    if !source.is_reachable().await {
        tracing::warn!("Snapshot source is not reachable yet; requests will fail until it is");
    }

    // Create application state
    let state = AppState {
        source,
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Stockroom Inventory Analytics API v1.0"
}

/// Liveness endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn not_found(uri: Uri) -> error::AppError {
    error::AppError::NotFound(format!("Route {}", uri.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use rust_decimal::Decimal;
    use serde_json::Value;
    use shared::timestamp::parse_timestamp;
    use shared::{
        InventoryItem, MovementKind, Restock, Snapshot, Transaction, TransactionType,
    };
    use tower::ServiceExt;

    use crate::config::{AnalyticsConfig, ServerConfig, SourceConfig, SourceKind};

    fn item(id: &str, category: &str, quantity: i64, cost: i64) -> InventoryItem {
        InventoryItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            category: category.to_string(),
            quantity,
            cost_price: Decimal::from(cost),
            selling_price: Decimal::from(cost * 2),
            reorder_level: 5,
            total_cogs: None,
        }
    }

    fn sale(id: &str, item_id: &str, quantity: i64, price: i64, at: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            item_id: item_id.to_string(),
            item_name: format!("Item {}", item_id),
            quantity,
            cost_price: Decimal::from(price / 2),
            selling_price: Decimal::from(price),
            total_cost: Decimal::from(price / 2 * quantity),
            total_revenue: Decimal::from(price * quantity),
            profit: Decimal::from((price - price / 2) * quantity),
            timestamp: parse_timestamp(at).unwrap(),
            kind: MovementKind::Sale,
            transaction_type: TransactionType::Sale,
        }
    }

    fn test_app() -> Router {
        let snapshot = Snapshot::new(
            vec![
                item("a", "Brewing", 2, 10),
                item("b", "Grinders", 40, 50),
                item("c", "Brewing", 12, 4),
            ],
            vec![
                sale("t1", "a", 4, 20, "2024-05-01 / 09:00 AM"),
                sale("t2", "a", 6, 20, "2024-05-02 / 09:00 AM"),
                sale("t3", "a", 5, 20, "2024-05-03 / 09:00 AM"),
                sale("t4", "b", 1, 100, "2024-05-03 / 02:30 PM"),
            ],
            vec![Restock {
                id: "r1".to_string(),
                item_id: "a".to_string(),
                item_name: "Item a".to_string(),
                quantity: 2,
                cost_price: Decimal::from(10),
                total_cost: Decimal::from(20),
                timestamp: parse_timestamp("2024-05-04 / 10:00 AM").unwrap(),
                reason: "damaged-return".to_string(),
            }],
        );

        let config = Config {
            environment: "test".to_string(),
            server: ServerConfig::default(),
            source: SourceConfig {
                kind: SourceKind::Csv,
                csv_dir: "data".to_string(),
                database_url: None,
                max_connections: 1,
                min_connections: 1,
                run_migrations: false,
            },
            analytics: AnalyticsConfig::default(),
        };

        create_app(AppState {
            source: SnapshotSource::Static(Arc::new(snapshot)),
            config: Arc::new(config),
        })
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_liveness() {
        let response = test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, body) = get_json("/api/v1/analytics/unknown").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_health_reports_source() {
        let (status, body) = get_json("/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "static");
        assert_eq!(body["source_status"], "reachable");
    }

    #[tokio::test]
    async fn test_forecast_endpoint() {
        let (status, body) = get_json("/api/v1/analytics/forecast/a?days=30").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["insufficientData"], false);
        assert_eq!(body["forecast"]["itemId"], "a");
        assert_eq!(body["forecast"]["dataPoints"], 3);

        let (status, body) = get_json("/api/v1/analytics/forecast/b").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["insufficientData"], true);
        assert_eq!(body["forecast"], Value::Null);
    }

    #[tokio::test]
    async fn test_forecast_rejects_out_of_range_days() {
        let (status, body) = get_json("/api/v1/analytics/forecast/a?days=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["field"], "days");
    }

    #[tokio::test]
    async fn test_abc_endpoint_orders_by_revenue() {
        let (status, body) = get_json("/api/v1/analytics/abc").await;
        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        // a: 300 revenue, b: 100, c: nothing sold
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["itemId"], "a");
        assert_eq!(rows[0]["category"], "A");
        assert_eq!(rows[2]["itemId"], "c");
    }

    #[tokio::test]
    async fn test_margins_endpoint() {
        let (status, body) = get_json("/api/v1/analytics/margins").await;
        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_returns_endpoint() {
        let (status, body) = get_json("/api/v1/analytics/returns").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalReturns"], 1);
        assert_eq!(body["totalReturnQuantity"], 2);
    }

    #[tokio::test]
    async fn test_low_stock_endpoint() {
        let (status, body) = get_json("/api/v1/analytics/low-stock").await;
        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["itemId"], "a");
    }

    #[tokio::test]
    async fn test_sales_summary_rejects_inverted_range() {
        let (status, body) =
            get_json("/api/v1/analytics/sales-summary?start=2024-05-03&end=2024-05-01").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["field"], "start");
    }

    #[tokio::test]
    async fn test_sales_summary_bounds_by_day() {
        let (status, body) =
            get_json("/api/v1/analytics/sales-summary?start=2024-05-03&end=2024-05-03").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["saleCount"], 2);
        assert_eq!(body["unitsSold"], 6);
    }
}
