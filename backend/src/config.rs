//! Configuration management for the Stockroom analytics server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with STOCKROOM__ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::analytics::{
    DEFAULT_DEAD_STOCK_DAYS, DEFAULT_FORECAST_DAYS, DEFAULT_LEAD_TIME_DAYS,
    DEFAULT_SERVICE_LEVEL, DEFAULT_TURNOVER_PERIOD_DAYS,
};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Where inventory snapshots are read from
    pub source: SourceConfig,

    /// Defaults for analytics query parameters
    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

/// Kind of snapshot provider
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Spreadsheet export: a directory of CSV files
    Csv,
    /// Hosted PostgreSQL store
    Postgres,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub kind: SourceKind,

    /// Directory holding items.csv, transactions.csv and restocks.csv
    pub csv_dir: String,

    /// PostgreSQL connection URL
    pub database_url: Option<String>,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Apply migrations at startup
    pub run_migrations: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    pub forecast_days: u32,
    pub turnover_period_days: u32,
    pub lead_time_days: u32,
    pub service_level: f64,
    pub dead_stock_days: u32,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("STOCKROOM_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("source.kind", "csv")?
            .set_default("source.csv_dir", "data")?
            .set_default("source.max_connections", 10)?
            .set_default("source.min_connections", 2)?
            .set_default("source.run_migrations", environment == "development")?
            .set_default("analytics.forecast_days", DEFAULT_FORECAST_DAYS)?
            .set_default("analytics.turnover_period_days", DEFAULT_TURNOVER_PERIOD_DAYS)?
            .set_default("analytics.lead_time_days", DEFAULT_LEAD_TIME_DAYS)?
            .set_default("analytics.service_level", DEFAULT_SERVICE_LEVEL)?
            .set_default("analytics.dead_stock_days", DEFAULT_DEAD_STOCK_DAYS)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (STOCKROOM__ prefix)
            .add_source(
                Environment::with_prefix("STOCKROOM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            forecast_days: DEFAULT_FORECAST_DAYS,
            turnover_period_days: DEFAULT_TURNOVER_PERIOD_DAYS,
            lead_time_days: DEFAULT_LEAD_TIME_DAYS,
            service_level: DEFAULT_SERVICE_LEVEL,
            dead_stock_days: DEFAULT_DEAD_STOCK_DAYS,
        }
    }
}
