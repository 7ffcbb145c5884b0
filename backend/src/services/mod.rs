//! Business logic services for the Stockroom analytics server

pub mod analytics;

pub use analytics::AnalyticsService;
