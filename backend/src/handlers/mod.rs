//! HTTP handlers for the Stockroom analytics server

pub mod analytics;
pub mod health;

pub use analytics::*;
pub use health::*;

use validator::Validate;

use crate::error::{AppError, AppResult};

/// Reject query parameters that fail their `#[validate]` rules
pub(crate) fn validate_query<T: Validate>(query: &T) -> AppResult<()> {
    query.validate().map_err(|errors| {
        let field = errors
            .field_errors()
            .keys()
            .next()
            .map(|field| field.to_string())
            .unwrap_or_default();
        AppError::validation(&field, format!("{} is out of range", field))
    })
}
