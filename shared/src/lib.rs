//! Shared types, models and the inventory analytics engine for Stockroom
//!
//! This crate is used by the backend server and, through WASM, by the
//! dashboard. Everything under [`analytics`] is a pure function of an
//! in-memory snapshot.

pub mod analytics;
pub mod error;
pub mod models;
pub mod timestamp;
pub mod types;
pub mod validation;

pub use error::*;
pub use models::*;
pub use types::*;
pub use validation::*;
