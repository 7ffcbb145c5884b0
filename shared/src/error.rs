//! Errors raised at the data-provider boundary
//!
//! The analytics engine itself never fails; these cover snapshots that
//! cannot be handed to it.

use thiserror::Error;

/// A provider timestamp that does not match `yyyy-MM-dd / hh:mm a`
#[derive(Error, Debug)]
pub enum TimestampError {
    #[error("malformed timestamp {value:?}: {source}")]
    Malformed {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// A snapshot record that violates the data contract
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("invalid {record} {id}: {message}")]
    InvalidRecord {
        record: &'static str,
        id: String,
        field: &'static str,
        message: &'static str,
    },

    #[error("duplicate item id {0}")]
    DuplicateItemId(String),
}

impl SnapshotError {
    pub fn field(&self) -> Option<&'static str> {
        match self {
            SnapshotError::InvalidRecord { field, .. } => Some(field),
            SnapshotError::DuplicateItemId(_) => Some("id"),
        }
    }
}
