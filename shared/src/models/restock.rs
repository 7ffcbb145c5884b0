//! Restock and return models

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An incoming stock record. Returns are restocks with a return reason.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Restock {
    pub id: String,
    pub item_id: String,
    pub item_name: String,
    pub quantity: i64,
    pub cost_price: Decimal,
    pub total_cost: Decimal,
    #[serde(with = "crate::timestamp")]
    pub timestamp: NaiveDateTime,
    /// Free text; see [`ReturnReason`] for the values treated as returns
    #[serde(default)]
    pub reason: String,
}

impl Restock {
    pub fn return_reason(&self) -> Option<ReturnReason> {
        ReturnReason::from_reason(&self.reason)
    }

    pub fn is_return(&self) -> bool {
        self.return_reason().is_some()
    }
}

/// Restock reasons that represent returned stock rather than replenishment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum ReturnReason {
    DamagedReturn,
    SupplierReturn,
}

impl ReturnReason {
    pub const ALL: [ReturnReason; 2] = [ReturnReason::DamagedReturn, ReturnReason::SupplierReturn];

    /// Exact, case-sensitive match on the restock `reason` text
    pub fn from_reason(reason: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|known| known.as_str() == reason)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnReason::DamagedReturn => "damaged-return",
            ReturnReason::SupplierReturn => "supplier-return",
        }
    }

    /// Dashboard label
    pub fn label(&self) -> &'static str {
        match self {
            ReturnReason::DamagedReturn => "Damaged Stock",
            ReturnReason::SupplierReturn => "Returns to Supplier",
        }
    }
}

impl std::fmt::Display for ReturnReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
