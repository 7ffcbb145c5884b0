//! Stock movement models

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A recorded stock movement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub item_id: String,
    pub item_name: String,
    pub quantity: i64,
    pub cost_price: Decimal,
    pub selling_price: Decimal,
    pub total_cost: Decimal,
    pub total_revenue: Decimal,
    pub profit: Decimal,
    #[serde(with = "crate::timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub transaction_type: TransactionType,
}

impl Transaction {
    /// True for revenue-generating sales; demo, internal and transfer
    /// movements and restock records never count.
    pub fn is_genuine_sale(&self) -> bool {
        self.kind == MovementKind::Sale && self.transaction_type == TransactionType::Sale
    }
}

/// Direction of a movement (`type` on the wire)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    Sale,
    Restock,
}

/// Business purpose of an outgoing movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Sale,
    Demo,
    Internal,
    Transfer,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Sale => "sale",
            MovementKind::Restock => "restock",
        }
    }
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Sale => "sale",
            TransactionType::Demo => "demo",
            TransactionType::Internal => "internal",
            TransactionType::Transfer => "transfer",
        }
    }
}

impl std::str::FromStr for MovementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sale" => Ok(MovementKind::Sale),
            "restock" => Ok(MovementKind::Restock),
            other => Err(format!("unknown movement type: {}", other)),
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sale" => Ok(TransactionType::Sale),
            "demo" => Ok(TransactionType::Demo),
            "internal" => Ok(TransactionType::Internal),
            "transfer" => Ok(TransactionType::Transfer),
            other => Err(format!("unknown transaction type: {}", other)),
        }
    }
}
