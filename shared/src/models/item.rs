//! Catalog item models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product in the catalog with its current stock level
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub cost_price: Decimal,
    pub selling_price: Decimal,
    pub reorder_level: i64,
    /// Running cost basis of the stock on hand
    #[serde(rename = "totalCOGS", default, skip_serializing_if = "Option::is_none")]
    pub total_cogs: Option<Decimal>,
}

impl InventoryItem {
    /// Inventory value used as the turnover denominator.
    ///
    /// Prefers the running cost basis; falls back to `quantity × costPrice`
    /// when it is absent or zero.
    pub fn average_inventory_value(&self) -> Decimal {
        match self.total_cogs {
            Some(cogs) if !cogs.is_zero() => cogs,
            _ => Decimal::from(self.quantity) * self.cost_price,
        }
    }

    pub fn stock_cost_value(&self) -> Decimal {
        Decimal::from(self.quantity) * self.cost_price
    }

    pub fn stock_retail_value(&self) -> Decimal {
        Decimal::from(self.quantity) * self.selling_price
    }

    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_level
    }
}
