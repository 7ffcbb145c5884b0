//! Snapshot handed from a data provider to the analytics engine

use serde::{Deserialize, Serialize};

use super::{InventoryItem, Restock, Transaction};

/// Point-in-time copy of the catalog and its movement history
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub items: Vec<InventoryItem>,
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub restocks: Vec<Restock>,
}

impl Snapshot {
    pub fn new(
        items: Vec<InventoryItem>,
        transactions: Vec<Transaction>,
        restocks: Vec<Restock>,
    ) -> Self {
        Self {
            items,
            transactions,
            restocks,
        }
    }

    pub fn item(&self, item_id: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == item_id)
    }
}
