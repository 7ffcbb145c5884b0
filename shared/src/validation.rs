//! Validation of provider snapshots
//!
//! The analytics engine assumes the data contract holds; providers run these
//! checks once after loading and reject the snapshot on the first violation.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::error::SnapshotError;
use crate::models::{InventoryItem, Restock, Snapshot, Transaction};

fn invalid(
    record: &'static str,
    id: &str,
    field: &'static str,
    message: &'static str,
) -> SnapshotError {
    SnapshotError::InvalidRecord {
        record,
        id: id.to_string(),
        field,
        message,
    }
}

// ============================================================================
// Record Validations
// ============================================================================

/// Validate a catalog item
pub fn validate_item(item: &InventoryItem) -> Result<(), SnapshotError> {
    const RECORD: &str = "item";
    if item.id.trim().is_empty() {
        return Err(invalid(RECORD, &item.id, "id", "id must not be empty"));
    }
    if item.quantity < 0 {
        return Err(invalid(RECORD, &item.id, "quantity", "quantity cannot be negative"));
    }
    if item.reorder_level < 0 {
        return Err(invalid(RECORD, &item.id, "reorderLevel", "reorder level cannot be negative"));
    }
    if item.cost_price < Decimal::ZERO {
        return Err(invalid(RECORD, &item.id, "costPrice", "cost price cannot be negative"));
    }
    if item.selling_price < Decimal::ZERO {
        return Err(invalid(RECORD, &item.id, "sellingPrice", "selling price cannot be negative"));
    }
    if item.total_cogs.is_some_and(|cogs| cogs < Decimal::ZERO) {
        return Err(invalid(RECORD, &item.id, "totalCOGS", "cost basis cannot be negative"));
    }
    Ok(())
}

/// Validate a stock movement
pub fn validate_transaction(tx: &Transaction) -> Result<(), SnapshotError> {
    const RECORD: &str = "transaction";
    if tx.id.trim().is_empty() {
        return Err(invalid(RECORD, &tx.id, "id", "id must not be empty"));
    }
    if tx.item_id.trim().is_empty() {
        return Err(invalid(RECORD, &tx.id, "itemId", "item id must not be empty"));
    }
    if tx.quantity < 0 {
        return Err(invalid(RECORD, &tx.id, "quantity", "quantity cannot be negative"));
    }
    if tx.total_cost < Decimal::ZERO {
        return Err(invalid(RECORD, &tx.id, "totalCost", "total cost cannot be negative"));
    }
    if tx.total_revenue < Decimal::ZERO {
        return Err(invalid(RECORD, &tx.id, "totalRevenue", "total revenue cannot be negative"));
    }
    Ok(())
}

/// Validate a restock or return record
pub fn validate_restock(restock: &Restock) -> Result<(), SnapshotError> {
    const RECORD: &str = "restock";
    if restock.id.trim().is_empty() {
        return Err(invalid(RECORD, &restock.id, "id", "id must not be empty"));
    }
    if restock.item_id.trim().is_empty() {
        return Err(invalid(RECORD, &restock.id, "itemId", "item id must not be empty"));
    }
    if restock.quantity < 0 {
        return Err(invalid(RECORD, &restock.id, "quantity", "quantity cannot be negative"));
    }
    if restock.total_cost < Decimal::ZERO {
        return Err(invalid(RECORD, &restock.id, "totalCost", "total cost cannot be negative"));
    }
    Ok(())
}

// ============================================================================
// Snapshot Validation
// ============================================================================

/// Validate every record and the uniqueness of item ids.
///
/// Orphaned `itemId` references are allowed.
pub fn validate_snapshot(snapshot: &Snapshot) -> Result<(), SnapshotError> {
    let mut seen = HashSet::with_capacity(snapshot.items.len());
    for item in &snapshot.items {
        validate_item(item)?;
        if !seen.insert(item.id.as_str()) {
            return Err(SnapshotError::DuplicateItemId(item.id.clone()));
        }
    }
    snapshot.transactions.iter().try_for_each(validate_transaction)?;
    snapshot.restocks.iter().try_for_each(validate_restock)?;
    Ok(())
}
