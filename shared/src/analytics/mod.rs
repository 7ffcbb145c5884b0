//! Inventory analytics engine
//!
//! Stateless report builders over a snapshot of items, transactions and
//! restocks. Nothing here performs I/O, mutates its inputs, or reads the
//! clock: functions that need "now" take it as an argument.

mod abc;
mod dead_stock;
mod forecast;
mod margin;
mod net_sales;
mod reorder;
mod returns;
mod summary;
mod turnover;

pub use abc::*;
pub use dead_stock::*;
pub use forecast::*;
pub use margin::*;
pub use net_sales::*;
pub use reorder::*;
pub use returns::*;
pub use summary::*;
pub use turnover::*;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::Transaction;

/// Genuine sales across the whole snapshot
pub(crate) fn genuine_sales(transactions: &[Transaction]) -> impl Iterator<Item = &Transaction> {
    transactions.iter().filter(|tx| tx.is_genuine_sale())
}

/// Genuine sales of a single item
pub(crate) fn genuine_sales_of<'a>(
    transactions: &'a [Transaction],
    item_id: &'a str,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    genuine_sales(transactions).filter(move |tx| tx.item_id == item_id)
}

/// `part / whole × 100`, or 0 when `whole` is zero
pub(crate) fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

pub(crate) fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
