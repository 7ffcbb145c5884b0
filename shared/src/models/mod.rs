//! Domain models for the Stockroom inventory platform

mod item;
mod restock;
mod snapshot;
mod transaction;

pub use item::*;
pub use restock::*;
pub use snapshot::*;
pub use transaction::*;
