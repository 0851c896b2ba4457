//! Inventory ledger.
//!
//! Keyed lookup and mutation of inventory rows by (Product, Category),
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod ledger;

pub use ledger::{
    InventoryRow, InventoryTable, StockError, UpsertOutcome, restock_warning,
};
