//! Sales recording.
//!
//! This crate contains the append-only sales table and the recorder that
//! appends a batch of sales while driving inventory decrements, implemented
//! purely as deterministic domain logic (no IO, no storage).

pub mod input;
pub mod record;
pub mod recorder;

pub use input::SaleBatch;
pub use record::{SalesRecord, SalesTable};
pub use recorder::{SaleReceipt, SaleRejection, StockWarning, record_sale};
