//! Sales reporting: per-product aggregates over the sales table.
//!
//! Reports are derived views; they are recomputed from the table on every
//! request and never persisted.

pub mod summary;

pub use summary::{ChartBar, ProductSummary, aggregate_by_product, sorted_totals_for_chart};
