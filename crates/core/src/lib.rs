//! `stockledger-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the ledger,
//! recorder and reporting crates (no infrastructure concerns).

pub mod error;
pub mod key;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use key::StockKey;
pub use value_object::ValueObject;
