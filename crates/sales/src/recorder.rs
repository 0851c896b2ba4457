//! Sales recorder: append a batch and reconcile inventory.
//!
//! Policy: a sale is recorded even when its inventory decrement fails. The
//! failure is returned as a [`StockWarning`]; it neither rolls back the
//! appended record nor stops later entries. This can leave the sales table
//! ahead of the inventory count.

use thiserror::Error;

use stockledger_core::{DomainError, DomainResult};
use stockledger_inventory::{InventoryTable, StockError};

use crate::input::SaleBatch;
use crate::record::{SalesRecord, SalesTable};

/// A per-entry inventory reconciliation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockWarning {
    /// Zero-based position of the entry in the batch.
    pub line: usize,
    pub error: StockError,
}

impl core::fmt::Display for StockWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.error, f)
    }
}

/// Why a whole batch was refused before any table was touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SaleRejection {
    #[error(
        "mismatched lengths: {products} products, {categories} categories, {sales} sales, {quantities} quantities"
    )]
    LengthMismatch {
        products: usize,
        categories: usize,
        sales: usize,
        quantities: usize,
    },

    #[error(transparent)]
    InvalidEntry(#[from] DomainError),
}

/// Outcome of a successfully validated batch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SaleReceipt {
    pub appended: usize,
    pub warnings: Vec<StockWarning>,
}

/// Record every entry of `batch` into `sales` and decrement `inventory`.
///
/// Validation is all-or-nothing: if the four lists differ in length or any
/// amount is negative, an error is returned and neither table is touched.
pub fn record_sale(
    sales: &mut SalesTable,
    inventory: &mut InventoryTable,
    batch: &SaleBatch,
) -> Result<SaleReceipt, SaleRejection> {
    if !batch.lengths_match() {
        return Err(SaleRejection::LengthMismatch {
            products: batch.products.len(),
            categories: batch.categories.len(),
            sales: batch.sales_amounts.len(),
            quantities: batch.quantities.len(),
        });
    }

    // Build every record before touching either table.
    let records = batch
        .products
        .iter()
        .zip(&batch.categories)
        .zip(batch.sales_amounts.iter().zip(&batch.quantities))
        .map(|((product, category), (amount, quantity))| {
            SalesRecord::new(batch.date, product.as_str(), category.as_str(), *amount, *quantity)
        })
        .collect::<DomainResult<Vec<_>>>()?;

    let mut receipt = SaleReceipt::default();
    for (line, record) in records.into_iter().enumerate() {
        let outcome = inventory.decrement(record.product(), record.category(), record.quantity());

        tracing::info!(
            date = %record.date(),
            product = record.product(),
            category = record.category(),
            sales = %record.sales(),
            quantity = record.quantity(),
            "sale recorded"
        );
        sales.append(record);
        receipt.appended += 1;

        if let Err(error) = outcome {
            tracing::warn!(line, %error, "inventory not reconciled for sale");
            receipt.warnings.push(StockWarning { line, error });
        }
    }

    Ok(receipt)
}
