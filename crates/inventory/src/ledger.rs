use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockledger_core::{DomainError, DomainResult, StockKey};

/// One inventory row: stock on hand for a (Product, Category) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRow {
    #[serde(flatten)]
    key: StockKey,
    quantity: u64,
}

impl InventoryRow {
    pub fn new(product: impl Into<String>, category: impl Into<String>, quantity: u64) -> Self {
        Self {
            key: StockKey::new(product, category),
            quantity,
        }
    }

    pub fn key(&self) -> &StockKey {
        &self.key
    }

    pub fn product(&self) -> &str {
        &self.key.product
    }

    pub fn category(&self) -> &str {
        &self.key.category
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }
}

/// Why a stock decrement was refused.
///
/// The `Display` text is what the dashboard shows to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockError {
    #[error("Product {product} or category {category} not available in inventory!")]
    NotFound { product: String, category: String },

    #[error("Insufficient quantity in inventory for product {product} in category {category}!")]
    InsufficientStock {
        product: String,
        category: String,
        available: u64,
        requested: u64,
    },
}

/// Result of an upsert: whether a row was appended or overwritten.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated { previous: u64 },
}

/// Inventory table: rows in insertion order plus a key index.
///
/// Invariant: no two rows share a (Product, Category) key, and `index`
/// maps every key to its row position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryTable {
    rows: Vec<InventoryRow>,
    index: HashMap<StockKey, usize>,
}

impl InventoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from persisted rows, rejecting duplicate keys.
    pub fn from_rows(rows: impl IntoIterator<Item = InventoryRow>) -> DomainResult<Self> {
        let mut table = Self::new();
        for row in rows {
            if table.index.contains_key(row.key()) {
                return Err(DomainError::invariant(format!(
                    "duplicate inventory row for {}",
                    row.key
                )));
            }
            table.index.insert(row.key.clone(), table.rows.len());
            table.rows.push(row);
        }
        Ok(table)
    }

    pub fn rows(&self) -> &[InventoryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the unique row matching (product, category), if any.
    pub fn find_row(&self, product: &str, category: &str) -> Option<usize> {
        self.index.get(&StockKey::new(product, category)).copied()
    }

    pub fn get(&self, product: &str, category: &str) -> Option<&InventoryRow> {
        self.find_row(product, category).map(|i| &self.rows[i])
    }

    /// Subtract `amount` from the matching row.
    ///
    /// Returns the remaining quantity. On `InsufficientStock` the row is left
    /// unchanged; partial fulfilment is never performed.
    pub fn decrement(&mut self, product: &str, category: &str, amount: u64) -> Result<u64, StockError> {
        let Some(i) = self.find_row(product, category) else {
            return Err(StockError::NotFound {
                product: product.to_string(),
                category: category.to_string(),
            });
        };

        let row = &mut self.rows[i];
        if row.quantity < amount {
            return Err(StockError::InsufficientStock {
                product: product.to_string(),
                category: category.to_string(),
                available: row.quantity,
                requested: amount,
            });
        }

        row.quantity -= amount;
        tracing::debug!(product, category, amount, remaining = row.quantity, "inventory decremented");
        Ok(row.quantity)
    }

    /// Overwrite the quantity of an existing row, or append a new one.
    pub fn upsert(&mut self, product: &str, category: &str, quantity: u64) -> UpsertOutcome {
        if let Some(i) = self.find_row(product, category) {
            let row = &mut self.rows[i];
            let previous = row.quantity;
            row.quantity = quantity;
            return UpsertOutcome::Updated { previous };
        }

        let row = InventoryRow::new(product, category, quantity);
        self.index.insert(row.key.clone(), self.rows.len());
        self.rows.push(row);
        UpsertOutcome::Inserted
    }

    /// Product names of rows whose quantity is exactly zero, in table order.
    pub fn out_of_stock(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| row.is_out_of_stock())
            .map(|row| row.product())
            .collect()
    }
}

/// Restock warning for the given out-of-stock products (`None` if empty).
pub fn restock_warning(products: &[&str]) -> Option<String> {
    if products.is_empty() {
        return None;
    }
    Some(format!(
        "Product/s {} not in stock. Please restock!",
        products.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn table(rows: &[(&str, &str, u64)]) -> InventoryTable {
        InventoryTable::from_rows(rows.iter().map(|(p, c, q)| InventoryRow::new(*p, *c, *q))).unwrap()
    }

    #[test]
    fn find_row_requires_both_product_and_category() {
        let t = table(&[("A", "X", 1), ("B", "Y", 2)]);
        assert_eq!(t.find_row("A", "X"), Some(0));
        assert_eq!(t.find_row("B", "Y"), Some(1));
        // Product and category both exist, but not as a pair.
        assert_eq!(t.find_row("A", "Y"), None);
    }

    #[test]
    fn from_rows_rejects_duplicate_keys() {
        let err = InventoryTable::from_rows(vec![
            InventoryRow::new("A", "X", 1),
            InventoryRow::new("A", "X", 5),
        ])
        .unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) if msg.contains("duplicate inventory row") => {}
            other => panic!("Expected InvariantViolation, got {other:?}"),
        }
    }

    #[test]
    fn decrement_subtracts_when_stock_suffices() {
        let mut t = table(&[("A", "X", 5)]);
        assert_eq!(t.decrement("A", "X", 5), Ok(0));
        assert_eq!(t.get("A", "X").unwrap().quantity(), 0);
    }

    #[test]
    fn decrement_leaves_quantity_unchanged_when_insufficient() {
        let mut t = table(&[("A", "X", 1)]);
        let err = t.decrement("A", "X", 2).unwrap_err();
        assert_eq!(
            err,
            StockError::InsufficientStock {
                product: "A".into(),
                category: "X".into(),
                available: 1,
                requested: 2,
            }
        );
        assert_eq!(t.get("A", "X").unwrap().quantity(), 1);
        assert_eq!(
            err.to_string(),
            "Insufficient quantity in inventory for product A in category X!"
        );
    }

    #[test]
    fn decrement_unknown_key_is_not_found() {
        let mut t = table(&[("A", "X", 1)]);
        let err = t.decrement("A", "Z", 1).unwrap_err();
        assert!(matches!(err, StockError::NotFound { .. }));
        assert_eq!(err.to_string(), "Product A or category Z not available in inventory!");
    }

    #[test]
    fn upsert_overwrites_rather_than_adds() {
        let mut t = table(&[("A", "X", 4)]);
        assert_eq!(t.upsert("A", "X", 10), UpsertOutcome::Updated { previous: 4 });
        assert_eq!(t.get("A", "X").unwrap().quantity(), 10);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn upsert_appends_new_key_at_end() {
        let mut t = table(&[("A", "X", 4)]);
        assert_eq!(t.upsert("B", "X", 3), UpsertOutcome::Inserted);
        assert_eq!(t.find_row("B", "X"), Some(1));
        assert_eq!(t.rows()[1].product(), "B");
    }

    #[test]
    fn out_of_stock_lists_zero_rows_in_order() {
        let t = table(&[("A", "X", 0), ("B", "X", 5), ("C", "Y", 0)]);
        assert_eq!(t.out_of_stock(), vec!["A", "C"]);
    }

    #[test]
    fn restock_warning_formats_product_list() {
        assert_eq!(restock_warning(&[]), None);
        assert_eq!(
            restock_warning(&["A", "C"]).as_deref(),
            Some("Product/s A, C not in stock. Please restock!")
        );
    }

    fn key_strategy() -> impl Strategy<Value = (String, String)> {
        ("[a-c]{1,2}", "[x-z]{1}")
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: upsert then find_row yields the written quantity, and
        /// repeated upserts never duplicate a key.
        #[test]
        fn upsert_keeps_keys_unique(
            ops in prop::collection::vec((key_strategy(), 0u64..1_000), 1..40)
        ) {
            let mut t = InventoryTable::new();
            for ((product, category), quantity) in &ops {
                t.upsert(product, category, *quantity);
                let i = t.find_row(product, category).unwrap();
                prop_assert_eq!(t.rows()[i].quantity(), *quantity);
            }

            let mut keys: Vec<_> = t.rows().iter().map(|r| r.key().clone()).collect();
            let total = keys.len();
            keys.sort();
            keys.dedup();
            prop_assert_eq!(keys.len(), total);
        }

        /// Property: decrement either subtracts exactly `amount` or changes nothing.
        #[test]
        fn decrement_is_exact_or_noop(start in 0u64..100, amount in 0u64..200) {
            let mut t = InventoryTable::new();
            t.upsert("A", "X", start);

            match t.decrement("A", "X", amount) {
                Ok(remaining) => {
                    prop_assert!(amount <= start);
                    prop_assert_eq!(remaining, start - amount);
                }
                Err(StockError::InsufficientStock { available, requested, .. }) => {
                    prop_assert!(amount > start);
                    prop_assert_eq!(available, start);
                    prop_assert_eq!(requested, amount);
                }
                Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
            }

            let expected = if amount <= start { start - amount } else { start };
            prop_assert_eq!(t.get("A", "X").unwrap().quantity(), expected);
        }
    }
}
