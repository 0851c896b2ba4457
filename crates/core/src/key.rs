//! Inventory key: the (Product, Category) pair.

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// Composite key identifying one inventory row.
///
/// Text is compared exactly; no case folding or trimming happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StockKey {
    pub product: String,
    pub category: String,
}

impl StockKey {
    pub fn new(product: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            category: category.into(),
        }
    }

    pub fn matches(&self, product: &str, category: &str) -> bool {
        self.product == product && self.category == category
    }
}

impl ValueObject for StockKey {}

impl core::fmt::Display for StockKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.product, self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_compare_by_both_parts() {
        let a = StockKey::new("Apples", "Fruit");
        assert_eq!(a, StockKey::new("Apples", "Fruit"));
        assert_ne!(a, StockKey::new("Apples", "Produce"));
        assert_ne!(a, StockKey::new("apples", "Fruit"));
    }

    #[test]
    fn matches_is_exact() {
        let key = StockKey::new("Apples", "Fruit");
        assert!(key.matches("Apples", "Fruit"));
        assert!(!key.matches("Apples ", "Fruit"));
    }

    #[test]
    fn display_shows_product_then_category() {
        assert_eq!(StockKey::new("Wheat", "Grain").to_string(), "Wheat (Grain)");
    }
}
