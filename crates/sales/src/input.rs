//! Sale batch input: four parallel lists sharing one date.

use core::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockledger_core::{DomainError, DomainResult};

/// A batch of sales entered together.
///
/// Entry `i` is `(products[i], categories[i], sales_amounts[i], quantities[i])`.
/// The lists are not required to have equal length here; `record_sale`
/// rejects a mismatch before mutating anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleBatch {
    pub date: NaiveDate,
    pub products: Vec<String>,
    pub categories: Vec<String>,
    pub sales_amounts: Vec<Decimal>,
    pub quantities: Vec<u64>,
}

impl SaleBatch {
    /// Build a batch from comma-separated free text, one text per column.
    ///
    /// Items are trimmed. An empty text yields a single empty item, so a
    /// blank field still counts toward the length check.
    pub fn parse(
        date: NaiveDate,
        products: &str,
        categories: &str,
        sales_amounts: &str,
        quantities: &str,
    ) -> DomainResult<Self> {
        Ok(Self {
            date,
            products: split_list(products).map(str::to_string).collect(),
            categories: split_list(categories).map(str::to_string).collect(),
            sales_amounts: parse_list(sales_amounts, "sales amount")?,
            quantities: parse_list(quantities, "quantity")?,
        })
    }

    pub fn lengths_match(&self) -> bool {
        let n = self.products.len();
        self.categories.len() == n && self.sales_amounts.len() == n && self.quantities.len() == n
    }
}

fn split_list(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim)
}

fn parse_list<T: FromStr>(text: &str, what: &str) -> DomainResult<Vec<T>> {
    split_list(text)
        .map(|item| {
            item.parse::<T>()
                .map_err(|_| DomainError::validation(format!("invalid {what}: {item:?}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn parse_trims_items() {
        let batch = SaleBatch::parse(test_date(), " A , B", "X,X ", "10.0, 5", "2 ,3").unwrap();
        assert_eq!(batch.products, vec!["A", "B"]);
        assert_eq!(batch.categories, vec!["X", "X"]);
        assert_eq!(batch.sales_amounts, vec![Decimal::new(100, 1), Decimal::new(5, 0)]);
        assert_eq!(batch.quantities, vec![2, 3]);
        assert!(batch.lengths_match());
    }

    #[test]
    fn parse_keeps_mismatched_lengths_for_the_recorder() {
        let batch = SaleBatch::parse(test_date(), "A, B", "X", "1, 2", "1, 1").unwrap();
        assert!(!batch.lengths_match());
    }

    #[test]
    fn empty_text_is_one_empty_item() {
        let batch = SaleBatch::parse(test_date(), "", "", "1", "1").unwrap();
        assert_eq!(batch.products, vec![String::new()]);
        assert!(batch.lengths_match());
    }

    #[test]
    fn unparsable_quantity_is_a_validation_error() {
        let err = SaleBatch::parse(test_date(), "A", "X", "1.0", "two").unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("invalid quantity") => {}
            other => panic!("Expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn negative_quantity_is_a_validation_error() {
        assert!(SaleBatch::parse(test_date(), "A", "X", "1.0", "-1").is_err());
    }

    #[test]
    fn unparsable_amount_is_a_validation_error() {
        let err = SaleBatch::parse(test_date(), "A", "X", "ten", "1").unwrap_err();
        assert_eq!(err, DomainError::validation("invalid sales amount: \"ten\""));
    }
}
