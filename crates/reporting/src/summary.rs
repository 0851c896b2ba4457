use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockledger_core::{DomainError, DomainResult};
use stockledger_sales::SalesTable;

/// Totals for one product across all recorded sales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub product: String,
    pub total_sales: Decimal,
    pub total_quantity: u64,
}

/// One bar of the sales-by-product chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartBar {
    pub product: String,
    pub total_sales: Decimal,
}

/// Group by product, summing sales and quantity. Result is keyed in product
/// name order, which is what makes the later stable sorts break ties by name.
///
/// A total that does not fit its type is an error rather than a wrapped or
/// saturated number.
fn totals_by_product(sales: &SalesTable) -> DomainResult<Vec<ProductSummary>> {
    let mut groups: BTreeMap<&str, (Decimal, u64)> = BTreeMap::new();
    for record in sales.records() {
        let product = record.product();
        let (total_sales, total_quantity) = groups.entry(product).or_default();
        *total_sales = total_sales
            .checked_add(record.sales())
            .ok_or_else(|| overflow("sales", product))?;
        *total_quantity = total_quantity
            .checked_add(record.quantity())
            .ok_or_else(|| overflow("quantity", product))?;
    }

    Ok(groups
        .into_iter()
        .map(|(product, (total_sales, total_quantity))| ProductSummary {
            product: product.to_string(),
            total_sales,
            total_quantity,
        })
        .collect())
}

fn overflow(what: &str, product: &str) -> DomainError {
    DomainError::invariant(format!("total {what} for product {product} is too large to report"))
}

/// Per-product totals ordered by total sales, highest first.
pub fn aggregate_by_product(sales: &SalesTable) -> DomainResult<Vec<ProductSummary>> {
    let mut summaries = totals_by_product(sales)?;
    summaries.sort_by(|a, b| b.total_sales.cmp(&a.total_sales));
    Ok(summaries)
}

/// Per-product sales totals ordered lowest first, for a left-to-right
/// increasing bar chart.
pub fn sorted_totals_for_chart(sales: &SalesTable) -> DomainResult<Vec<ChartBar>> {
    let mut bars: Vec<ChartBar> = totals_by_product(sales)?
        .into_iter()
        .map(|s| ChartBar {
            product: s.product,
            total_sales: s.total_sales,
        })
        .collect();
    bars.sort_by(|a, b| a.total_sales.cmp(&b.total_sales));
    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use stockledger_sales::SalesRecord;

    fn table(rows: &[(&str, i64, u64)]) -> SalesTable {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        SalesTable::from_records(
            rows.iter()
                .map(|(p, s, q)| SalesRecord::new(date, *p, "X", Decimal::from(*s), *q).unwrap()),
        )
    }

    fn summary(product: &str, total_sales: i64, total_quantity: u64) -> ProductSummary {
        ProductSummary {
            product: product.to_string(),
            total_sales: Decimal::from(total_sales),
            total_quantity,
        }
    }

    #[test]
    fn aggregate_sums_per_product_descending() {
        let sales = table(&[("A", 10, 1), ("B", 5, 2), ("A", 3, 1)]);
        assert_eq!(
            aggregate_by_product(&sales).unwrap(),
            vec![summary("A", 13, 2), summary("B", 5, 2)]
        );
    }

    #[test]
    fn chart_totals_are_ascending() {
        let sales = table(&[("A", 10, 1), ("B", 5, 2), ("A", 3, 1), ("C", 20, 1)]);
        let products: Vec<_> = sorted_totals_for_chart(&sales)
            .unwrap()
            .into_iter()
            .map(|b| b.product)
            .collect();
        assert_eq!(products, vec!["B", "A", "C"]);
    }

    #[test]
    fn ties_break_by_product_name() {
        let sales = table(&[("B", 5, 1), ("A", 5, 1)]);
        let desc: Vec<_> = aggregate_by_product(&sales)
            .unwrap()
            .into_iter()
            .map(|s| s.product)
            .collect();
        let asc: Vec<_> = sorted_totals_for_chart(&sales)
            .unwrap()
            .into_iter()
            .map(|b| b.product)
            .collect();
        assert_eq!(desc, vec!["A", "B"]);
        assert_eq!(asc, vec!["A", "B"]);
    }

    #[test]
    fn decimal_amounts_sum_exactly() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let sales = SalesTable::from_records(vec![
            SalesRecord::new(date, "A", "X", Decimal::new(1, 1), 1).unwrap(),
            SalesRecord::new(date, "A", "X", Decimal::new(2, 1), 1).unwrap(),
        ]);
        assert_eq!(aggregate_by_product(&sales).unwrap()[0].total_sales, Decimal::new(3, 1));
    }

    #[test]
    fn empty_table_yields_empty_reports() {
        let sales = SalesTable::new();
        assert!(aggregate_by_product(&sales).unwrap().is_empty());
        assert!(sorted_totals_for_chart(&sales).unwrap().is_empty());
    }

    #[test]
    fn quantity_total_overflow_is_an_error() {
        let sales = table(&[("A", 1, u64::MAX), ("A", 1, 1)]);
        match aggregate_by_product(&sales).unwrap_err() {
            DomainError::InvariantViolation(msg) => {
                assert_eq!(msg, "total quantity for product A is too large to report")
            }
            other => panic!("Expected InvariantViolation, got {other:?}"),
        }
    }

    #[test]
    fn sales_total_overflow_is_an_error() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let sales = SalesTable::from_records(vec![
            SalesRecord::new(date, "A", "X", Decimal::MAX, 1).unwrap(),
            SalesRecord::new(date, "A", "X", Decimal::ONE, 1).unwrap(),
        ]);
        assert!(matches!(
            sorted_totals_for_chart(&sales),
            Err(DomainError::InvariantViolation(_))
        ));
    }

    #[test]
    fn large_totals_in_separate_products_do_not_overflow() {
        let sales = table(&[("A", 1, u64::MAX), ("B", 1, u64::MAX)]);
        let summaries = aggregate_by_product(&sales).unwrap();
        assert!(summaries.iter().all(|s| s.total_quantity == u64::MAX));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: grouping preserves the grand totals, and the two orderings
        /// hold the same products in opposite sales order.
        #[test]
        fn reports_preserve_totals(
            rows in prop::collection::vec(("[a-d]", 0i64..1_000, 0u64..50), 0..30)
        ) {
            let borrowed: Vec<(&str, i64, u64)> =
                rows.iter().map(|(p, s, q)| (p.as_str(), *s, *q)).collect();
            let sales = table(&borrowed);

            let summaries = aggregate_by_product(&sales).unwrap();
            let bars = sorted_totals_for_chart(&sales).unwrap();

            let grand_sales: Decimal = rows.iter().map(|(_, s, _)| Decimal::from(*s)).sum();
            let grand_qty: u64 = rows.iter().map(|(_, _, q)| *q).sum();
            prop_assert_eq!(summaries.iter().map(|s| s.total_sales).sum::<Decimal>(), grand_sales);
            prop_assert_eq!(summaries.iter().map(|s| s.total_quantity).sum::<u64>(), grand_qty);

            prop_assert!(summaries.windows(2).all(|w| w[0].total_sales >= w[1].total_sales));
            prop_assert!(bars.windows(2).all(|w| w[0].total_sales <= w[1].total_sales));
            prop_assert_eq!(summaries.len(), bars.len());
        }
    }
}
