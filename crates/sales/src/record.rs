use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockledger_core::{DomainError, DomainResult, ValueObject};

/// One recorded sale. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesRecord {
    date: NaiveDate,
    product: String,
    category: String,
    sales: Decimal,
    quantity: u64,
}

impl SalesRecord {
    pub fn new(
        date: NaiveDate,
        product: impl Into<String>,
        category: impl Into<String>,
        sales: Decimal,
        quantity: u64,
    ) -> DomainResult<Self> {
        if sales < Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "sales amount cannot be negative (got {sales})"
            )));
        }
        Ok(Self {
            date,
            product: product.into(),
            category: category.into(),
            sales,
            quantity,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn sales(&self) -> Decimal {
        self.sales
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }
}

impl ValueObject for SalesRecord {}

/// Unvalidated wire shape; every decoded record goes through [`SalesRecord::new`].
#[derive(Deserialize)]
struct SalesRecordDraft {
    date: NaiveDate,
    product: String,
    category: String,
    sales: Decimal,
    quantity: u64,
}

impl TryFrom<SalesRecordDraft> for SalesRecord {
    type Error = DomainError;

    fn try_from(draft: SalesRecordDraft) -> DomainResult<Self> {
        Self::new(draft.date, draft.product, draft.category, draft.sales, draft.quantity)
    }
}

impl<'de> Deserialize<'de> for SalesRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        SalesRecordDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

/// Append-only sales table, in recording order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesTable {
    records: Vec<SalesRecord>,
}

impl SalesTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = SalesRecord>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }

    pub fn append(&mut self, record: SalesRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
