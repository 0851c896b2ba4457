//! CSV-backed dataset store.
//!
//! Each table lives in its own comma-separated file with a header row.
//! Loads read the whole file; saves overwrite the whole file. A missing
//! file loads as an empty table.
//!
//! Sales amounts are written as plain decimal text. On load, exponent
//! notation such as `1e-05` is accepted too, since spreadsheet and dataframe
//! tools emit it for very small or very large floats.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockledger_core::DomainResult;
use stockledger_inventory::{InventoryRow, InventoryTable};
use stockledger_sales::{SalesRecord, SalesTable};

use crate::config::StoreConfig;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("csv error on {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("unexpected columns in {} (expected {expected:?}, found {found:?})", .path.display())]
    Schema {
        path: PathBuf,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("invalid row at {}:{line}: {message}", .path.display())]
    InvalidRow {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

/// A table that can be persisted as CSV.
pub trait Dataset: Sized {
    /// Header row, in column order.
    const COLUMNS: &'static [&'static str];

    /// Serde shape of one CSV record.
    type Row: Serialize + DeserializeOwned;

    /// Domain value produced from one row.
    type Item;

    fn from_row(row: Self::Row) -> DomainResult<Self::Item>;

    fn from_items(items: Vec<Self::Item>) -> DomainResult<Self>;

    fn to_rows(&self) -> Vec<Self::Row>;
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SalesCsvRow {
    date: NaiveDate,
    product: String,
    category: String,
    #[serde(with = "decimal_text")]
    sales: Decimal,
    quantity: u64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InventoryCsvRow {
    product: String,
    category: String,
    quantity: u64,
}

mod decimal_text {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::str::serialize(value, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        let text = text.trim();
        Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .map_err(|_| serde::de::Error::custom(format!("invalid decimal amount: {text:?}")))
    }
}

impl Dataset for SalesTable {
    const COLUMNS: &'static [&'static str] = &["Date", "Product", "Category", "Sales", "Quantity"];

    type Row = SalesCsvRow;
    type Item = SalesRecord;

    fn from_row(row: SalesCsvRow) -> DomainResult<SalesRecord> {
        SalesRecord::new(row.date, row.product, row.category, row.sales, row.quantity)
    }

    fn from_items(items: Vec<SalesRecord>) -> DomainResult<Self> {
        Ok(SalesTable::from_records(items))
    }

    fn to_rows(&self) -> Vec<SalesCsvRow> {
        self.records()
            .iter()
            .map(|r| SalesCsvRow {
                date: r.date(),
                product: r.product().to_string(),
                category: r.category().to_string(),
                sales: r.sales(),
                quantity: r.quantity(),
            })
            .collect()
    }
}

impl Dataset for InventoryTable {
    const COLUMNS: &'static [&'static str] = &["Product", "Category", "Quantity"];

    type Row = InventoryCsvRow;
    type Item = InventoryRow;

    fn from_row(row: InventoryCsvRow) -> DomainResult<InventoryRow> {
        Ok(InventoryRow::new(row.product, row.category, row.quantity))
    }

    fn from_items(items: Vec<InventoryRow>) -> DomainResult<Self> {
        InventoryTable::from_rows(items)
    }

    fn to_rows(&self) -> Vec<InventoryCsvRow> {
        self.rows()
            .iter()
            .map(|r| InventoryCsvRow {
                product: r.product().to_string(),
                category: r.category().to_string(),
                quantity: r.quantity(),
            })
            .collect()
    }
}

/// Read a whole table from `source`. A missing file yields an empty table.
pub fn load<D: Dataset>(source: &Path) -> Result<D, StorageError> {
    let file = match File::open(source) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %source.display(), "dataset file absent; starting empty");
            return D::from_items(Vec::new()).map_err(|e| StorageError::InvalidRow {
                path: source.to_path_buf(),
                line: 0,
                message: e.message().to_string(),
            });
        }
        Err(e) => {
            return Err(StorageError::Io {
                path: source.to_path_buf(),
                source: e,
            });
        }
    };

    let csv_err = |e: csv::Error| StorageError::Csv {
        path: source.to_path_buf(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = reader.headers().map_err(csv_err)?;
    if !headers.iter().eq(D::COLUMNS.iter().copied()) {
        return Err(StorageError::Schema {
            path: source.to_path_buf(),
            expected: D::COLUMNS.iter().map(|c| c.to_string()).collect(),
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut items = Vec::new();
    for (i, row) in reader.deserialize::<D::Row>().enumerate() {
        // Header is line 1.
        let line = i + 2;
        let invalid = |message: String| StorageError::InvalidRow {
            path: source.to_path_buf(),
            line,
            message,
        };
        let row = row.map_err(|e| invalid(e.to_string()))?;
        items.push(D::from_row(row).map_err(|e| invalid(e.message().to_string()))?);
    }

    let count = items.len();
    let table = D::from_items(items).map_err(|e| StorageError::InvalidRow {
        path: source.to_path_buf(),
        line: 0,
        message: e.message().to_string(),
    })?;
    tracing::debug!(path = %source.display(), rows = count, "dataset loaded");
    Ok(table)
}

/// Overwrite `destination` with the header row and every row of `table`.
pub fn save<D: Dataset>(table: &D, destination: &Path) -> Result<(), StorageError> {
    let csv_err = |e: csv::Error| StorageError::Csv {
        path: destination.to_path_buf(),
        source: e,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(destination)
        .map_err(csv_err)?;

    writer.write_record(D::COLUMNS).map_err(csv_err)?;
    let rows = table.to_rows();
    for row in &rows {
        writer.serialize(row).map_err(csv_err)?;
    }
    writer.flush().map_err(|e| StorageError::Io {
        path: destination.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %destination.display(), rows = rows.len(), "dataset saved");
    Ok(())
}

/// The two backing files of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetStore {
    sales_path: PathBuf,
    inventory_path: PathBuf,
}

impl DatasetStore {
    pub fn new(sales_path: impl Into<PathBuf>, inventory_path: impl Into<PathBuf>) -> Self {
        Self {
            sales_path: sales_path.into(),
            inventory_path: inventory_path.into(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(&config.sales_path, &config.inventory_path)
    }

    pub fn sales_path(&self) -> &Path {
        &self.sales_path
    }

    pub fn inventory_path(&self) -> &Path {
        &self.inventory_path
    }

    pub fn load_sales(&self) -> Result<SalesTable, StorageError> {
        load(&self.sales_path)
    }

    pub fn load_inventory(&self) -> Result<InventoryTable, StorageError> {
        load(&self.inventory_path)
    }

    pub fn save_sales(&self, table: &SalesTable) -> Result<(), StorageError> {
        save(table, &self.sales_path)
    }

    pub fn save_inventory(&self, table: &InventoryTable) -> Result<(), StorageError> {
        save(table, &self.inventory_path)
    }
}
