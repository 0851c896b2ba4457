//! One dashboard interaction cycle.
//!
//! ```text
//! Action
//!   ↓
//! 1. Load sales and inventory tables from disk
//!   ↓
//! 2. Apply the action (record sale / upsert inventory / report / view)
//!   ↓
//! 3. Persist the tables the action changed (whole-file overwrite)
//!   ↓
//! 4. Return a view model for the presentation layer
//! ```
//!
//! No state survives between calls; every call reloads from disk. Two
//! sessions writing the same files concurrently is last-write-wins.

use serde::{Deserialize, Serialize};

use stockledger_core::DomainResult;
use stockledger_inventory::{InventoryRow, UpsertOutcome, restock_warning};
use stockledger_reporting::{ChartBar, ProductSummary, aggregate_by_product, sorted_totals_for_chart};
use stockledger_sales::{SaleBatch, SaleRejection, SalesRecord, SalesTable, record_sale};

use crate::dataset_store::{DatasetStore, StorageError};

const LENGTH_MISMATCH_NOTICE: &str =
    "Number of products, categories, sales, and quantities must be the same!";

/// A user-requested action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    View,
    RecordSale(SaleBatch),
    UpsertInventory {
        product: String,
        category: String,
        quantity: u64,
    },
    Report,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::RecordSale(_) => "record_sale",
            Action::UpsertInventory { .. } => "upsert_inventory",
            Action::Report => "report",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A user-visible message produced by an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Chart data (ascending) and summary table (descending).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportView {
    pub chart: Vec<ChartBar>,
    pub summary: Vec<ProductSummary>,
}

/// Everything the presentation layer needs after one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    pub sales: Vec<SalesRecord>,
    pub inventory: Vec<InventoryRow>,
    pub notices: Vec<Notice>,
    pub restock_warning: Option<String>,
    pub report: Option<ReportView>,
}

impl DashboardView {
    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(|n| n.level == NoticeLevel::Error)
    }
}

/// Request/response handler over a [`DatasetStore`].
#[derive(Debug, Clone)]
pub struct DashboardSession {
    store: DatasetStore,
}

impl DashboardSession {
    pub fn new(store: DatasetStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    /// Run one load → apply → persist cycle.
    ///
    /// Only storage failures are returned as errors; validation failures and
    /// stock warnings are reported through [`DashboardView::notices`].
    #[tracing::instrument(skip(self, action), fields(action = action.name()))]
    pub fn handle(&self, action: Action) -> Result<DashboardView, StorageError> {
        let mut sales = self.store.load_sales()?;
        let mut inventory = self.store.load_inventory()?;
        let mut notices = Vec::new();
        let mut report = None;

        match action {
            Action::View => {}
            Action::RecordSale(batch) => match record_sale(&mut sales, &mut inventory, &batch) {
                Ok(receipt) => {
                    notices.push(Notice::success("Sales data added successfully!"));
                    notices.extend(receipt.warnings.iter().map(|w| Notice::warning(w.to_string())));
                    self.store.save_sales(&sales)?;
                    self.store.save_inventory(&inventory)?;
                    tracing::info!(
                        appended = receipt.appended,
                        warnings = receipt.warnings.len(),
                        "sale batch persisted"
                    );
                }
                Err(err) => {
                    tracing::warn!(%err, "sale batch rejected");
                    notices.push(Notice::error(rejection_message(&err)));
                }
            },
            Action::UpsertInventory {
                product,
                category,
                quantity,
            } => {
                let message = match inventory.upsert(&product, &category, quantity) {
                    UpsertOutcome::Inserted => "Inventory data added successfully!",
                    UpsertOutcome::Updated { .. } => "Inventory quantity updated successfully!",
                };
                self.store.save_inventory(&inventory)?;
                tracing::info!(%product, %category, quantity, "inventory row written");
                notices.push(Notice::success(message));
            }
            Action::Report => match build_report(&sales) {
                Ok(view) => report = Some(view),
                Err(err) => {
                    tracing::warn!(%err, "report not computable");
                    notices.push(Notice::error(err.message()));
                }
            },
        }

        Ok(DashboardView {
            restock_warning: restock_warning(&inventory.out_of_stock()),
            sales: sales.records().to_vec(),
            inventory: inventory.rows().to_vec(),
            notices,
            report,
        })
    }
}

fn build_report(sales: &SalesTable) -> DomainResult<ReportView> {
    Ok(ReportView {
        chart: sorted_totals_for_chart(sales)?,
        summary: aggregate_by_product(sales)?,
    })
}

fn rejection_message(err: &SaleRejection) -> String {
    match err {
        SaleRejection::LengthMismatch { .. } => LENGTH_MISMATCH_NOTICE.to_string(),
        SaleRejection::InvalidEntry(inner) => inner.to_string(),
    }
}
