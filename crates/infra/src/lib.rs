//! Infrastructure layer: CSV persistence, configuration, and the
//! per-interaction session handler.

pub mod config;
pub mod dataset_store;
pub mod session;

pub use config::{ConfigError, StoreConfig};
pub use dataset_store::{Dataset, DatasetStore, StorageError, load, save};
pub use session::{Action, DashboardSession, DashboardView, Notice, NoticeLevel, ReportView};
