//! Configuration loading and representation.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, then `STOCKLEDGER_*` environment variables. Command-line flags are
//! applied on top by the binary.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_SALES_PATH: &str = "sales_data.csv";
pub const DEFAULT_INVENTORY_PATH: &str = "inventory_data.csv";
pub const ENV_PREFIX: &str = "STOCKLEDGER";

#[derive(Debug, Error)]
#[error("failed to load configuration: {0}")]
pub struct ConfigError(#[from] config::ConfigError);

/// Locations of the two backing files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    pub sales_path: PathBuf,
    pub inventory_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            sales_path: PathBuf::from(DEFAULT_SALES_PATH),
            inventory_path: PathBuf::from(DEFAULT_INVENTORY_PATH),
        }
    }
}

impl StoreConfig {
    /// Load from defaults, the optional file, and the process environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(file, None)
    }

    /// Like [`StoreConfig::load`], but reads environment variables from
    /// `env` instead of the process environment when given.
    pub fn load_with_env(
        file: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("sales_path", DEFAULT_SALES_PATH)?
            .set_default("inventory_path", DEFAULT_INVENTORY_PATH)?;

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path.to_path_buf()).required(true));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).source(env))
            .build()?;

        let cfg: StoreConfig = settings.try_deserialize()?;
        tracing::debug!(
            sales = %cfg.sales_path.display(),
            inventory = %cfg.inventory_path.display(),
            "configuration loaded"
        );
        Ok(cfg)
    }
}
