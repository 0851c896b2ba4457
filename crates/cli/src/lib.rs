//! `stockledger` — terminal dashboard for sales and inventory.
//!
//! Every invocation is one interaction cycle: load both CSV files, apply
//! the requested action, save what changed, print the dashboard.
//!
//! # Usage
//!
//! ```text
//! stockledger stock --product Wheat --category Grain --quantity 40
//! stockledger sell --products "Wheat, Rice" --categories "Grain, Grain" --sales "120.0, 80.5" --quantities "4, 2"
//! stockledger report
//! stockledger --format json show
//! ```

pub mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};

use stockledger_infra::{Action, DashboardSession, DatasetStore, StoreConfig};
use stockledger_sales::SaleBatch;

#[derive(Parser, Debug)]
#[command(name = "stockledger", about = "Sales and inventory management dashboard")]
pub struct Cli {
    /// Path to a TOML config file (sales_path, inventory_path).
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Sales CSV file (overrides config).
    #[arg(long, value_name = "PATH", global = true)]
    pub sales_file: Option<PathBuf>,

    /// Inventory CSV file (overrides config).
    #[arg(long, value_name = "PATH", global = true)]
    pub inventory_file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show sales and inventory (default).
    Show,

    /// Record one or more sales and take them out of inventory.
    Sell {
        /// Sale date (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Products, separated by commas.
        #[arg(long)]
        products: String,

        /// Categories, separated by commas.
        #[arg(long)]
        categories: String,

        /// Sales amounts, separated by commas.
        #[arg(long)]
        sales: String,

        /// Quantities sold, separated by commas.
        #[arg(long)]
        quantities: String,
    },

    /// Add an inventory row or overwrite its quantity.
    Stock {
        #[arg(long)]
        product: String,

        #[arg(long, default_value = "")]
        category: String,

        #[arg(long)]
        quantity: u64,
    },

    /// Sales-by-product chart and totals table.
    Report,
}

impl Cli {
    /// Resolve file locations: config file and environment, then flags.
    pub fn store_config(&self) -> Result<StoreConfig> {
        let mut config = StoreConfig::load(self.config.as_deref()).context("loading configuration")?;
        if let Some(path) = &self.sales_file {
            config.sales_path = path.clone();
        }
        if let Some(path) = &self.inventory_file {
            config.inventory_path = path.clone();
        }
        Ok(config)
    }
}

fn action_for(command: Command) -> Result<Action> {
    Ok(match command {
        Command::Show => Action::View,
        Command::Sell {
            date,
            products,
            categories,
            sales,
            quantities,
        } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let batch = SaleBatch::parse(date, &products, &categories, &sales, &quantities)
                .context("invalid sale input")?;
            Action::RecordSale(batch)
        }
        Command::Stock {
            product,
            category,
            quantity,
        } => Action::UpsertInventory {
            product,
            category,
            quantity,
        },
        Command::Report => Action::Report,
    })
}

/// Run one interaction cycle and print the dashboard.
///
/// Returns `false` when the action was rejected (an error notice was shown).
pub fn run(cli: Cli) -> Result<bool> {
    let config = cli.store_config()?;
    let session = DashboardSession::new(DatasetStore::from_config(&config));

    let action = action_for(cli.command.clone().unwrap_or(Command::Show))?;
    tracing::debug!(action = action.name(), "dispatching");

    let view = session
        .handle(action)
        .context("reading or writing the dashboard data files")?;

    match cli.format {
        OutputFormat::Text => print!("{}", render::dashboard(&view)),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&view).context("serializing view")?)
        }
    }

    Ok(!view.has_errors())
}
