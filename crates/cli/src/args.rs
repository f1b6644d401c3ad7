use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use stockcast_observability::LogFormat;

#[derive(Debug, Parser)]
#[command(
    name = "stockcast",
    about = "Restock forecasting and demand-shift simulation for store inventory",
    version
)]
pub struct Cli {
    /// Log output format (logs go to stderr).
    #[arg(long, global = true, value_enum, env = "STOCKCAST_LOG_FORMAT", default_value = "json")]
    pub log_format: LogFormatArg,

    /// Pretty-print the JSON written to stdout.
    #[arg(long, global = true, env = "STOCKCAST_PRETTY", action = ArgAction::SetTrue)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Json,
    Compact,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Json => LogFormat::Json,
            LogFormatArg::Compact => LogFormat::Compact,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Restock predictions for every product.
    Plan(PlanArgs),
    /// Baseline plus demand-shift scenario simulations.
    Simulate(SimulateArgs),
    /// Deterministic inventory health summary.
    Insights(InsightsArgs),
}

/// Inputs shared by every command.
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Products JSON: an array, or an object with `products` / `items`.
    pub products: PathBuf,

    /// Orders JSON used to fill in missing sales history.
    #[arg(long)]
    pub orders: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Planning date (YYYY-MM-DD); defaults to today (UTC).
    #[arg(long, env = "STOCKCAST_TODAY")]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Clone, Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Scenarios JSON: an array, or an object with `scenarios`.
    /// Falls back to a `scenarios` key in the products file, then to the defaults.
    #[arg(long)]
    pub scenarios: Option<PathBuf>,

    /// Simulated days including day 0.
    #[arg(long, env = "STOCKCAST_HORIZON_DAYS", default_value_t = 90)]
    pub horizon_days: u32,
}

#[derive(Debug, Clone, Args)]
pub struct InsightsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long, env = "STOCKCAST_TODAY")]
    pub today: Option<NaiveDate>,

    /// Items with fewer units on hand are reported as low stock.
    #[arg(long, env = "STOCKCAST_LOW_STOCK_THRESHOLD", default_value_t = 10)]
    pub low_stock_threshold: u64,
}
