//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use subtrack_core::MAX_WINDOW_MONTHS;

/// Month counts accepted by --months
fn months_parser() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::new().range(0..=MAX_WINDOW_MONTHS as u64)
}

/// subtrack - Subscription spending trends and categories
#[derive(Parser)]
#[command(name = "subtrack")]
#[command(about = "Spending trends and categorization for exported subscription lists", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subscription list exported from the API (JSON)
    #[arg(short, long, default_value = "subscriptions.json", global = true)]
    pub file: PathBuf,

    /// Reference date (YYYY-MM-DD), counted through the end of that day.
    /// Defaults to now.
    #[arg(long, global = true)]
    pub as_of: Option<String>,

    /// Engine config file (defaults to the per-user override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Monthly spending trend ending at the reference month
    Trend {
        /// Number of months in the window (defaults to config)
        #[arg(short, long, value_parser = months_parser())]
        months: Option<usize>,
    },

    /// Categorize a service name
    Categorize {
        /// Service name
        name: String,

        /// Optional description, used when the name doesn't match
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Spending per category for active subscriptions
    Breakdown,

    /// Dashboard summary (totals, renewals, budget, trend)
    Summary,

    /// Predict spending for the coming months
    Forecast {
        /// Number of months to predict (defaults to config)
        #[arg(short, long, value_parser = months_parser())]
        months: Option<usize>,
    },

    /// Savings recommendations
    Recommend {
        /// Monthly budget (defaults to config)
        #[arg(short, long)]
        budget: Option<f64>,
    },

    /// Show engine configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective settings
    Show,
    /// Show where the per-user override file is read from
    Path,
}
