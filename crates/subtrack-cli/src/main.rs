//! subtrack CLI - Subscription spending trends
//!
//! Usage:
//!   subtrack --file subs.json trend         Monthly spending trend
//!   subtrack categorize "Netflix"           Categorize a service name
//!   subtrack --file subs.json summary       Dashboard summary
//!   subtrack --file subs.json forecast      Spending forecast

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let output = if cli.json {
        commands::Output::Json
    } else {
        commands::Output::Text
    };

    match cli.command {
        Commands::Categorize { name, description } => {
            commands::cmd_categorize(&name, description.as_deref(), output)
        }
        Commands::Config { action } => {
            let config = commands::load_config(cli.config.as_deref())?;
            match action {
                None | Some(ConfigAction::Show) => commands::cmd_config_show(&config, output),
                Some(ConfigAction::Path) => commands::cmd_config_path(cli.config.as_deref()),
            }
        }
        Commands::Trend { months } => {
            let config = commands::load_config(cli.config.as_deref())?;
            let records = commands::open_records(&cli.file)?;
            let reference = commands::resolve_as_of(cli.as_of.as_deref())?;
            let months = months.unwrap_or(config.summary.trend_months);
            commands::cmd_trend(&records, reference, months, output)
        }
        Commands::Breakdown => {
            let records = commands::open_records(&cli.file)?;
            commands::cmd_breakdown(&records, output)
        }
        Commands::Summary => {
            let config = commands::load_config(cli.config.as_deref())?;
            let records = commands::open_records(&cli.file)?;
            let reference = commands::resolve_as_of(cli.as_of.as_deref())?;
            commands::cmd_summary(&records, reference, &config.summary, output)
        }
        Commands::Forecast { months } => {
            let mut config = commands::load_config(cli.config.as_deref())?;
            if let Some(months) = months {
                config.forecast.months = months;
            }
            let records = commands::open_records(&cli.file)?;
            let reference = commands::resolve_as_of(cli.as_of.as_deref())?;
            commands::cmd_forecast(&records, reference, &config.forecast, output)
        }
        Commands::Recommend { budget } => {
            let config = commands::load_config(cli.config.as_deref())?;
            let records = commands::open_records(&cli.file)?;
            let budget = budget.unwrap_or(config.summary.monthly_budget);
            commands::cmd_recommend(&records, budget, output)
        }
    }
}
