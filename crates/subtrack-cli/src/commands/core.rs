//! Shared utilities and config commands
//!
//! This module contains:
//! - `open_records` - Load the subscription list named by --file
//! - `resolve_as_of` - Turn --as-of into a reference instant
//! - `load_config` - Resolve engine config
//! - `cmd_config_show` / `cmd_config_path` - Inspect configuration

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use subtrack_core::config::default_config_path;
use subtrack_core::{load_records, EngineConfig, SubscriptionRecord};
use tracing::debug;

use super::{print_json, Output};

/// Load and normalize the subscription list
pub fn open_records(path: &Path) -> Result<Vec<SubscriptionRecord>> {
    let records = load_records(path)
        .with_context(|| format!("Failed to load subscriptions from {}", path.display()))?;
    debug!("Loaded {} subscriptions from {}", records.len(), path.display());
    Ok(records)
}

/// Reference instant for the engine: the end of the given day, or now
pub fn resolve_as_of(as_of: Option<&str>) -> Result<DateTime<Utc>> {
    let Some(as_of) = as_of else {
        return Ok(Utc::now());
    };

    let date = NaiveDate::parse_from_str(as_of, "%Y-%m-%d")
        .context("Invalid --as-of date format (use YYYY-MM-DD)")?;
    let end_of_day = date
        .and_hms_opt(23, 59, 59)
        .context("Invalid --as-of date")?;
    Ok(end_of_day.and_utc())
}

pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    EngineConfig::load(path).context("Failed to load engine config")
}

pub fn cmd_config_show(config: &EngineConfig, output: Output) -> Result<()> {
    if output == Output::Json {
        return print_json(config);
    }

    println!();
    println!("⚙️  Engine Configuration");
    println!("   ─────────────────────────────────────");
    println!("   Trend months:         {}", config.summary.trend_months);
    println!(
        "   Renewal window:       {} days",
        config.summary.renewal_window_days
    );
    println!("   Monthly budget:       {:.2}", config.summary.monthly_budget);
    println!("   Forecast months:      {}", config.forecast.months);
    println!(
        "   Annual growth:        {:.1}%",
        config.forecast.annual_growth * 100.0
    );
    println!();

    Ok(())
}

pub fn cmd_config_path(explicit: Option<&Path>) -> Result<()> {
    match explicit {
        Some(path) => println!("{}", path.display()),
        None => match default_config_path() {
            Some(path) if path.exists() => println!("{}", path.display()),
            Some(path) => println!("{} (not present, using built-in defaults)", path.display()),
            None => println!("(no per-user config directory, using built-in defaults)"),
        },
    }
    Ok(())
}
