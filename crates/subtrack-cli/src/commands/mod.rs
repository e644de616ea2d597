//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (open_records, resolve_as_of, load_config) and config commands
//! - `categorize` - Service name categorization and category breakdown
//! - `trends` - Monthly trend and dashboard summary
//! - `forecast` - Spending forecast and savings recommendations

pub mod categorize;
pub mod core;
pub mod forecast;
pub mod trends;

// Re-export command functions for main.rs
pub use categorize::*;
pub use core::*;
pub use forecast::*;
pub use trends::*;

use anyhow::Result;
use serde::Serialize;

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Text,
    Json,
}

/// Print a value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
