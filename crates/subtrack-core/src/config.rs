//! Engine configuration
//!
//! Settings for the trend window, dashboard summary and forecast.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for an override file (explicit path, or
//!    ~/.local/share/subtrack/config/engine.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::trends::{DEFAULT_TREND_MONTHS, MAX_WINDOW_MONTHS};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/engine.toml");

/// Settings for the dashboard summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryConfig {
    /// Trend window length in months
    pub trend_months: usize,
    /// Days ahead of the reference date that count as an upcoming renewal
    pub renewal_window_days: i64,
    /// Monthly budget used for budget-usage figures
    pub monthly_budget: f64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            trend_months: DEFAULT_TREND_MONTHS,
            renewal_window_days: 7,
            monthly_budget: 300.0,
        }
    }
}

/// Settings for the spending forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastConfig {
    /// Number of months to predict
    pub months: usize,
    /// Expected yearly growth rate (0.05 = 5%)
    pub annual_growth: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            months: 12,
            annual_growth: 0.05,
        }
    }
}

/// Full engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EngineConfig {
    pub summary: SummaryConfig,
    pub forecast: ForecastConfig,
}

impl EngineConfig {
    /// Load configuration, preferring `override_path`, then the per-user
    /// override, then the embedded defaults
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let content = match override_path {
            Some(path) => read_config(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => read_config(&path)?,
                _ => DEFAULT_CONFIG.to_string(),
            },
        };

        parse_config(&content)
    }

    /// Embedded defaults only
    pub fn embedded() -> Result<Self> {
        parse_config(DEFAULT_CONFIG)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("subtrack").join("config").join("engine.toml"))
}

fn read_config(path: &Path) -> Result<String> {
    debug!("Loading engine config from {}", path.display());
    fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    trend: Option<RawTrend>,
    summary: Option<RawSummary>,
    forecast: Option<RawForecast>,
}

#[derive(Debug, Deserialize)]
struct RawTrend {
    months: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawSummary {
    renewal_window_days: Option<i64>,
    monthly_budget: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    months: Option<usize>,
    annual_growth: Option<f64>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<EngineConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = EngineConfig::default();

    if let Some(trend) = raw.trend {
        if let Some(months) = trend.months {
            config.summary.trend_months = window_months("trend.months", months)?;
        }
    }

    if let Some(summary) = raw.summary {
        if let Some(days) = summary.renewal_window_days {
            if days < 0 {
                return Err(Error::Config(format!(
                    "renewal_window_days must not be negative (got {})",
                    days
                )));
            }
            config.summary.renewal_window_days = days;
        }
        if let Some(budget) = summary.monthly_budget {
            config.summary.monthly_budget = budget;
        }
    }

    if let Some(forecast) = raw.forecast {
        if let Some(months) = forecast.months {
            config.forecast.months = window_months("forecast.months", months)?;
        }
        if let Some(growth) = forecast.annual_growth {
            config.forecast.annual_growth = growth;
        }
    }

    Ok(config)
}

fn window_months(key: &str, months: usize) -> Result<usize> {
    if months > MAX_WINDOW_MONTHS {
        return Err(Error::Config(format!(
            "{} must be at most {} (got {})",
            key, MAX_WINDOW_MONTHS, months
        )));
    }
    Ok(months)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.summary.trend_months, 6);
        assert_eq!(config.summary.renewal_window_days, 7);
        assert_eq!(config.summary.monthly_budget, 300.0);
        assert_eq!(config.forecast.months, 12);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = parse_config(
            r#"
[summary]
monthly_budget = 45000.0
"#,
        )
        .unwrap();

        assert_eq!(config.summary.monthly_budget, 45000.0);
        assert_eq!(config.summary.renewal_window_days, 7);
        assert_eq!(config.summary.trend_months, 6);
        assert_eq!(config.forecast, ForecastConfig::default());
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            parse_config("[trend\nmonths = 3"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            parse_config("[trend]\nmonths = \"six\""),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_negative_renewal_window_rejected() {
        assert!(matches!(
            parse_config("[summary]\nrenewal_window_days = -1"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_oversized_windows_rejected() {
        assert!(matches!(
            parse_config("[trend]\nmonths = 5000"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            parse_config("[forecast]\nmonths = 1201"),
            Err(Error::Config(_))
        ));
        let config = parse_config("[forecast]\nmonths = 1200").unwrap();
        assert_eq!(config.forecast.months, MAX_WINDOW_MONTHS);
    }

    #[test]
    fn test_huge_renewal_window_accepted() {
        let config = parse_config("[summary]\nrenewal_window_days = 9223372036854775807").unwrap();
        assert_eq!(config.summary.renewal_window_days, i64::MAX);
    }

    #[test]
    fn test_load_from_override_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[trend]\nmonths = 12\n\n[forecast]\nannual_growth = 0.1").unwrap();

        let config = EngineConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.summary.trend_months, 12);
        assert_eq!(config.forecast.annual_growth, 0.1);
    }

    #[test]
    fn test_load_missing_override_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = EngineConfig::load(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_default_config_path_location() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("subtrack/config/engine.toml"));
        }
    }
}
