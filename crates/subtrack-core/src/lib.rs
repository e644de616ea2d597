//! subtrack Core Library
//!
//! Spending classification and trend engine for the subscription dashboard:
//! - Subscription list normalization (tolerant of API field-name drift)
//! - Keyword-based service categorization
//! - Monthly spending trend with back-filled estimates for past months
//! - Dashboard summary, category breakdown and budget usage
//! - Spending forecast and savings recommendations
//! - Engine configuration with embedded defaults
//!
//! All engine functions are pure: they take an in-memory list of records and a
//! reference date and never fail. Only loading input and config can error.

pub mod categorize;
pub mod config;
pub mod error;
pub mod forecast;
pub mod models;
pub mod records;
pub mod summary;
pub mod trends;

pub use categorize::{categorize, categorize_value, record_category};
pub use config::{EngineConfig, ForecastConfig, SummaryConfig};
pub use error::{Error, Result};
pub use forecast::{forecast_spending, recommend};
pub use models::{
    AnalyticsSummary, BudgetStatus, CategoryBudget, CategoryMatch, CategorySpending, MonthlyTotal,
    Recommendation, RiskFactor, SpendingForecast, SubscriptionRecord, SubscriptionStatus,
};
pub use records::{load_records, parse_records};
pub use summary::{
    budget_status, category_breakdown, category_budgets, summarize, upcoming_renewals,
};
pub use trends::{
    month_over_month_growth, monthly_trend, DEFAULT_TREND_MONTHS, MAX_WINDOW_MONTHS,
};
