//! Domain models for subtrack

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A subscription as supplied by the subscription-listing API, after
/// normalization into the canonical shape (see [`crate::records`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Plain non-negative amount, currency-agnostic
    pub price: f64,
    /// Next or most recent billing occurrence (not a recurrence rule)
    pub billing_date: Option<DateTime<Utc>>,
    /// When the entry was first recorded. `None` means unknown or unparsable.
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: SubscriptionStatus,
    /// Category label assigned upstream, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl SubscriptionRecord {
    /// Create an active record whose creation date defaults to its billing date
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        billing_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            price: sanitize_price(price),
            billing_date,
            created_at: billing_date,
            status: SubscriptionStatus::Active,
            category: None,
        }
    }

    pub fn with_created_at(mut self, created_at: Option<DateTime<Utc>>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_status(mut self, status: SubscriptionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }
}

/// Clamp a price to a finite, non-negative amount
pub(crate) fn sanitize_price(price: f64) -> f64 {
    if price.is_finite() && price > 0.0 {
        price
    } else {
        0.0
    }
}

/// Subscription status. A missing status is treated as active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Paused,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(format!(
                "Unknown subscription status: {} (valid: active, paused, cancelled)",
                s
            )),
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of categorizing a service name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMatch {
    pub category: String,
    /// Confidence in [0, 1]
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
}

/// Spend total for one calendar month of a trend window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// Three-letter month name ("Jan", "Feb", ...)
    pub month: String,
    /// Rounded to 2 decimals
    pub amount: f64,
}

// ========== Report Models ==========

/// A spending category in a breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpending {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
    pub count: i64,
}

/// How monthly spend compares to the budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    /// At or below 90% of the budget
    Good,
    /// Above 90%, up to 100%
    Warning,
    /// Above 100%
    Over,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Over => "over",
        }
    }
}

/// Share of the monthly budget set aside for one category, against its spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBudget {
    pub category: String,
    pub allocated: f64,
    pub spent: f64,
    /// `spent` as a percentage of `allocated` (0 when nothing is allocated)
    pub used_percent: f64,
    pub over_budget: bool,
}

/// Dashboard-level summary of the subscription list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_monthly: f64,
    pub total_yearly: f64,
    pub active_count: i64,
    pub upcoming_renewals: i64,
    pub monthly_budget: f64,
    pub budget_used_percent: f64,
    pub budget_status: BudgetStatus,
    /// Budget left this month, never negative. Also what could be saved by
    /// staying at the current spend.
    pub remaining_budget: f64,
    /// Spend beyond the budget, never negative
    pub over_budget_by: f64,
    pub category_breakdown: Vec<CategorySpending>,
    pub category_budgets: Vec<CategoryBudget>,
    pub monthly_trend: Vec<MonthlyTotal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_percent: Option<f64>,
}

/// A single predicted month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub month: String,
    pub predicted: f64,
    pub confidence: f64,
}

/// Something that could push spending up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub factor: String,
    /// Expected effect, in plain amounts per month
    pub impact: String,
    pub probability: f64,
}

/// Spending forecast with derived insights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingForecast {
    pub current_monthly: f64,
    pub predictions: Vec<ForecastPoint>,
    pub insights: Vec<String>,
    pub risk_factors: Vec<RiskFactor>,
}

/// Kind of savings recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    Cancel,
    Downgrade,
    Bundle,
    Annual,
}

impl RecommendationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cancel => "cancel",
            Self::Downgrade => "downgrade",
            Self::Bundle => "bundle",
            Self::Annual => "annual",
        }
    }
}

/// Effort or impact rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// A savings recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub recommendation_type: RecommendationType,
    pub title: String,
    pub description: String,
    pub savings: f64,
    pub effort: Level,
    pub impact: Level,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_from_str() {
        assert_eq!(
            "active".parse::<SubscriptionStatus>().unwrap(),
            SubscriptionStatus::Active
        );
        assert_eq!(
            "PAUSED".parse::<SubscriptionStatus>().unwrap(),
            SubscriptionStatus::Paused
        );
        assert_eq!(
            "canceled".parse::<SubscriptionStatus>().unwrap(),
            SubscriptionStatus::Cancelled
        );
        assert!("expired".parse::<SubscriptionStatus>().is_err());
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&SubscriptionStatus::Cancelled).unwrap();
        assert_eq!(json, r#""cancelled""#);

        let parsed: SubscriptionStatus = serde_json::from_str(r#""paused""#).unwrap();
        assert_eq!(parsed, SubscriptionStatus::Paused);
    }

    #[test]
    fn test_record_new_defaults() {
        let billing = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        let record = SubscriptionRecord::new("1", "Netflix", 15.99, Some(billing));

        assert_eq!(record.created_at, Some(billing));
        assert_eq!(record.status, SubscriptionStatus::Active);
        assert!(record.is_active());
        assert!(record.category.is_none());
    }

    #[test]
    fn test_record_price_sanitized() {
        assert_eq!(SubscriptionRecord::new("1", "A", -5.0, None).price, 0.0);
        assert_eq!(SubscriptionRecord::new("2", "B", f64::NAN, None).price, 0.0);
        assert_eq!(
            SubscriptionRecord::new("3", "C", f64::INFINITY, None).price,
            0.0
        );
        assert_eq!(SubscriptionRecord::new("4", "D", 9.99, None).price, 9.99);
    }

    #[test]
    fn test_category_match_serde_skips_missing_subcategory() {
        let m = CategoryMatch {
            category: "Other".to_string(),
            confidence: 0.5,
            subcategory: None,
        };
        let json = serde_json::to_string(&m).unwrap();
        assert!(!json.contains("subcategory"));
    }

    #[test]
    fn test_budget_status_serde() {
        let json = serde_json::to_string(&BudgetStatus::Warning).unwrap();
        assert_eq!(json, r#""warning""#);
        assert_eq!(BudgetStatus::Over.as_str(), "over");
    }

    #[test]
    fn test_recommendation_serde() {
        let rec = Recommendation {
            recommendation_type: RecommendationType::Annual,
            title: "Switch to Annual Billing".to_string(),
            description: "Save with annual plans.".to_string(),
            savings: 10.0,
            effort: Level::Low,
            impact: Level::Medium,
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains(r#""type":"annual""#));
        assert!(json.contains(r#""effort":"low""#));
        assert!(json.contains(r#""impact":"medium""#));
    }
}
