//! Spending forecast and savings recommendations
//!
//! Projects current subscription spend forward with a yearly growth rate and a
//! fixed seasonal profile, and derives simple cost-cutting suggestions from
//! totals and the monthly budget.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::categorize::record_category;
use crate::config::ForecastConfig;
use crate::models::{
    ForecastPoint, Level, Recommendation, RecommendationType, RiskFactor, SpendingForecast,
    SubscriptionRecord,
};
use crate::trends::{round_cents, YearMonth, MAX_WINDOW_MONTHS};

/// Seasonal multipliers, indexed by months ahead of the reference month
const SEASONAL_FACTORS: [f64; 12] = [1.0, 1.1, 1.2, 1.0, 0.9, 0.8, 0.9, 1.0, 1.1, 1.3, 1.4, 1.2];

/// Confidence lost per month of lookahead
const CONFIDENCE_DECAY: f64 = 0.03;
const CONFIDENCE_FLOOR: f64 = 0.6;

/// Review suggestions kick in once spend passes this share of the budget
const BUDGET_PRESSURE_RATIO: f64 = 0.8;
const HIGH_SPEND_THRESHOLD: f64 = 100.0;

/// Common ways subscription spend drifts upward: (factor, impact, probability)
const RISK_FACTORS: [(&str, &str, f64); 3] = [
    ("Price Increases", "+1,500-2,500/month", 0.8),
    ("Subscription Creep", "+2,000-4,000/month", 0.6),
    ("Usage Decline", "Wasted spending", 0.4),
];

/// Predict spend for the months following `reference`'s month, at most
/// [`MAX_WINDOW_MONTHS`] of them
pub fn forecast_spending(
    records: &[SubscriptionRecord],
    reference: DateTime<Utc>,
    config: &ForecastConfig,
) -> SpendingForecast {
    if records.is_empty() {
        return SpendingForecast {
            current_monthly: 0.0,
            predictions: Vec::new(),
            insights: vec!["Add subscriptions to get spending predictions".to_string()],
            risk_factors: Vec::new(),
        };
    }

    let current: f64 = records.iter().map(|r| r.price).sum();
    let start = YearMonth::of(&reference);

    let months = config.months.min(MAX_WINDOW_MONTHS);

    let predictions = (0..months)
        .map(|i| {
            let growth = (1.0 + config.annual_growth).powf(i as f64 / 12.0);
            let seasonal = SEASONAL_FACTORS[i % SEASONAL_FACTORS.len()];
            ForecastPoint {
                month: start.add_months(i as i32 + 1).label().to_string(),
                predicted: round_cents(current * growth * seasonal),
                confidence: (1.0 - i as f64 * CONFIDENCE_DECAY).max(CONFIDENCE_FLOOR),
            }
        })
        .collect();

    let mut insights = Vec::new();
    let categories: HashSet<String> = records.iter().map(record_category).collect();
    if categories.len() > 1 {
        insights.push(format!(
            "You have subscriptions across {} categories",
            categories.len()
        ));
    }
    if current > HIGH_SPEND_THRESHOLD {
        insights.push("Consider reviewing subscription usage to optimize spending".to_string());
    }
    insights.push("Consider annual billing for frequently used services".to_string());

    let risk_factors = RISK_FACTORS
        .iter()
        .map(|(factor, impact, probability)| RiskFactor {
            factor: factor.to_string(),
            impact: impact.to_string(),
            probability: *probability,
        })
        .collect();

    SpendingForecast {
        current_monthly: round_cents(current),
        predictions,
        insights,
        risk_factors,
    }
}

/// Savings suggestions for the subscription list against a monthly budget
pub fn recommend(records: &[SubscriptionRecord], monthly_budget: f64) -> Vec<Recommendation> {
    if records.is_empty() {
        return Vec::new();
    }

    let total: f64 = records.iter().map(|r| r.price).sum();
    let mut recommendations = Vec::new();

    if total > monthly_budget * BUDGET_PRESSURE_RATIO {
        recommendations.push(Recommendation {
            recommendation_type: RecommendationType::Cancel,
            title: "Review High-Cost Subscriptions".to_string(),
            description:
                "You're approaching your budget limit. Consider canceling unused services."
                    .to_string(),
            savings: round_cents(total * 0.2),
            effort: Level::Low,
            impact: Level::High,
        });
    }

    if records.len() > 3 {
        recommendations.push(Recommendation {
            recommendation_type: RecommendationType::Bundle,
            title: "Look for Bundle Opportunities".to_string(),
            description: "Combine similar services for potential savings.".to_string(),
            savings: 20.0,
            effort: Level::Medium,
            impact: Level::Medium,
        });
    }

    recommendations.push(Recommendation {
        recommendation_type: RecommendationType::Annual,
        title: "Switch to Annual Billing".to_string(),
        description: "Save on frequently used subscriptions with annual plans.".to_string(),
        savings: round_cents((total * 0.1).max(10.0)),
        effort: Level::Low,
        impact: Level::Medium,
    });

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 15, 0, 0, 0).unwrap()
    }

    fn records(prices: &[f64]) -> Vec<SubscriptionRecord> {
        prices
            .iter()
            .enumerate()
            .map(|(i, p)| SubscriptionRecord::new(i.to_string(), "Netflix", *p, None))
            .collect()
    }

    #[test]
    fn test_forecast_empty() {
        let forecast = forecast_spending(&[], reference(), &ForecastConfig::default());
        assert!(forecast.predictions.is_empty());
        assert!(forecast.risk_factors.is_empty());
        assert_eq!(
            forecast.insights,
            vec!["Add subscriptions to get spending predictions"]
        );
    }

    #[test]
    fn test_forecast_predictions() {
        let forecast = forecast_spending(&records(&[100.0]), reference(), &ForecastConfig::default());

        assert_eq!(forecast.predictions.len(), 12);
        assert_eq!(forecast.predictions[0].month, "Dec");
        assert_eq!(forecast.predictions[1].month, "Jan");
        assert_eq!(forecast.predictions[0].predicted, 100.0);
        assert_eq!(forecast.predictions[0].confidence, 1.0);

        // Second month: 100 * 1.05^(1/12) * 1.1
        let expected = round_cents(100.0 * 1.05f64.powf(1.0 / 12.0) * 1.1);
        assert_eq!(forecast.predictions[1].predicted, expected);

        // Confidence decays to the floor
        assert!((forecast.predictions[11].confidence - 0.67).abs() < 1e-9);
        let long = forecast_spending(
            &records(&[100.0]),
            reference(),
            &ForecastConfig {
                months: 24,
                annual_growth: 0.0,
            },
        );
        assert_eq!(long.predictions[23].confidence, 0.6);
        // Seasonal profile repeats yearly with no growth
        assert_eq!(long.predictions[1].predicted, long.predictions[13].predicted);
    }

    #[test]
    fn test_forecast_risk_factors() {
        let forecast = forecast_spending(&records(&[100.0]), reference(), &ForecastConfig::default());
        let factors: Vec<&str> = forecast
            .risk_factors
            .iter()
            .map(|r| r.factor.as_str())
            .collect();
        assert_eq!(
            factors,
            vec!["Price Increases", "Subscription Creep", "Usage Decline"]
        );
        assert_eq!(forecast.risk_factors[0].probability, 0.8);
        assert!(forecast
            .risk_factors
            .iter()
            .all(|r| r.impact.chars().all(|c| c.is_ascii())));
    }

    #[test]
    fn test_forecast_window_is_capped() {
        let config = ForecastConfig {
            months: usize::MAX,
            annual_growth: 0.0,
        };
        let forecast = forecast_spending(&records(&[10.0]), reference(), &config);
        assert_eq!(forecast.predictions.len(), MAX_WINDOW_MONTHS);
    }

    #[test]
    fn test_forecast_insights() {
        let single = forecast_spending(&records(&[50.0]), reference(), &ForecastConfig::default());
        assert_eq!(
            single.insights,
            vec!["Consider annual billing for frequently used services"]
        );

        let mixed = vec![
            SubscriptionRecord::new("1", "Netflix", 80.0, None),
            SubscriptionRecord::new("2", "Github", 40.0, None),
        ];
        let forecast = forecast_spending(&mixed, reference(), &ForecastConfig::default());
        assert_eq!(forecast.insights.len(), 3);
        assert_eq!(
            forecast.insights[0],
            "You have subscriptions across 2 categories"
        );
    }

    #[test]
    fn test_recommend_empty() {
        assert!(recommend(&[], 300.0).is_empty());
    }

    #[test]
    fn test_recommend_under_budget() {
        let recs = recommend(&records(&[10.0, 20.0]), 300.0);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].recommendation_type, RecommendationType::Annual);
        assert_eq!(recs[0].savings, 10.0);
    }

    #[test]
    fn test_recommend_over_budget_with_many() {
        let recs = recommend(&records(&[100.0, 80.0, 60.0, 50.0]), 300.0);
        let kinds: Vec<RecommendationType> = recs.iter().map(|r| r.recommendation_type).collect();
        assert_eq!(
            kinds,
            vec![
                RecommendationType::Cancel,
                RecommendationType::Bundle,
                RecommendationType::Annual
            ]
        );
        assert_eq!(recs[0].savings, 58.0);
        assert_eq!(recs[2].savings, 29.0);
    }
}
