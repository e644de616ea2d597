//! Forecast and recommendation command implementations

use anyhow::Result;
use chrono::{DateTime, Utc};
use subtrack_core::{forecast_spending, recommend, ForecastConfig, SubscriptionRecord};

use super::{print_json, Output};

pub fn cmd_forecast(
    records: &[SubscriptionRecord],
    reference: DateTime<Utc>,
    config: &ForecastConfig,
    output: Output,
) -> Result<()> {
    let forecast = forecast_spending(records, reference, config);

    if output == Output::Json {
        return print_json(&forecast);
    }

    println!();
    println!("🔮 Spending Forecast");
    println!("   Current monthly: {:.2}", forecast.current_monthly);
    println!("   ─────────────────────────────────────────────────────────────");

    if !forecast.predictions.is_empty() {
        println!("   {:5} │ {:>10} │ {:>10}", "Month", "Predicted", "Confidence");
        println!("   ──────┼────────────┼────────────");
        for point in &forecast.predictions {
            println!(
                "   {:5} │ {:>10.2} │ {:>9.0}%",
                point.month,
                point.predicted,
                point.confidence * 100.0
            );
        }
        println!();
    }

    for insight in &forecast.insights {
        println!("   💡 {}", insight);
    }

    if !forecast.risk_factors.is_empty() {
        println!();
        println!("   Risk factors:");
        for risk in &forecast.risk_factors {
            println!(
                "     {:20} │ {:>20} │ {:>3.0}%",
                risk.factor,
                risk.impact,
                risk.probability * 100.0
            );
        }
    }
    println!();

    Ok(())
}

pub fn cmd_recommend(
    records: &[SubscriptionRecord],
    monthly_budget: f64,
    output: Output,
) -> Result<()> {
    let recommendations = recommend(records, monthly_budget);

    if output == Output::Json {
        return print_json(&recommendations);
    }

    println!();
    println!("💰 Savings Recommendations");
    println!("   Budget: {:.2}", monthly_budget);
    println!("   ─────────────────────────────────────────────────────────────");

    if recommendations.is_empty() {
        println!("   No subscriptions to review.");
        return Ok(());
    }

    let total_savings: f64 = recommendations.iter().map(|r| r.savings).sum();
    for rec in &recommendations {
        println!(
            "   [{}] {} (save ~{:.2}/mo)",
            rec.recommendation_type.as_str(),
            rec.title,
            rec.savings
        );
        println!("      {}", rec.description);
        println!(
            "      Effort: {} │ Impact: {}",
            rec.effort.as_str(),
            rec.impact.as_str()
        );
    }
    println!();
    println!("   Potential savings: {:.2}/mo", total_savings);
    println!();

    Ok(())
}
