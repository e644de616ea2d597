//! Categorization command implementations

use anyhow::Result;
use subtrack_core::{categorize, category_breakdown, SubscriptionRecord};

use super::{print_json, truncate, Output};

pub fn cmd_categorize(name: &str, description: Option<&str>, output: Output) -> Result<()> {
    let result = categorize(name, description);

    if output == Output::Json {
        return print_json(&result);
    }

    println!();
    println!("🏷️  {}", name);
    println!("   Category:    {}", result.category);
    if let Some(sub) = &result.subcategory {
        println!("   Subcategory: {}", sub);
    }
    println!("   Confidence:  {:.0}%", result.confidence * 100.0);
    println!();

    Ok(())
}

pub fn cmd_breakdown(records: &[SubscriptionRecord], output: Output) -> Result<()> {
    let breakdown = category_breakdown(records);

    if output == Output::Json {
        return print_json(&breakdown);
    }

    println!();
    println!("📊 Spending by Category");
    println!("   ─────────────────────────────────────────────────────────────");

    if breakdown.is_empty() {
        println!("   No active subscriptions.");
        return Ok(());
    }

    println!(
        "   {:25} │ {:>10} │ {:>6} │ {:>5}",
        "Category", "Amount", "%", "Count"
    );
    println!("   ──────────────────────────┼────────────┼────────┼───────");

    for cat in &breakdown {
        println!(
            "   {:25} │ {:>10.2} │ {:>5.1}% │ {:>5}",
            truncate(&cat.category, 25),
            cat.amount,
            cat.percentage,
            cat.count
        );
    }
    println!();

    Ok(())
}
