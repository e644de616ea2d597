//! Trend and summary command implementations

use anyhow::Result;
use chrono::{DateTime, Utc};
use subtrack_core::{
    month_over_month_growth, monthly_trend, summarize, upcoming_renewals, BudgetStatus,
    MonthlyTotal, SubscriptionRecord, SummaryConfig,
};

use super::{print_json, truncate, Output};

/// Width of the widest bar in the trend chart
const BAR_WIDTH: usize = 30;

pub fn cmd_trend(
    records: &[SubscriptionRecord],
    reference: DateTime<Utc>,
    months: usize,
    output: Output,
) -> Result<()> {
    let trend = monthly_trend(records, reference, months);

    if output == Output::Json {
        return print_json(&trend);
    }

    println!();
    println!("📈 Monthly Spending Trend");
    println!("   Through: {}", reference.format("%Y-%m-%d"));
    println!("   ─────────────────────────────────────────────────────────────");

    if trend.is_empty() {
        println!("   No months requested.");
        return Ok(());
    }

    print_trend_rows(&trend);

    if let Some(growth) = month_over_month_growth(&trend) {
        println!();
        println!("   Month over month: {:+.1}%", growth);
    }
    println!();

    Ok(())
}

fn print_trend_rows(trend: &[MonthlyTotal]) {
    let max = trend.iter().map(|m| m.amount).fold(0.0_f64, f64::max);

    for month in trend {
        let bar_len = if max > 0.0 {
            ((month.amount / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        println!(
            "   {:3} │ {:>10.2} │ {}",
            month.month,
            month.amount,
            "█".repeat(bar_len)
        );
    }
}

pub fn cmd_summary(
    records: &[SubscriptionRecord],
    reference: DateTime<Utc>,
    config: &SummaryConfig,
    output: Output,
) -> Result<()> {
    let summary = summarize(records, reference, config);

    if output == Output::Json {
        return print_json(&summary);
    }

    println!();
    println!("📋 Subscription Summary");
    println!("   As of: {}", reference.format("%Y-%m-%d"));
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Active subscriptions: {}", summary.active_count);
    println!("   Monthly total:        {:.2}", summary.total_monthly);
    println!("   Yearly total:         {:.2}", summary.total_yearly);
    println!(
        "   Budget used:          {:.1}% of {:.2} ({})",
        summary.budget_used_percent,
        summary.monthly_budget,
        summary.budget_status.as_str()
    );
    println!("   Remaining budget:     {:.2}", summary.remaining_budget);
    match summary.budget_status {
        BudgetStatus::Over => println!(
            "   ⚠️  Over budget by {:.2}. Consider canceling some subscriptions.",
            summary.over_budget_by
        ),
        BudgetStatus::Warning => println!(
            "   ⚠️  Using {:.1}% of your budget. Consider reviewing your subscriptions.",
            summary.budget_used_percent
        ),
        BudgetStatus::Good => {}
    }

    println!();
    println!(
        "   Renewing in the next {} days: {}",
        config.renewal_window_days, summary.upcoming_renewals
    );
    for record in upcoming_renewals(records, reference, config.renewal_window_days) {
        if let Some(date) = record.billing_date {
            println!(
                "     {} │ {:25} │ {:>10.2}",
                date.format("%Y-%m-%d"),
                truncate(&record.name, 25),
                record.price
            );
        }
    }

    if !summary.category_breakdown.is_empty() {
        println!();
        println!("   Top categories:");
        for cat in summary.category_breakdown.iter().take(5) {
            println!(
                "     {:25} │ {:>10.2} │ {:>5.1}%",
                truncate(&cat.category, 25),
                cat.amount,
                cat.percentage
            );
        }
    }

    if summary.monthly_budget > 0.0 {
        println!();
        println!("   Category budgets:");
        for budget in &summary.category_budgets {
            println!(
                "     {:25} │ {:>10.2} / {:>10.2} │ {:>5.1}%{}",
                truncate(&budget.category, 25),
                budget.spent,
                budget.allocated,
                budget.used_percent,
                if budget.over_budget { " ⚠️" } else { "" }
            );
        }
    }

    if !summary.monthly_trend.is_empty() {
        println!();
        println!("   Trend:");
        print_trend_rows(&summary.monthly_trend);
        if let Some(growth) = summary.growth_percent {
            println!("   Month over month: {:+.1}%", growth);
        }
    }
    println!();

    Ok(())
}
