//! Dashboard summary
//!
//! Totals, renewal counts, budget usage and the per-category breakdown shown on
//! the dashboard, analytics and budget views. Unlike the trend, these figures
//! only count active subscriptions.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::categorize::record_category;
use crate::config::SummaryConfig;
use crate::models::{
    AnalyticsSummary, BudgetStatus, CategoryBudget, CategorySpending, SubscriptionRecord,
};
use crate::trends::{month_over_month_growth, monthly_trend, round_cents};

/// Recommended share of the monthly budget per category
pub const CATEGORY_ALLOCATIONS: &[(&str, f64)] = &[
    ("Entertainment", 0.30),
    ("Productivity", 0.25),
    ("Cloud", 0.20),
    ("Fitness", 0.15),
    ("Other", 0.10),
];

const BUDGET_WARNING_PERCENT: f64 = 90.0;
const BUDGET_OVER_PERCENT: f64 = 100.0;

/// Spend per category over active records, largest first
pub fn category_breakdown(records: &[SubscriptionRecord]) -> Vec<CategorySpending> {
    let mut totals: HashMap<String, (f64, i64)> = HashMap::new();
    for record in records.iter().filter(|r| r.is_active()) {
        let entry = totals.entry(record_category(record)).or_insert((0.0, 0));
        entry.0 += record.price;
        entry.1 += 1;
    }

    let total: f64 = totals.values().map(|(amount, _)| amount).sum();

    let mut breakdown: Vec<CategorySpending> = totals
        .into_iter()
        .map(|(category, (amount, count))| CategorySpending {
            category,
            amount: round_cents(amount),
            percentage: if total > 0.0 {
                amount / total * 100.0
            } else {
                0.0
            },
            count,
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });

    breakdown
}

/// Total monthly spend over active records
pub fn total_monthly(records: &[SubscriptionRecord]) -> f64 {
    round_cents(
        records
            .iter()
            .filter(|r| r.is_active())
            .fold(0.0, |acc, r| acc + r.price),
    )
}

/// Classify budget usage given as a percentage
pub fn budget_status(used_percent: f64) -> BudgetStatus {
    if used_percent > BUDGET_OVER_PERCENT {
        BudgetStatus::Over
    } else if used_percent > BUDGET_WARNING_PERCENT {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Good
    }
}

/// Allocated versus actual spend for each budgeted category, in allocation
/// order. Categories without an allocation are not listed.
pub fn category_budgets(
    breakdown: &[CategorySpending],
    monthly_budget: f64,
) -> Vec<CategoryBudget> {
    CATEGORY_ALLOCATIONS
        .iter()
        .map(|(category, share)| {
            let allocated = round_cents(monthly_budget.max(0.0) * share);
            let spent = breakdown
                .iter()
                .find(|c| c.category == *category)
                .map_or(0.0, |c| c.amount);
            let used_percent = if allocated > 0.0 {
                spent / allocated * 100.0
            } else {
                0.0
            };

            CategoryBudget {
                category: category.to_string(),
                allocated,
                spent,
                used_percent,
                over_budget: used_percent > BUDGET_OVER_PERCENT,
            }
        })
        .collect()
}

/// Active records billing within `window_days` after `reference` (inclusive).
/// A window too large to represent has no upper bound.
pub fn upcoming_renewals(
    records: &[SubscriptionRecord],
    reference: DateTime<Utc>,
    window_days: i64,
) -> Vec<&SubscriptionRecord> {
    if window_days < 0 {
        return Vec::new();
    }

    let horizon = Duration::try_days(window_days)
        .and_then(|window| reference.checked_add_signed(window));
    let mut upcoming: Vec<&SubscriptionRecord> = records
        .iter()
        .filter(|r| r.is_active())
        .filter(|r| {
            r.billing_date.is_some_and(|billing| {
                billing >= reference && horizon.map_or(true, |horizon| billing <= horizon)
            })
        })
        .collect();

    upcoming.sort_by_key(|r| r.billing_date);
    upcoming
}

/// Build the dashboard summary
pub fn summarize(
    records: &[SubscriptionRecord],
    reference: DateTime<Utc>,
    config: &SummaryConfig,
) -> AnalyticsSummary {
    let total_monthly = total_monthly(records);
    let monthly_trend = monthly_trend(records, reference, config.trend_months);
    let growth_percent = month_over_month_growth(&monthly_trend);

    let budget = config.monthly_budget;
    let budget_used_percent = if budget > 0.0 {
        total_monthly / budget * 100.0
    } else {
        0.0
    };
    let breakdown = category_breakdown(records);

    AnalyticsSummary {
        total_monthly,
        total_yearly: round_cents(total_monthly * 12.0),
        active_count: records.iter().filter(|r| r.is_active()).count() as i64,
        upcoming_renewals: upcoming_renewals(records, reference, config.renewal_window_days).len()
            as i64,
        monthly_budget: budget,
        budget_used_percent,
        budget_status: budget_status(budget_used_percent),
        remaining_budget: round_cents((budget - total_monthly).max(0.0)),
        over_budget_by: round_cents((total_monthly - budget).max(0.0)),
        category_budgets: category_budgets(&breakdown, budget),
        category_breakdown: breakdown,
        monthly_trend,
        growth_percent,
    }
}
