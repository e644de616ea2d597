//! Monthly spending trend
//!
//! Reconstructs per-calendar-month spend from subscription records that only
//! carry a single billing date. The window ends at the reference month and
//! reaches back `month_count - 1` months.
//!
//! Two inclusion rules apply:
//! - **Current month**: a record counts once its billing date has actually
//!   passed: the billing date falls in the reference month and is on or before
//!   the reference instant.
//! - **Past months**: an estimate. A record counts if it already existed in
//!   that month (its creation month is on or before the target month) and its
//!   billing date falls in that month or later. The current price is
//!   back-filled into every such month, so historical spend is overstated after
//!   a price increase and understated after a decrease.
//!
//! Status is not consulted; paused and cancelled records are included.

use chrono::{DateTime, Datelike, Utc};

use crate::models::{MonthlyTotal, SubscriptionRecord};

/// Default window length for dashboard trends
pub const DEFAULT_TREND_MONTHS: usize = 6;

/// Longest window (trend or forecast) the engine will produce
pub const MAX_WINDOW_MONTHS: usize = 1200;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    /// 1-based month
    pub month: u32,
}

impl YearMonth {
    pub fn of<T: Datelike>(date: &T) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Shift by a signed number of months
    pub fn add_months(self, months: i32) -> Self {
        let index = self.year as i64 * 12 + (self.month as i64 - 1) + months as i64;
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// Three-letter month name; years are not disambiguated
    pub fn label(&self) -> &'static str {
        MONTH_NAMES[(self.month as usize - 1) % 12]
    }
}

/// Per-month spend for the `month_count` months ending at `reference`'s month,
/// oldest first. Windows longer than [`MAX_WINDOW_MONTHS`] are truncated to it.
pub fn monthly_trend(
    records: &[SubscriptionRecord],
    reference: DateTime<Utc>,
    month_count: usize,
) -> Vec<MonthlyTotal> {
    let current = YearMonth::of(&reference);
    let month_count = month_count.min(MAX_WINDOW_MONTHS);

    (0..month_count as i32)
        .rev()
        .map(|months_back| {
            let target = current.add_months(-months_back);
            let total = records
                .iter()
                .filter(|record| {
                    if target == current {
                        billed_this_month(record, current, reference)
                    } else {
                        existed_in_month(record, target)
                    }
                })
                .fold(0.0, |acc, record| acc + record.price);

            MonthlyTotal {
                month: target.label().to_string(),
                amount: round_cents(total),
            }
        })
        .collect()
}

/// Percentage change between the last two months of a trend.
///
/// A zero previous month divides by 1 instead, so growth from nothing is
/// reported as the absolute amount.
pub fn month_over_month_growth(trend: &[MonthlyTotal]) -> Option<f64> {
    let [.., previous, last] = trend else {
        return None;
    };

    let base = if previous.amount == 0.0 {
        1.0
    } else {
        previous.amount
    };
    Some((last.amount - previous.amount) / base * 100.0)
}

fn billed_this_month(
    record: &SubscriptionRecord,
    current: YearMonth,
    reference: DateTime<Utc>,
) -> bool {
    match record.billing_date {
        Some(billing) => YearMonth::of(&billing) == current && billing <= reference,
        None => false,
    }
}

fn existed_in_month(record: &SubscriptionRecord, target: YearMonth) -> bool {
    match (record.billing_date, record.created_at) {
        (Some(billing), Some(created)) => {
            YearMonth::of(&created) <= target && YearMonth::of(&billing) >= target
        }
        _ => false,
    }
}

/// Round to 2 decimal places. Zero always comes back as positive zero.
pub(crate) fn round_cents(amount: f64) -> f64 {
    let rounded = (amount * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
