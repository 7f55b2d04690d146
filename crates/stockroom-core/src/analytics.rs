//! # Analytics
//!
//! Pure aggregation over sale records: the 30-day sales-by-day series used
//! by the dashboard overview. The database layer fetches the raw rows; the
//! fold here stays free of I/O so it can be tested exhaustively.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Number of calendar days covered by the overview, current day inclusive.
pub const SALES_WINDOW_DAYS: i64 = 30;

/// Revenue total for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    /// Calendar date (UTC), serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Sum of sale amounts on that date, in cents.
    pub amount_cents: i64,
}

/// The dashboard overview: a zero-filled daily revenue series plus the
/// count of items at or under their reorder level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub sales_by_day: Vec<DailyRevenue>,
    pub low_stock: i64,
}

/// Folds sale records into one entry per day for the trailing window.
///
/// Returns exactly [`SALES_WINDOW_DAYS`] entries in ascending date order,
/// ending at `today` inclusive. Days without sales are zero-filled. Sales
/// outside the window are ignored.
pub fn revenue_by_day(sales: &[(DateTime<Utc>, i64)], today: NaiveDate) -> Vec<DailyRevenue> {
    let start = today - Duration::days(SALES_WINDOW_DAYS - 1);

    let mut days: Vec<DailyRevenue> = (0..SALES_WINDOW_DAYS)
        .map(|offset| DailyRevenue {
            date: start + Duration::days(offset),
            amount_cents: 0,
        })
        .collect();

    for (created_at, amount_cents) in sales {
        let date = created_at.date_naive();
        if date < start || date > today {
            continue;
        }
        let idx = (date - start).num_days() as usize;
        days[idx].amount_cents += amount_cents;
    }

    days
}

// =============================================================================
// Unit Tests
// =============================================================================
