//! Calendar-month trend rows

use std::collections::BTreeMap;

use serde::Serialize;

use wayfare_core::Dataset;

/// Aggregates for one calendar month of search activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRow {
    /// `"YYYY-MM"` month key
    pub year_month: String,
    pub searches: u64,
    pub bookings: u64,
    /// `100 * bookings / searches`
    pub conversion_rate: f64,
    /// Searches made from a mobile device
    pub mobile_searches: u64,
    /// `100 * mobile_searches / searches`
    pub mobile_percentage: f64,
}

impl MonthlyRow {
    /// The `"YYYY"` part of the month key, for year-over-year comparison.
    pub fn year(&self) -> &str {
        self.year_month.split('-').next().unwrap_or("")
    }

    /// The `"MM"` part of the month key.
    pub fn month(&self) -> &str {
        self.year_month.split('-').nth(1).unwrap_or("")
    }
}

/// Monthly searches, bookings, conversion rate, and mobile share, in
/// chronological order. Records with an unparseable search timestamp have
/// no month key and are excluded.
pub fn monthly_summary(dataset: &Dataset) -> Vec<MonthlyRow> {
    let mut months: BTreeMap<String, (u64, u64, u64)> = BTreeMap::new();

    for record in dataset.records() {
        let Some(month) = record.year_month.clone() else {
            continue;
        };

        let (searches, bookings, mobile) = months.entry(month).or_insert((0, 0, 0));
        *searches += 1;
        if record.base.is_booking {
            *bookings += 1;
        }
        if record.base.is_mobile {
            *mobile += 1;
        }
    }

    // "YYYY-MM" keys sort chronologically as strings
    months
        .into_iter()
        .map(|(year_month, (searches, bookings, mobile_searches))| {
            let (conversion_rate, mobile_percentage) = if searches == 0 {
                (0.0, 0.0)
            } else {
                (
                    100.0 * bookings as f64 / searches as f64,
                    100.0 * mobile_searches as f64 / searches as f64,
                )
            };
            MonthlyRow {
                year_month,
                searches,
                bookings,
                conversion_rate,
                mobile_searches,
                mobile_percentage,
            }
        })
        .collect()
}

/// Relative growth of the mobile share from the first month to the last,
/// in percent. `None` when there are fewer than two months or the first
/// month has no mobile traffic to grow from.
pub fn mobile_growth_percent(rows: &[MonthlyRow]) -> Option<f64> {
    if rows.len() < 2 {
        return None;
    }
    let first = rows.first()?.mobile_percentage;
    let last = rows.last()?.mobile_percentage;
    if first == 0.0 {
        return None;
    }
    Some(100.0 * (last - first) / first)
}
