//! Whole-dataset headline metrics

use serde::Serialize;

use wayfare_core::Dataset;

/// The headline numbers shown before any grouped view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Overview {
    pub total_searches: u64,
    pub total_bookings: u64,
    /// `100 * total_bookings / total_searches`
    pub conversion_rate: f64,
    /// Share of searches made from a mobile device, in percent
    pub mobile_share_percent: f64,
}

impl Overview {
    /// Compute the headline metrics. All zero for an empty dataset.
    pub fn of(dataset: &Dataset) -> Self {
        let total_searches = dataset.len() as u64;
        if total_searches == 0 {
            return Self::default();
        }

        let total_bookings = dataset
            .records()
            .iter()
            .filter(|r| r.base.is_booking)
            .count() as u64;
        let mobile_searches = dataset
            .records()
            .iter()
            .filter(|r| r.base.is_mobile)
            .count() as u64;

        Self {
            total_searches,
            total_bookings,
            conversion_rate: 100.0 * total_bookings as f64 / total_searches as f64,
            mobile_share_percent: 100.0 * mobile_searches as f64 / total_searches as f64,
        }
    }
}
