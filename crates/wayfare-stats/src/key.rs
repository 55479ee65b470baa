//! Grouping keys
//!
//! A grouping key names a field whose distinct values partition the
//! dataset. Presentation layers address keys by string name; an unknown
//! name is a caller error and surfaces immediately instead of silently
//! producing an empty summary.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use wayfare_core::EnrichedRecord;

/// Raised when a string names no supported grouping key.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Unknown grouping key: {0}")]
    Unknown(String),
}

/// Every grouping key the aggregator supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupKey {
    YearMonth,
    TravelGroup,
    DurationCategory,
    WindowCategory,
    DevicePackage,
    DistanceCategory,
    Device,
    Package,
    UserCountry,
    Channel,
    HotelMarket,
    AdultCount,
    ChildCount,
    SearchHour,
    SearchWeekday,
    TripType,
    Segment,
}

impl GroupKey {
    /// All supported keys, in presentation order.
    pub const ALL: [GroupKey; 17] = [
        GroupKey::YearMonth,
        GroupKey::TravelGroup,
        GroupKey::DurationCategory,
        GroupKey::WindowCategory,
        GroupKey::DevicePackage,
        GroupKey::DistanceCategory,
        GroupKey::Device,
        GroupKey::Package,
        GroupKey::UserCountry,
        GroupKey::Channel,
        GroupKey::HotelMarket,
        GroupKey::AdultCount,
        GroupKey::ChildCount,
        GroupKey::SearchHour,
        GroupKey::SearchWeekday,
        GroupKey::TripType,
        GroupKey::Segment,
    ];

    /// The string name collaborators use to request this key.
    pub fn name(&self) -> &'static str {
        match self {
            GroupKey::YearMonth => "year_month",
            GroupKey::TravelGroup => "travel_group",
            GroupKey::DurationCategory => "duration_category",
            GroupKey::WindowCategory => "window_category",
            GroupKey::DevicePackage => "device_package",
            GroupKey::DistanceCategory => "distance_category",
            GroupKey::Device => "device",
            GroupKey::Package => "package",
            GroupKey::UserCountry => "user_country",
            GroupKey::Channel => "channel",
            GroupKey::HotelMarket => "hotel_market",
            GroupKey::AdultCount => "adult_count",
            GroupKey::ChildCount => "child_count",
            GroupKey::SearchHour => "search_hour",
            GroupKey::SearchWeekday => "search_weekday",
            GroupKey::TripType => "trip_type",
            GroupKey::Segment => "segment",
        }
    }

    /// The key's value for one record, or `None` when the underlying field
    /// is undefined there. A `None` excludes the record from this key's
    /// partitions.
    pub fn value(&self, record: &EnrichedRecord) -> Option<String> {
        match self {
            GroupKey::YearMonth => record.year_month.clone(),
            GroupKey::TravelGroup => Some(record.travel_group.label().to_string()),
            GroupKey::DurationCategory => record.duration_category.map(str::to_string),
            GroupKey::WindowCategory => record.window_category.map(str::to_string),
            GroupKey::DevicePackage => Some(record.device_package.clone()),
            GroupKey::DistanceCategory => record.distance_category.map(str::to_string),
            GroupKey::Device => Some(if record.base.is_mobile { "Mobile" } else { "Desktop" }.to_string()),
            GroupKey::Package => {
                Some(if record.base.is_package { "Package" } else { "Non-Package" }.to_string())
            }
            GroupKey::UserCountry => Some(record.base.user_country.to_string()),
            GroupKey::Channel => Some(record.base.channel.to_string()),
            GroupKey::HotelMarket => Some(record.base.hotel_market.to_string()),
            GroupKey::AdultCount => Some(record.base.adult_count.to_string()),
            GroupKey::ChildCount => Some(record.base.child_count.to_string()),
            GroupKey::SearchHour => record.search_hour.map(|h| format!("{:02}", h)),
            GroupKey::SearchWeekday => record.search_weekday.map(str::to_string),
            GroupKey::TripType => record.trip_type.map(str::to_string),
            GroupKey::Segment => record.trip_type.map(|trip| {
                format!(
                    "{} - {} - {}",
                    record.device_package,
                    record.travel_group.label(),
                    trip
                )
            }),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GroupKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.name() == s)
            .ok_or_else(|| KeyError::Unknown(s.to_string()))
    }
}
