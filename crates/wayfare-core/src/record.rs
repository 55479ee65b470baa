//! Search-log record types

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One raw row of the search log.
///
/// Timestamps are `None` when the source value failed to parse; the record
/// is still retained and its date-dependent derived fields stay undefined.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRecord {
    /// When the search occurred
    pub event_timestamp: Option<NaiveDateTime>,

    /// Requested check-in date
    pub check_in: Option<NaiveDate>,

    /// Requested check-out date
    pub check_out: Option<NaiveDate>,

    /// Search came from a mobile device
    pub is_mobile: bool,

    /// Search was part of a package (flight + hotel)
    pub is_package: bool,

    /// Search resulted in a booking
    pub is_booking: bool,

    /// Number of adults in the party
    pub adult_count: u32,

    /// Number of children in the party
    pub child_count: u32,

    /// Number of rooms requested
    pub room_count: u32,

    /// Distance between origin and destination, when known
    pub origin_destination_distance: Option<f64>,

    /// User country code
    pub user_country: i64,

    /// Marketing channel code
    pub channel: i64,

    /// Hotel market code
    pub hotel_market: i64,
}

/// Party composition of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelGroup {
    Solo,
    Couple,
    SingleParent,
    Family,
    Group,
    Other,
}

impl TravelGroup {
    /// Human-readable label used as a grouping value
    pub fn label(&self) -> &'static str {
        match self {
            TravelGroup::Solo => "Solo",
            TravelGroup::Couple => "Couple",
            TravelGroup::SingleParent => "Single Parent",
            TravelGroup::Family => "Family",
            TravelGroup::Group => "Group",
            TravelGroup::Other => "Other",
        }
    }
}

/// A search record plus its derived features.
///
/// Every derived field is a pure function of the base fields. Fields that
/// depend on an absent input are `None`; aggregation excludes those records
/// from the affected groupings rather than treating `None` as a category.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedRecord {
    /// The raw record the features were derived from
    pub base: SearchRecord,

    /// `"YYYY-MM"` key of the search timestamp
    pub year_month: Option<String>,

    /// Whole days between check-in and check-out
    pub trip_duration_days: Option<i64>,

    /// Whole days between the search and check-in
    pub booking_window_days: Option<i64>,

    /// Party composition, always defined
    pub travel_group: TravelGroup,

    /// Trip-duration bucket
    pub duration_category: Option<&'static str>,

    /// Booking-window bucket
    pub window_category: Option<&'static str>,

    /// `"<Mobile|Desktop>, <Package|Non-Package>"`, always defined
    pub device_package: String,

    /// Origin-destination distance bucket
    pub distance_category: Option<&'static str>,

    /// Hour of day the search occurred (0-23)
    pub search_hour: Option<u32>,

    /// Weekday name the search occurred on
    pub search_weekday: Option<&'static str>,

    /// Coarse trip-length segment
    pub trip_type: Option<&'static str>,
}
