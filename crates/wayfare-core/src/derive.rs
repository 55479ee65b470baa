//! Per-record feature derivation
//!
//! Each rule is an ordered ladder: the first matching upper bound wins.
//! The duration ladder is inclusive on its upper bounds while the window
//! ladder is exclusive; the bounds follow the published bucket labels and
//! the asymmetry between the two ladders is intentional.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

use crate::record::{EnrichedRecord, SearchRecord, TravelGroup};

const SECONDS_PER_DAY: i64 = 86_400;

/// Classify party composition. First matching rule wins; the rules are
/// mutually exclusive by construction.
pub fn travel_group(adults: u32, children: u32) -> TravelGroup {
    if adults == 1 && children == 0 {
        TravelGroup::Solo
    } else if adults == 2 && children == 0 {
        TravelGroup::Couple
    } else if adults == 1 && children > 0 {
        TravelGroup::SingleParent
    } else if adults == 2 && children > 0 {
        TravelGroup::Family
    } else if adults > 2 {
        TravelGroup::Group
    } else {
        TravelGroup::Other
    }
}

/// Bucket a trip duration in whole days. Bounds are inclusive.
pub fn duration_category(days: i64) -> &'static str {
    if days <= 3 {
        "1-3 days"
    } else if days <= 7 {
        "4-7 days"
    } else if days <= 14 {
        "8-14 days"
    } else {
        "15+ days"
    }
}

/// Bucket a booking window in whole days. Bounds are exclusive.
pub fn window_category(days: i64) -> &'static str {
    if days < 7 {
        "0-6 days"
    } else if days < 14 {
        "7-13 days"
    } else if days < 30 {
        "14-29 days"
    } else if days < 60 {
        "30-59 days"
    } else if days < 90 {
        "60-89 days"
    } else {
        "90+ days"
    }
}

/// Bucket an origin-destination distance.
pub fn distance_category(distance: f64) -> &'static str {
    if distance < 100.0 {
        "< 100"
    } else if distance < 500.0 {
        "100-500"
    } else if distance < 1000.0 {
        "500-1000"
    } else if distance < 2000.0 {
        "1000-2000"
    } else {
        "> 2000"
    }
}

/// Coarse trip-length segment used for customer segmentation.
pub fn trip_type(days: i64) -> &'static str {
    if days <= 3 {
        "Short Break"
    } else if days <= 7 {
        "Standard Vacation"
    } else {
        "Extended Trip"
    }
}

/// Compose the device/package label. Always defined.
pub fn device_package(is_mobile: bool, is_package: bool) -> String {
    let device = if is_mobile { "Mobile" } else { "Desktop" };
    let package = if is_package { "Package" } else { "Non-Package" };
    format!("{}, {}", device, package)
}

/// `"YYYY-MM"` key of a timestamp
pub fn year_month(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%Y-%m").to_string()
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Whole days from `timestamp` to midnight of `date`, flooring the exact
/// difference so that a partial day before check-in counts as zero.
fn whole_days_until(date: NaiveDate, timestamp: NaiveDateTime) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    (midnight - timestamp).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Derive the features of a single record.
///
/// Total: a record with missing or unparseable inputs gets `None` in the
/// dependent derived fields and is otherwise kept as-is.
pub fn derive_record(base: SearchRecord) -> EnrichedRecord {
    let year_month = base.event_timestamp.as_ref().map(year_month);
    let search_hour = base.event_timestamp.map(|ts| ts.time().hour());
    let search_weekday = base
        .event_timestamp
        .map(|ts| weekday_name(ts.date().weekday()));

    let trip_duration_days = match (base.check_in, base.check_out) {
        (Some(check_in), Some(check_out)) => Some((check_out - check_in).num_days()),
        _ => None,
    };

    let booking_window_days = match (base.check_in, base.event_timestamp) {
        (Some(check_in), Some(timestamp)) => Some(whole_days_until(check_in, timestamp)),
        _ => None,
    };

    let travel_group = travel_group(base.adult_count, base.child_count);
    let duration_category = trip_duration_days.map(duration_category);
    let window_category = booking_window_days.map(window_category);
    let trip_type = trip_duration_days.map(trip_type);
    let device_package = device_package(base.is_mobile, base.is_package);
    let distance_category = base
        .origin_destination_distance
        .filter(|d| d.is_finite())
        .map(distance_category);

    EnrichedRecord {
        base,
        year_month,
        trip_duration_days,
        booking_window_days,
        travel_group,
        duration_category,
        window_category,
        device_package,
        distance_category,
        search_hour,
        search_weekday,
        trip_type,
    }
}

/// Derive the features of every record. Records are independent; no rule
/// looks across rows.
pub fn derive_features(records: Vec<SearchRecord>) -> Vec<EnrichedRecord> {
    records.into_iter().map(derive_record).collect()
}
