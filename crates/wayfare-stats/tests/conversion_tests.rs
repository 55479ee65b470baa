//! Aggregation integration tests
//!
//! Exercises the whole pipeline: CSV text through the loader, one derive
//! pass into a `Dataset`, then grouped summaries and crosstabs.

use chrono::NaiveDate;

use wayfare_core::{Dataset, SearchRecord};
use wayfare_stats::{
    aggregate, aggregate_by_name, crosstab, mobile_growth_percent, monthly_summary, GroupKey,
    Overview,
};

fn record(
    ymd: (i32, u32, u32),
    stay: Option<(u32, u32)>,
    is_mobile: bool,
    is_booking: bool,
    adults: u32,
    children: u32,
) -> SearchRecord {
    let (y, m, d) = ymd;
    let event = NaiveDate::from_ymd_opt(y, m, d).and_then(|d| d.and_hms_opt(9, 30, 0));
    let (check_in, check_out) = match stay {
        Some((in_d, out_d)) => (
            NaiveDate::from_ymd_opt(y, m, in_d),
            NaiveDate::from_ymd_opt(y, m, out_d),
        ),
        None => (None, None),
    };

    SearchRecord {
        event_timestamp: event,
        check_in,
        check_out,
        is_mobile,
        is_booking,
        adult_count: adults,
        child_count: children,
        ..Default::default()
    }
}

fn sample_dataset() -> Dataset {
    Dataset::derive(vec![
        record((2014, 3, 1), Some((10, 13)), false, true, 1, 0),
        record((2014, 3, 2), Some((20, 27)), true, false, 2, 0),
        record((2014, 3, 3), None, true, false, 2, 2),
        record((2014, 4, 5), Some((12, 14)), false, true, 1, 1),
        record((2014, 4, 6), Some((10, 28)), false, false, 5, 0),
    ])
}

// === Mass balance ===

#[test]
fn test_group_totals_match_dataset_totals() {
    let dataset = sample_dataset();
    let overview = Overview::of(&dataset);

    // travel_group is defined for every record
    let by_group = aggregate(&dataset, GroupKey::TravelGroup);
    assert_eq!(by_group.total_searches(), overview.total_searches);
    assert_eq!(by_group.total_bookings(), overview.total_bookings);

    // duration_category is undefined for the record with no stay dates
    let by_duration = aggregate(&dataset, GroupKey::DurationCategory);
    assert_eq!(by_duration.total_searches(), 4);
    assert_eq!(by_duration.total_bookings(), 2);
}

#[test]
fn test_each_record_lands_in_exactly_one_group() {
    let dataset = sample_dataset();
    for key in GroupKey::ALL {
        let summary = aggregate(&dataset, key);
        let defined = dataset
            .records()
            .iter()
            .filter(|r| key.value(r).is_some())
            .count() as u64;
        assert_eq!(
            summary.total_searches(),
            defined,
            "partition sizes must sum to the defined-record count for {key}",
        );
    }
}

// === Idempotence ===

#[test]
fn test_aggregation_is_idempotent() {
    let dataset = sample_dataset();
    for key in GroupKey::ALL {
        assert_eq!(aggregate(&dataset, key), aggregate(&dataset, key));
    }
    assert_eq!(
        crosstab(&dataset, GroupKey::Device, GroupKey::TravelGroup),
        crosstab(&dataset, GroupKey::Device, GroupKey::TravelGroup)
    );
}

// === Grouping semantics ===

#[test]
fn test_travel_groups_in_sample() {
    let summary = aggregate(&sample_dataset(), GroupKey::TravelGroup);
    assert_eq!(summary.get("Solo").unwrap().searches, 1);
    assert_eq!(summary.get("Couple").unwrap().searches, 1);
    assert_eq!(summary.get("Family").unwrap().searches, 1);
    assert_eq!(summary.get("Single Parent").unwrap().searches, 1);
    assert_eq!(summary.get("Group").unwrap().searches, 1);
    assert!(summary.get("Other").is_none());
}

#[test]
fn test_duration_buckets_in_sample() {
    let summary = aggregate(&sample_dataset(), GroupKey::DurationCategory);
    assert_eq!(summary.get("1-3 days").unwrap().searches, 2);
    assert_eq!(summary.get("4-7 days").unwrap().searches, 1);
    assert_eq!(summary.get("15+ days").unwrap().searches, 1);
}

#[test]
fn test_monthly_summary_and_mobile_growth() {
    let rows = monthly_summary(&sample_dataset());
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].year_month, "2014-03");
    assert_eq!(rows[0].searches, 3);
    assert_eq!(rows[0].mobile_searches, 2);
    assert_eq!(rows[1].year_month, "2014-04");
    assert_eq!(rows[1].mobile_searches, 0);

    // share drops to zero; relative growth is -100%
    assert_eq!(mobile_growth_percent(&rows), Some(-100.0));
}

// === Full pipeline from CSV text ===

#[test]
fn test_csv_to_summary_end_to_end() {
    let csv = "\
date_time,site_name,user_location_country,orig_destination_distance,is_mobile,is_package,channel,srch_ci,srch_co,srch_adults_cnt,srch_children_cnt,srch_rm_cnt,is_booking,hotel_market
2014-08-11 07:46:59,2,66,2234.264,1,1,9,2014-08-27,2014-08-31,2,0,1,1,628
2014-08-11 08:22:12,2,66,,1,1,9,2014-08-29,2014-08-30,2,0,1,0,628
2014-08-12 09:10:00,2,3,913.193,0,0,1,2014-09-14,2014-09-16,1,0,1,1,110
2014-08-12 10:00:30,2,3,511.0,0,0,1,bad-date,2014-09-16,1,0,1,1,110
";

    let records = wayfare_io::load_reader(csv.as_bytes()).unwrap();
    assert_eq!(records.len(), 4);
    let dataset = Dataset::derive(records);

    let summary = aggregate_by_name(&dataset, "device_package").unwrap();
    let mobile = summary.get("Mobile, Package").unwrap();
    assert_eq!(mobile.searches, 2);
    assert_eq!(mobile.bookings, 1);
    assert_eq!(mobile.conversion_rate, 50.0);

    let desktop = summary.get("Desktop, Non-Package").unwrap();
    assert_eq!(desktop.searches, 2);
    assert_eq!(desktop.bookings, 2);
    assert_eq!(desktop.conversion_rate, 100.0);

    // the bad check-in only drops that record's window grouping
    let by_window = aggregate_by_name(&dataset, "window_category").unwrap();
    assert_eq!(by_window.total_searches(), 3);

    assert!(aggregate_by_name(&dataset, "not_a_key").is_err());
}

// === Boundary behavior ===

#[test]
fn test_empty_dataset_everywhere() {
    let dataset = Dataset::derive(Vec::new());

    assert_eq!(Overview::of(&dataset), Overview::default());
    assert!(monthly_summary(&dataset).is_empty());
    for key in GroupKey::ALL {
        assert!(aggregate(&dataset, key).is_empty());
    }
}
