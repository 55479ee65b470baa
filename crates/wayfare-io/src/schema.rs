//! Source-file column layout

use crate::loader::{LoadError, LoadResult};

/// Header names of the columns the loader consumes. The source file may
/// carry any number of additional columns; they are ignored.
pub mod columns {
    pub const DATE_TIME: &str = "date_time";
    pub const CHECK_IN: &str = "srch_ci";
    pub const CHECK_OUT: &str = "srch_co";
    pub const IS_MOBILE: &str = "is_mobile";
    pub const IS_PACKAGE: &str = "is_package";
    pub const IS_BOOKING: &str = "is_booking";
    pub const ADULT_COUNT: &str = "srch_adults_cnt";
    pub const CHILD_COUNT: &str = "srch_children_cnt";
    pub const ROOM_COUNT: &str = "srch_rm_cnt";
    pub const DISTANCE: &str = "orig_destination_distance";
    pub const USER_COUNTRY: &str = "user_location_country";
    pub const CHANNEL: &str = "channel";
    pub const HOTEL_MARKET: &str = "hotel_market";
}

/// Resolved positions of the required columns within the header row.
#[derive(Debug, Clone, Copy)]
pub struct ColumnIndices {
    pub date_time: usize,
    pub check_in: usize,
    pub check_out: usize,
    pub is_mobile: usize,
    pub is_package: usize,
    pub is_booking: usize,
    pub adult_count: usize,
    pub child_count: usize,
    pub room_count: usize,
    pub distance: usize,
    pub user_country: usize,
    pub channel: usize,
    pub hotel_market: usize,
}

impl ColumnIndices {
    /// Locate every required column in the header row. A missing column is
    /// an integration error and fails the load immediately.
    pub fn resolve(headers: &csv::StringRecord) -> LoadResult<Self> {
        let index_of = |name: &'static str| -> LoadResult<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(LoadError::MissingColumn(name))
        };

        Ok(Self {
            date_time: index_of(columns::DATE_TIME)?,
            check_in: index_of(columns::CHECK_IN)?,
            check_out: index_of(columns::CHECK_OUT)?,
            is_mobile: index_of(columns::IS_MOBILE)?,
            is_package: index_of(columns::IS_PACKAGE)?,
            is_booking: index_of(columns::IS_BOOKING)?,
            adult_count: index_of(columns::ADULT_COUNT)?,
            child_count: index_of(columns::CHILD_COUNT)?,
            room_count: index_of(columns::ROOM_COUNT)?,
            distance: index_of(columns::DISTANCE)?,
            user_country: index_of(columns::USER_COUNTRY)?,
            channel: index_of(columns::CHANNEL)?,
            hotel_market: index_of(columns::HOTEL_MARKET)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_ignores_extra_columns() {
        let headers = csv::StringRecord::from(vec![
            "site_name",
            "date_time",
            "srch_ci",
            "srch_co",
            "user_id",
            "is_mobile",
            "is_package",
            "is_booking",
            "srch_adults_cnt",
            "srch_children_cnt",
            "srch_rm_cnt",
            "orig_destination_distance",
            "user_location_country",
            "channel",
            "hotel_market",
        ]);

        let indices = ColumnIndices::resolve(&headers).unwrap();
        assert_eq!(indices.date_time, 1);
        assert_eq!(indices.is_mobile, 5);
        assert_eq!(indices.hotel_market, 14);
    }

    #[test]
    fn test_resolve_reports_missing_column() {
        let headers = csv::StringRecord::from(vec!["date_time", "srch_ci"]);
        let err = ColumnIndices::resolve(&headers).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(_)));
    }
}
