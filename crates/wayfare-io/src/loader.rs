//! CSV search-log loader

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use wayfare_core::SearchRecord;

use crate::schema::ColumnIndices;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors that can occur while loading the search log
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Required column not found: {0}")]
    MissingColumn(&'static str),

    #[error("Malformed {column} value {value:?} at line {line}")]
    Cell {
        line: u64,
        column: &'static str,
        value: String,
    },
}

/// Result type for load operations
pub type LoadResult<T> = Result<T, LoadError>;

/// Load the search log from a CSV file on disk.
pub fn load_path(path: &str) -> LoadResult<Vec<SearchRecord>> {
    if !Path::new(path).exists() {
        return Err(LoadError::FileNotFound(path.to_string()));
    }

    let file = File::open(path).map_err(|e| LoadError::OpenFailed(e.to_string()))?;
    let records = load_reader(BufReader::new(file))?;
    tracing::info!(path, records = records.len(), "loaded search log");
    Ok(records)
}

/// Load the search log from any reader. Used directly by tests and by
/// callers that already hold the bytes.
pub fn load_reader<R: Read>(reader: R) -> LoadResult<Vec<SearchRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| LoadError::InvalidFormat(e.to_string()))?;
    let indices = ColumnIndices::resolve(headers)?;

    let mut records = Vec::new();
    let mut bad_timestamps = 0usize;

    for result in csv_reader.records() {
        let row = result.map_err(|e| LoadError::InvalidFormat(e.to_string()))?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let cell = |index: usize| row.get(index).unwrap_or("").trim();

        let event_timestamp = parse_datetime(cell(indices.date_time));
        let check_in = parse_date(cell(indices.check_in));
        let check_out = parse_date(cell(indices.check_out));

        if timestamp_was_dropped(cell(indices.date_time), event_timestamp.is_some())
            || timestamp_was_dropped(cell(indices.check_in), check_in.is_some())
            || timestamp_was_dropped(cell(indices.check_out), check_out.is_some())
        {
            bad_timestamps += 1;
        }

        records.push(SearchRecord {
            event_timestamp,
            check_in,
            check_out,
            is_mobile: parse_flag(cell(indices.is_mobile), line, "is_mobile")?,
            is_package: parse_flag(cell(indices.is_package), line, "is_package")?,
            is_booking: parse_flag(cell(indices.is_booking), line, "is_booking")?,
            adult_count: parse_count(cell(indices.adult_count), line, "srch_adults_cnt")?,
            child_count: parse_count(cell(indices.child_count), line, "srch_children_cnt")?,
            room_count: parse_count(cell(indices.room_count), line, "srch_rm_cnt")?,
            origin_destination_distance: parse_distance(cell(indices.distance)),
            user_country: parse_code(cell(indices.user_country), line, "user_location_country")?,
            channel: parse_code(cell(indices.channel), line, "channel")?,
            hotel_market: parse_code(cell(indices.hotel_market), line, "hotel_market")?,
        });
    }

    if bad_timestamps > 0 {
        tracing::warn!(
            count = bad_timestamps,
            "records with unparseable timestamps kept with undefined calendar fields"
        );
    }

    Ok(records)
}

/// A non-empty timestamp cell that failed to parse is worth counting;
/// an empty cell is just an absent value.
fn timestamp_was_dropped(raw: &str, parsed: bool) -> bool {
    !raw.is_empty() && !parsed
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    if value.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

fn parse_distance(value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|d| d.is_finite())
}

fn parse_flag(value: &str, line: u64, column: &'static str) -> LoadResult<bool> {
    match value {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(LoadError::Cell {
            line,
            column,
            value: value.to_string(),
        }),
    }
}

fn parse_count(value: &str, line: u64, column: &'static str) -> LoadResult<u32> {
    value.parse::<u32>().map_err(|_| LoadError::Cell {
        line,
        column,
        value: value.to_string(),
    })
}

fn parse_code(value: &str, line: u64, column: &'static str) -> LoadResult<i64> {
    value.parse::<i64>().map_err(|_| LoadError::Cell {
        line,
        column,
        value: value.to_string(),
    })
}
