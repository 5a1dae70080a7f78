//! Calendar Feature Module
//! Timestamp parsing and calendar-part extraction.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;
use thiserror::Error;

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid timestamp: {value:?}")]
pub struct TimestampError {
    pub value: String,
}

/// Parse a source timestamp. Date-only values resolve to midnight.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, TimestampError> {
    let value = value.trim();

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| TimestampError {
            value: value.to_string(),
        })
}

/// Calendar parts of a timestamp.
///
/// `year`, `month`, `dayofweek` and `hour` are the derived table columns;
/// `day`, `minute` and `second` are kept so the timestamp can be rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarParts {
    pub year: i32,
    /// 1-12
    pub month: u32,
    pub day: u32,
    /// 0 = Monday .. 6 = Sunday
    pub dayofweek: u32,
    /// 0-23
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CalendarParts {
    pub fn from_timestamp(time: &NaiveDateTime) -> Self {
        Self {
            year: time.year(),
            month: time.month(),
            day: time.day(),
            dayofweek: time.weekday().num_days_from_monday(),
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rebuild(parts: &CalendarParts) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(parts.year, parts.month, parts.day)?
            .and_hms_opt(parts.hour, parts.minute, parts.second)
    }

    #[test]
    fn test_parse_source_format() {
        let t = parse_timestamp("2015-01-04 00:00:00").unwrap();
        assert_eq!(t.to_string(), "2015-01-04 00:00:00");
    }

    #[test]
    fn test_parse_iso_and_fraction_and_date_only() {
        assert!(parse_timestamp("2015-01-04T13:00:00").is_ok());
        assert!(parse_timestamp("2015-01-04 13:00:00.250").is_ok());
        let midnight = parse_timestamp("2016-07-09").unwrap();
        assert_eq!(midnight.hour(), 0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            parse_timestamp("yesterday"),
            Err(TimestampError {
                value: "yesterday".to_string()
            })
        );
        assert!(parse_timestamp("2015-02-30 00:00:00").is_err());
        assert!(parse_timestamp("2015-01-04 25:00:00").is_err());
    }

    #[test]
    fn test_calendar_parts_of_scenario_row() {
        let t = parse_timestamp("2015-01-04 00:00:00").unwrap();
        let parts = CalendarParts::from_timestamp(&t);
        assert_eq!(parts.year, 2015);
        assert_eq!(parts.month, 1);
        assert_eq!(parts.dayofweek, 6);
        assert_eq!(parts.hour, 0);
    }

    #[test]
    fn test_monday_is_zero() {
        let t = parse_timestamp("2015-01-05 08:00:00").unwrap();
        assert_eq!(CalendarParts::from_timestamp(&t).dayofweek, 0);
    }

    #[test]
    fn test_round_trip_over_two_years_of_hours() {
        let mut t = parse_timestamp("2015-01-04 00:00:00").unwrap();
        let end = parse_timestamp("2017-01-03 23:00:00").unwrap();
        while t <= end {
            let parts = CalendarParts::from_timestamp(&t);
            assert!((1..=12).contains(&parts.month));
            assert!(parts.dayofweek <= 6);
            assert!(parts.hour <= 23);
            assert_eq!(rebuild(&parts), Some(t));
            t += chrono::Duration::hours(1);
        }
    }
}
