//! Date helpers for the fixed `YYYY-MM-DD` wire and store format

use chrono::{Duration, NaiveDate};

use crate::{ClimateError, Result};

/// Wire and store date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The date exactly 365 days earlier. Leap days are not special-cased.
#[must_use]
pub fn one_year_before(date: NaiveDate) -> NaiveDate {
    date - Duration::days(365)
}

/// Parse a date that must be exactly `YYYY-MM-DD`, zero-padded.
///
/// chrono alone accepts unpadded fields such as `2021-1-1`, so the shape is
/// checked before the calendar day is validated.
pub fn parse_strict_date(input: &str) -> Result<NaiveDate> {
    let bytes = input.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return Err(ClimateError::parse(input, "expected YYYY-MM-DD"));
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|e| ClimateError::parse(input, e.to_string()))
}

/// Render a date in the store format
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
