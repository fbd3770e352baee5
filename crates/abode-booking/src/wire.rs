//! Wire-format date/time parsing for viewing requests.
//!
//! Requests arrive as two strings: a date (`YYYY-MM-DD`) and a 24-hour time
//! (`HH:MM`). Timestamps are interpreted as UTC.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::BookingError;

/// Parse a wire-format date and time into a UTC timestamp.
///
/// Parse failures are reported as `MalformedDateTime`; whether the result
/// lies in the past is the scheduler's concern, not this function's.
pub fn parse_viewing_datetime(date: &str, time: &str) -> Result<DateTime<Utc>, BookingError> {
    let malformed = || BookingError::MalformedDateTime {
        input: format!("{} {}", date, time),
    };

    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| malformed())?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M").map_err(|_| malformed())?;

    Ok(date.and_time(time).and_utc())
}
