//! Date normalization: any date-like input down to a canonical,
//! zone-naive, day-granularity [`NaiveDate`].
//!
//! Every other component assumes dates have passed through here, so
//! time-zone handling lives in exactly one place.

use crate::domain::error::TradesimError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Plain date formats tried before any date-time interpretation.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// Zone-naive date-time formats; truncated directly to the day.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Zone-bearing variant with a space separator, as written by common
/// dividend exports. The RFC 3339 form is handled separately.
const ZONED_FORMATS: [&str; 1] = ["%Y-%m-%d %H:%M:%S%.f%z"];

/// Normalize a date-like string to a canonical day.
///
/// Zone-bearing input (RFC 3339) is converted to a zone-naive UTC
/// instant before truncation; zone-naive input is truncated directly.
pub fn normalize(input: &str) -> Result<NaiveDate, TradesimError> {
    let trimmed = input.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt.date());
        }
    }

    for format in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, format) {
            return Ok(dt.naive_utc().date());
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_utc().date());
    }

    Err(TradesimError::DateParse {
        input: input.to_string(),
    })
}
