//! Conversion between launch date strings and stored epoch seconds.
//!
//! Launch dates arrive from forms as `YYYY-MM-DDTHH:MM` (the format produced by
//! an HTML `datetime-local` input) and are stored as integer epoch seconds.
//! Zone-less input is taken to be UTC.

use chrono::{DateTime, NaiveDateTime};

use crate::error::{Error, Result};

/// Format accepted by [`parse_time_from_str`].
pub const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Format produced by [`parse_time_from_int`].
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z UTC";

/// Parse a `YYYY-MM-DDTHH:MM` string into epoch seconds.
///
/// # Errors
///
/// Returns [`Error::InvalidTimestamp`] if the input doesn't match the format.
pub fn parse_time_from_str(input: &str) -> Result<i64> {
    let parsed = NaiveDateTime::parse_from_str(input.trim(), INPUT_FORMAT).map_err(|source| {
        Error::InvalidTimestamp {
            input: input.to_string(),
            source,
        }
    })?;
    Ok(parsed.and_utc().timestamp())
}

/// Render epoch seconds as a human-readable UTC string.
///
/// Timestamps outside chrono's representable range are rendered as the raw
/// number.
#[must_use]
pub fn parse_time_from_int(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0).map_or_else(
        || timestamp.to_string(),
        |dt| dt.format(DISPLAY_FORMAT).to_string(),
    )
}
