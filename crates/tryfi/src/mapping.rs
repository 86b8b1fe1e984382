//! Shared helpers for turning vendor fields into record fields.
//!
//! All of these are pure: the fetch time is passed in rather than read from
//! the clock, so the same payload always maps to the same record.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::TryFiError;

/// Parse an ISO-8601 timestamp (`Z`, offset, or naive UTC).
pub fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>, TryFiError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| {
            TryFiError::MalformedResponse(format!("invalid {} timestamp '{}': {}", field, value, e))
        })
}

/// Parse an optional timestamp, keeping `None` as `None`.
pub fn parse_optional_timestamp(
    field: &str,
    value: Option<&str>,
) -> Result<Option<DateTime<Utc>>, TryFiError> {
    value.map(|v| parse_timestamp(field, v)).transpose()
}

/// When the collar LED switches itself off. A missing value means "now".
pub fn led_off_at(value: Option<&str>, now: DateTime<Utc>) -> Result<DateTime<Utc>, TryFiError> {
    match value {
        Some(v) => parse_timestamp("ledOffAt", v),
        None => Ok(now),
    }
}

/// The vendor keeps `ledEnabled` set after the LED timer has expired, so the
/// LED only counts as on while `now` is before the off time.
pub fn accurate_led_status(led_enabled: bool, led_off_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    led_enabled && now < led_off_at
}

/// Battery readings arrive as floats on some firmware.
pub fn battery_percent(value: Option<f64>) -> Option<u8> {
    value
        .filter(|v| v.is_finite())
        .map(|v| v.round().clamp(0.0, 100.0) as u8)
}
