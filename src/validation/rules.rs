//! Reusable field rules
//!
//! Each rule inspects an already-sanitized value and reports whether it
//! passed. Messages are attached by the per-entity form definitions.

use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

static ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Za-z]+$").expect("valid alphanumeric pattern"));

/// Non-empty after trimming
pub fn not_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// At least `min` characters
pub fn min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

/// ASCII letters and digits only. The empty string fails.
pub fn alphanumeric(value: &str) -> bool {
    ALPHANUMERIC.is_match(value)
}

/// Parse an optional ISO 8601 date.
///
/// Empty input is "not provided" and yields `Ok(None)`. Accepts a plain
/// calendar date or a full RFC 3339 timestamp (its date part is kept).
pub fn optional_date(value: &str) -> Result<Option<NaiveDate>, ()> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(value)
        .map(|ts| Some(ts.date_naive()))
        .map_err(|_| ())
}

/// Parse an optional record identifier. Empty input yields `Ok(None)`.
pub fn optional_reference(value: &str) -> Result<Option<Uuid>, ()> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    Uuid::parse_str(value).map(Some).map_err(|_| ())
}
