//! Date and timestamp conventions
//!
//! Dates are stored as `YYYY-MM-DD`. Timestamps are stored as UTC
//! `YYYY-MM-DDTHH:MM:SS`. Parsing is lenient because seeded rows, form input
//! and older images use slightly different shapes (`Z` suffix, fractional
//! seconds, minute precision).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};

use crate::errors::{CmmsError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Current UTC time truncated to whole seconds
pub fn now() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(0).unwrap_or(now)
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Lenient timestamp parse; date-only input means midnight
pub fn parse_timestamp_lenient(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    let unzoned = raw.trim_end_matches('Z');
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(unzoned, fmt) {
            return Some(ts);
        }
    }
    parse_date_lenient(raw).and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Lenient date parse; a full timestamp is truncated to its calendar date
pub fn parse_date_lenient(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()
}

/// Strict date parse for input boundaries
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| CmmsError::InvalidDate {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// Optional date from form input: blank means "no date", never `""`
pub fn parse_optional_date(field: &str, raw: &str) -> Result<Option<NaiveDate>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_date(field, raw).map(Some)
}

/// Strict timestamp parse for input boundaries
pub fn parse_timestamp(field: &str, raw: &str) -> Result<NaiveDateTime> {
    parse_timestamp_lenient(raw).ok_or_else(|| CmmsError::InvalidTimestamp {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// Render a duration as `"<hours>h <minutes>m"`
pub fn format_duration(duration: chrono::Duration) -> String {
    let total_minutes = duration.num_minutes().max(0);
    format!("{}h {}m", total_minutes / 60, total_minutes % 60)
}
