//! Stored text → domain values
//!
//! Rows written by older builds or edited by hand may carry dates in other
//! shapes. These helpers never fail: they fall back and log.

use chrono::{NaiveDate, NaiveDateTime};
use cmms_core::time;

pub(crate) fn required_date(table: &str, id: &str, column: &str, raw: &str) -> NaiveDate {
    time::parse_date_lenient(raw).unwrap_or_else(|| {
        unreadable(table, id, column, raw);
        NaiveDate::default()
    })
}

pub(crate) fn optional_date(
    table: &str,
    id: &str,
    column: &str,
    raw: Option<String>,
) -> Option<NaiveDate> {
    let raw = raw.filter(|r| !r.trim().is_empty())?;
    let parsed = time::parse_date_lenient(&raw);
    if parsed.is_none() {
        unreadable(table, id, column, &raw);
    }
    parsed
}

pub(crate) fn required_timestamp(table: &str, id: &str, column: &str, raw: &str) -> NaiveDateTime {
    time::parse_timestamp_lenient(raw).unwrap_or_else(|| {
        unreadable(table, id, column, raw);
        NaiveDateTime::default()
    })
}

pub(crate) fn optional_timestamp(
    table: &str,
    id: &str,
    column: &str,
    raw: Option<String>,
) -> Option<NaiveDateTime> {
    let raw = raw.filter(|r| !r.trim().is_empty())?;
    let parsed = time::parse_timestamp_lenient(&raw);
    if parsed.is_none() {
        unreadable(table, id, column, &raw);
    }
    parsed
}

fn unreadable(table: &str, id: &str, column: &str, raw: &str) {
    tracing::warn!(
        entity = table,
        record_id = id,
        column = column,
        value = raw,
        "unreadable stored date, using fallback"
    );
}

/// Optional date for storage; `None` becomes NULL, never ""
pub(crate) fn date_param(date: Option<NaiveDate>) -> Option<String> {
    date.map(time::format_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamps_truncate_to_dates() {
        assert_eq!(
            required_date("tickets", "t", "created_at", "2024-01-20T09:00:00"),
            NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
        );
        assert_eq!(
            required_date("tickets", "t", "created_at", "2024-01-20T09:00:00.000Z"),
            NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
        );
    }

    #[test]
    fn test_required_fallback_is_epoch() {
        let date = required_date("equipments", "e", "installation_date", "soon");
        assert_eq!(date, NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
        let ts = required_timestamp("downtimes", "d", "start_time", "");
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
    }

    #[test]
    fn test_optional_blank_and_garbage_are_none() {
        assert_eq!(optional_date("spare_parts", "s", "acquisition_date", None), None);
        assert_eq!(
            optional_date("spare_parts", "s", "acquisition_date", Some(String::new())),
            None
        );
        assert_eq!(
            optional_timestamp("downtimes", "d", "end_time", Some("n/a".to_string())),
            None
        );
    }

    #[test]
    fn test_iso_timestamp_with_zone_is_read() {
        let ts = optional_timestamp(
            "downtimes",
            "d",
            "end_time",
            Some("2024-01-12T14:00:00.000Z".to_string()),
        )
        .unwrap();
        assert_eq!(time::format_timestamp(ts), "2024-01-12T14:00:00");
    }
}
