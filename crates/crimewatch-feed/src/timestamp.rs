//! Occurrence-time formatting for incident cards.
//!
//! Times render in the viewer's local zone as `M/D/YYYY, h:MM:SS AM`.
//! Input that cannot be read as a time renders as [`INVALID_DATE`] rather
//! than failing; nothing upstream validates the field.

use crate::record::OccurredAt;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Placeholder shown for unreadable or missing timestamps.
pub const INVALID_DATE: &str = "Invalid Date";

const DISPLAY_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Zone-less layouts, interpreted in the display zone.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

impl OccurredAt {
    /// Resolve to an instant in `tz`, or `None` if unreadable.
    ///
    /// Strings with an offset (RFC 3339 / RFC 2822) keep their instant.
    /// Zone-less date-times are taken as wall-clock time in `tz`. A bare
    /// date is midnight UTC.
    pub fn resolve<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        match self {
            OccurredAt::EpochMillis(ms) => {
                DateTime::from_timestamp_millis(*ms).map(|t| t.with_timezone(tz))
            }
            OccurredAt::Text(text) => parse_text(text.trim(), tz),
            OccurredAt::Other(_) | OccurredAt::Missing => None,
        }
    }
}

fn parse_text<Tz: TimeZone>(text: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    if text.is_empty() {
        return None;
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(text) {
        return Some(t.with_timezone(tz));
    }
    if let Ok(t) = DateTime::parse_from_rfc2822(text) {
        return Some(t.with_timezone(tz));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return tz.from_local_datetime(&naive).earliest();
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().with_timezone(tz))
}

/// Format for display in the local zone.
pub fn format_occurred(occurred: &OccurredAt) -> String {
    format_occurred_in(occurred, &Local)
}

/// Format for display in an explicit zone.
pub fn format_occurred_in<Tz>(occurred: &OccurredAt, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match occurred.resolve(tz) {
        Some(t) => t.format(DISPLAY_FORMAT).to_string(),
        None => INVALID_DATE.to_string(),
    }
}
