use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Parse a stored comment date into the viewer's local calendar date. Accepts
/// RFC 3339 as well as the minute-precision (`2018-10-25T16:30Z`) and
/// date-only forms found in seeded data.
pub fn parse_comment_date(raw: &str) -> Option<NaiveDate> {
    parse_comment_date_in(raw, &Local)
}

/// Like [`parse_comment_date`], with the calendar date taken in `tz`.
/// Timestamps without an offset are already calendar dates and are not shifted.
pub fn parse_comment_date_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz).date_naive());
    }

    for fmt in ["%Y-%m-%dT%H:%MZ", "%Y-%m-%dT%H:%M:%S%.fZ"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.and_utc().with_timezone(tz).date_naive());
        }
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Format a comment date as `Oct 04, 2018` in local time. Unparseable input is
/// returned as-is.
pub fn format_comment_date(raw: &str) -> String {
    format_comment_date_in(raw, &Local)
}

pub fn format_comment_date_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String {
    match parse_comment_date_in(raw, tz) {
        Some(date) => date.format("%b %d, %Y").to_string(),
        None => raw.to_string(),
    }
}
