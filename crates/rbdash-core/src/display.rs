//! Date display helpers

use std::fmt::Write;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Locale-style short date (`%x`), the terminal analogue of a browser's
/// `toLocaleDateString()`
pub const DEFAULT_DATE_FORMAT: &str = "%x";

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Render a `created_at` value as a date in the viewer's local time zone.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS[.fff]` timestamps
/// (interpreted as local time) and bare `YYYY-MM-DD` dates. Unparseable input
/// is returned verbatim. An invalid `format` falls back to `%Y-%m-%d`.
pub fn format_created_date(raw: &str, format: &str) -> String {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return render(&dt.with_timezone(&Local).date_naive(), format);
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            let local = Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.date_naive())
                .unwrap_or_else(|| naive.date());
            return render(&local, format);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return render(&date, format);
    }

    raw.to_string()
}

fn render(date: &NaiveDate, format: &str) -> String {
    let mut out = String::new();
    // `to_string()` would panic on a bad format string; `write!` reports it
    if write!(out, "{}", date.format(format)).is_ok() {
        return out;
    }
    date.format(FALLBACK_DATE_FORMAT).to_string()
}
