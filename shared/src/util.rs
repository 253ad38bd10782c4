use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Current UTC timestamp (milliseconds)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current UTC time as RFC 3339 with milliseconds, e.g. `2024-05-01T08:30:00.000Z`
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Display format for history timestamps (`HH:MM:SS DD/MM/YYYY`)
pub const DISPLAY_FORMAT: &str = "%H:%M:%S %d/%m/%Y";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

/// Best-effort timestamp parse.
///
/// Values carrying an offset are converted into `offset`; naive values are
/// taken to already be in `offset`.
pub fn parse_timestamp(raw: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&offset));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&offset));
    }
    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    naive.and_local_timezone(offset).single()
}

/// Render `raw` for display, or hand it back unchanged if it is not a date
pub fn format_timestamp(raw: &str, offset: FixedOffset) -> String {
    match parse_timestamp(raw, offset) {
        Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        None => raw.to_string(),
    }
}
