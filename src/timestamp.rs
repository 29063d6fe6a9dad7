use chrono::{Duration, NaiveDate, NaiveTime};

pub const MISSING_SENTINEL: &str = "Invalid";
pub const PARSE_SENTINEL: &str = "Error";

const DISPLAY_FORMAT: &str = "%A, %B %-d, %Y %-I:%M %p";

/// Format `date` (`YYYY-MM-DD`) plus `time` (24-hour `HH:MM`) shifted by
/// `offset_minutes` as a fixed-locale display string, e.g.
/// `Friday, March 1, 2024 9:05 AM`.
///
/// This is a display field, not a control value: missing input yields
/// `"Invalid"` and unparsable input yields `"Error"` so rendering stays
/// usable with a partially filled profile. Minute arithmetic is delegated
/// to chrono, so rollover across hour/day/month/year boundaries is
/// calendar-correct.
pub fn format_timestamp(date: &str, time: &str, offset_minutes: i64) -> String {
    if date.trim().is_empty() || time.trim().is_empty() {
        return MISSING_SENTINEL.to_string();
    }

    let parsed_date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d");
    let parsed_time = NaiveTime::parse_from_str(time.trim(), "%H:%M");

    let (d, t) = match (parsed_date, parsed_time) {
        (Ok(d), Ok(t)) => (d, t),
        (d, t) => {
            log::warn!(
                "unparsable base instant: date={date:?} ({d:?}) time={time:?} ({t:?})"
            );
            return PARSE_SENTINEL.to_string();
        }
    };

    match d.and_time(t).checked_add_signed(Duration::minutes(offset_minutes)) {
        Some(instant) => instant.format(DISPLAY_FORMAT).to_string(),
        None => PARSE_SENTINEL.to_string(),
    }
}
