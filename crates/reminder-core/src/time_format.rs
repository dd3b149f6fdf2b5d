//! Time-of-day parsing and display.
//!
//! Reminders carry the time exactly as the user typed it. Display goes through
//! [`format_time`], which never fails: anything that cannot be read as an
//! hour and minute renders as [`PLACEHOLDER`].

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Shown in place of a time that could not be parsed.
pub const PLACEHOLDER: &str = "--:--";

const CLOCK_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S", "%I:%M%p", "%I:%M:%S%p"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Clock style used when rendering a reminder's time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "24h")]
    #[strum(to_string = "24h")]
    TwentyFourHour,
    #[serde(rename = "12h")]
    #[strum(to_string = "12h")]
    TwelveHour,
}

impl TimeFormat {
    /// Render a time of day, e.g. `14:05` or `02:05 PM`.
    pub fn format(self, time: NaiveTime) -> String {
        match self {
            Self::TwentyFourHour => time.format("%H:%M").to_string(),
            Self::TwelveHour => time.format("%I:%M %p").to_string(),
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::TwentyFourHour => Self::TwelveHour,
            Self::TwelveHour => Self::TwentyFourHour,
        }
    }
}

/// Parse a user-entered time of day.
///
/// Accepts `14:05`, `9:05`, `14:05:30`, `2:05 pm`, `02:05PM`, `2 pm` and
/// ISO-like date-times (`2024-03-01T14:05`), keeping only the time part.
/// Seconds are dropped so reminders stay at minute granularity.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(time) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|dt| dt.time())
    {
        return truncate_seconds(time);
    }

    let mut compact: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    // "2PM" -> "2:00PM"
    if !compact.contains(':') && (compact.ends_with("AM") || compact.ends_with("PM")) {
        compact.insert_str(compact.len() - 2, ":00");
    }

    CLOCK_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&compact, fmt).ok())
        .and_then(truncate_seconds)
}

/// Parse and render in one step, falling back to [`PLACEHOLDER`].
pub fn format_time(raw: &str, format: TimeFormat) -> String {
    match parse_time(raw) {
        Some(time) => format.format(time),
        None => PLACEHOLDER.to_string(),
    }
}

fn truncate_seconds(time: NaiveTime) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn formats_both_clock_styles() {
        assert_eq!(TimeFormat::TwentyFourHour.format(hm(14, 5)), "14:05");
        assert_eq!(TimeFormat::TwelveHour.format(hm(14, 5)), "02:05 PM");
        assert_eq!(TimeFormat::TwelveHour.format(hm(0, 30)), "12:30 AM");
    }

    #[test]
    fn parses_common_inputs() {
        assert_eq!(parse_time("14:05"), Some(hm(14, 5)));
        assert_eq!(parse_time(" 9:05 "), Some(hm(9, 5)));
        assert_eq!(parse_time("14:05:59"), Some(hm(14, 5)));
        assert_eq!(parse_time("2:05 pm"), Some(hm(14, 5)));
        assert_eq!(parse_time("02:05PM"), Some(hm(14, 5)));
        assert_eq!(parse_time("12:15 am"), Some(hm(0, 15)));
        assert_eq!(parse_time("2 pm"), Some(hm(14, 0)));
        assert_eq!(parse_time("2024-03-01T14:05"), Some(hm(14, 5)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_time(""), None);
        assert_eq!(parse_time("   "), None);
        assert_eq!(parse_time("tomorrow"), None);
        assert_eq!(parse_time("25:00"), None);
        assert_eq!(parse_time("13:00 pm"), None);
    }

    #[test]
    fn format_time_falls_back_to_placeholder() {
        assert_eq!(format_time("14:05", TimeFormat::TwentyFourHour), "14:05");
        assert_eq!(format_time("14:05", TimeFormat::TwelveHour), "02:05 PM");
        assert_eq!(format_time("not a time", TimeFormat::TwelveHour), PLACEHOLDER);
        assert_eq!(format_time("", TimeFormat::TwentyFourHour), PLACEHOLDER);
    }

    #[test]
    fn toggle_flips_between_formats() {
        assert_eq!(TimeFormat::TwentyFourHour.toggle(), TimeFormat::TwelveHour);
        assert_eq!(TimeFormat::TwelveHour.toggle(), TimeFormat::TwentyFourHour);
    }
}
