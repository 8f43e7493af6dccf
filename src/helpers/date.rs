//! Date helper functions

use chrono::{DateTime, Local, NaiveDate, TimeZone};

/// Format a timestamp using a Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_datetime(&date, "YYYY-MM-DD HH:mm") // -> "2024-01-15 10:30"
/// ```
pub fn format_datetime<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Format a calendar date using a Moment.js-compatible format string
pub fn format_day(date: &NaiveDate, format: &str) -> String {
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Get relative time (like "2 hours ago")
pub fn relative_date(date: &DateTime<Local>) -> String {
    let now = Local::now();
    let duration = now.signed_duration_since(*date);

    if duration.num_seconds() < 0 {
        return "in the future".to_string();
    }

    let seconds = duration.num_seconds();
    let minutes = duration.num_minutes();
    let hours = duration.num_hours();
    let days = duration.num_days();

    if seconds < 60 {
        "a few seconds ago".to_string()
    } else if minutes == 1 {
        "a minute ago".to_string()
    } else if minutes < 60 {
        format!("{} minutes ago", minutes)
    } else if hours == 1 {
        "an hour ago".to_string()
    } else if hours < 24 {
        format!("{} hours ago", hours)
    } else if days == 1 {
        "yesterday".to_string()
    } else if days < 30 {
        format!("{} days ago", days)
    } else if days < 365 {
        let months = days / 30;
        if months == 1 {
            "a month ago".to_string()
        } else {
            format!("{} months ago", months)
        }
    } else {
        let years = days / 365;
        if years == 1 {
            "a year ago".to_string()
        } else {
            format!("{} years ago", years)
        }
    }
}

/// Parse a calendar date written in one of the formats seed files use
///
/// Accepts ISO dates, slash-separated dates in either order, and full
/// timestamps (only the date part is kept).
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    let formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y.%m.%d"];
    for fmt in formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
    for fmt in datetime_formats {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    None
}

/// Serde adapter for calendar dates: writes `YYYY-MM-DD`, reads anything
/// [`parse_calendar_date`] understands
pub mod calendar {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_calendar_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw)))
    }
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest patterns first within each unit
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("dddd", "%A"),
        ("ddd", "%a"),
        ("ZZ", "%z"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_day() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(format_day(&date, "YYYY-MM-DD"), "2024-01-15");
        assert_eq!(format_day(&date, "YYYY/MM/DD"), "2024/01/15");
        assert_eq!(format_day(&date, "MMMM DD, YYYY"), "January 15, 2024");
    }

    #[test]
    fn test_format_datetime() {
        let date = Local.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_datetime(&date, "YYYY-MM-DD HH:mm"), "2024-01-15 10:30");
    }

    #[test]
    fn test_moment_to_chrono() {
        assert_eq!(moment_to_chrono_format("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(moment_to_chrono_format("HH:mm:ss"), "%H:%M:%S");
    }

    #[test]
    fn test_parse_calendar_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15);
        assert_eq!(parse_calendar_date("2024-01-15"), expected);
        assert_eq!(parse_calendar_date(" 2024/01/15 "), expected);
        assert_eq!(parse_calendar_date("1/15/2024"), expected);
        assert_eq!(parse_calendar_date("2024-01-15T08:00:00+08:00"), expected);
        assert_eq!(parse_calendar_date("2024-01-15 23:59:00"), expected);
        assert_eq!(parse_calendar_date("last tuesday"), None);
    }

    #[test]
    fn test_relative_date() {
        let now = Local::now();
        assert_eq!(relative_date(&now), "a few seconds ago");
        assert_eq!(relative_date(&(now - Duration::hours(3))), "3 hours ago");
        assert_eq!(relative_date(&(now - Duration::days(1))), "yesterday");
        assert_eq!(relative_date(&(now + Duration::days(1))), "in the future");
    }
}
