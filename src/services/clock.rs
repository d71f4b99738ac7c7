//! Wall-clock readings in the configured locale

use chrono::{DateTime, Local, Locale, TimeZone};
use serde::{Deserialize, Serialize};

/// Long-form date: weekday, day, full month name, year
const DATE_FORMAT: &str = "%A, %-d %B %Y";
/// The locale's own time representation
const TIME_FORMAT: &str = "%X";

/// Current time and date rendered for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockReading {
    pub time: String,
    pub date: String,
    pub timestamp: String,
}

/// Parse a locale name such as `id_ID` or `en_US`
pub fn parse_locale(name: &str) -> Result<Locale, String> {
    Locale::try_from(name).map_err(|_| format!("Unknown locale: {}", name))
}

/// Read the host's local wall clock
pub fn read_clock(locale: Locale) -> ClockReading {
    format_reading(&Local::now(), locale)
}

pub fn format_reading<Tz>(now: &DateTime<Tz>, locale: Locale) -> ClockReading
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    ClockReading {
        time: now.format_localized(TIME_FORMAT, locale).to_string(),
        date: now.format_localized(DATE_FORMAT, locale).to_string(),
        timestamp: now.to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn sample() -> DateTime<Utc> {
        // Tuesday
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
    }

    #[test]
    fn test_indonesian_long_date() {
        let reading = format_reading(&sample(), parse_locale("id_ID").unwrap());
        assert_eq!(reading.date, "Selasa, 5 Maret 2024");
    }

    #[test]
    fn test_english_long_date() {
        let reading = format_reading(&sample(), parse_locale("en_US").unwrap());
        assert_eq!(reading.date, "Tuesday, 5 March 2024");
    }

    #[test]
    fn test_time_carries_minutes_and_seconds() {
        let reading = format_reading(&sample(), parse_locale("id_ID").unwrap());
        assert!(reading.time.contains("07"), "time was {}", reading.time);
        assert!(reading.time.contains("09"), "time was {}", reading.time);
        assert_eq!(reading.timestamp, "2024-03-05T14:07:09+00:00");
    }

    #[test]
    fn test_unknown_locale_is_rejected() {
        assert!(parse_locale("xx_NOPE").is_err());
    }
}
