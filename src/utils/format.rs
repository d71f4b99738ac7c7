//! Display formatting for timer and stopwatch durations

/// Format a whole number of seconds for display.
///
/// Durations of an hour or more render as `HH:MM:SS`; shorter ones as
/// `MM:SS`. Hours are not wrapped, so 100 hours renders as `100:00:00`.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_under_an_hour() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(65), "01:05");
        assert_eq!(format_duration(1500), "25:00");
        assert_eq!(format_duration(3599), "59:59");
    }

    #[test]
    fn test_format_an_hour_or_more() {
        assert_eq!(format_duration(3600), "01:00:00");
        assert_eq!(format_duration(3661), "01:01:01");
        assert_eq!(format_duration(86_399), "23:59:59");
    }

    #[test]
    fn test_format_hours_do_not_wrap() {
        assert_eq!(format_duration(360_000), "100:00:00");
    }
}
