#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use tomatobox::commands::task::parse_due;
    use tomatobox::libs::formatter::{format_datetime, format_duration, format_minutes, format_optional_datetime, format_remaining, percent, progress_bar};

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(0), "00:00");
        assert_eq!(format_remaining(59), "00:59");
        assert_eq!(format_remaining(25 * 60), "25:00");
        assert_eq!(format_remaining(90 * 60 + 5), "90:05");
    }

    #[test]
    fn test_format_duration_clamps_negative() {
        assert_eq!(format_duration(&Duration::minutes(75)), "01:15");
        assert_eq!(format_duration(&Duration::minutes(-30)), "00:00");
        assert_eq!(format_minutes(25), "00:25");
    }

    #[test]
    fn test_format_datetime() {
        let at = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap().and_hms_opt(14, 5, 59).unwrap();
        assert_eq!(format_datetime(&at), "2025-03-09 14:05");
        assert_eq!(format_optional_datetime(None), "");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 4), "[----]");
        assert_eq!(progress_bar(0.5, 4), "[##--]");
        assert_eq!(progress_bar(1.0, 4), "[####]");
        assert_eq!(progress_bar(3.0, 4), "[####]");
        assert_eq!(progress_bar(f64::NAN, 4), "[----]");
        assert_eq!(percent(0.25), 25);
        assert_eq!(percent(2.0), 100);
    }

    #[test]
    fn test_parse_due() {
        let date = NaiveDate::from_ymd_opt(2030, 6, 1).unwrap();
        assert_eq!(parse_due("2030-06-01 09:30").unwrap(), date.and_hms_opt(9, 30, 0).unwrap());
        assert_eq!(parse_due("2030-06-01").unwrap(), date.and_hms_opt(23, 59, 0).unwrap());
        assert!(parse_due("next tuesday").is_err());
    }
}
