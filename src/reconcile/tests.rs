//! Unit tests for period and date reconciliation

use super::*;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Whole days from 2024-10-01 through the end of 2025-06-01.
fn season() -> SeasonBounds {
    SeasonBounds::new(
        ymd(2024, 10, 1).and_hms_opt(0, 0, 0).unwrap(),
        ymd(2025, 6, 1).and_hms_opt(23, 59, 59).unwrap(),
    )
}

#[cfg(test)]
mod day_label_tests {
    use super::*;

    #[test]
    fn test_label_resolves_to_season_end_year() {
        assert_eq!(resolve_day_label("4/17", &season()).unwrap(), ymd(2025, 4, 17));
        assert_eq!(resolve_day_label("Thu 4/17", &season()).unwrap(), ymd(2025, 4, 17));
    }

    #[test]
    fn test_label_resolves_to_season_start_year() {
        assert_eq!(resolve_day_label("Fri 10/4", &season()).unwrap(), ymd(2024, 10, 4));
        assert_eq!(resolve_day_label("12/31", &season()).unwrap(), ymd(2024, 12, 31));
    }

    #[test]
    fn test_label_on_season_boundaries() {
        assert_eq!(resolve_day_label("10/1", &season()).unwrap(), ymd(2024, 10, 1));
        assert_eq!(resolve_day_label("6/1", &season()).unwrap(), ymd(2025, 6, 1));
    }

    #[test]
    fn test_label_outside_season_is_an_error() {
        let err = resolve_day_label("Fri 7/18", &season()).unwrap_err();
        match err {
            FantraxError::DateNotInSeason { date } => assert_eq!(date, "Fri 7/18"),
            other => panic!("Expected DateNotInSeason, got {other:?}"),
        }
        assert!(matches!(
            resolve_day_label("9/30", &season()),
            Err(FantraxError::DateNotInSeason { .. })
        ));
    }

    #[test]
    fn test_unparseable_label() {
        assert!(matches!(
            resolve_day_label("Thu", &season()),
            Err(FantraxError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn test_strip_weekday_only_strips_weekdays() {
        assert_eq!(strip_weekday("Thu 4/17"), "4/17");
        assert_eq!(strip_weekday("Oct 4"), "Oct 4");
        assert_eq!(strip_weekday("4/17"), "4/17");
        assert_eq!(strip_weekday(" Mon Apr 07, 2025 "), "Apr 07, 2025");
    }
}

#[cfg(test)]
mod timestamp_tests {
    use super::*;

    #[test]
    fn test_marked_timestamp_picks_year_inside_season() {
        let ts = resolve_marked_timestamp("Apr 12, 10:30 AM EDT", &season()).unwrap();
        assert_eq!(ts, ymd(2025, 4, 12).and_hms_opt(10, 30, 0).unwrap());

        let ts = resolve_marked_timestamp("Nov 3, 9:15 PM EST", &season()).unwrap();
        assert_eq!(ts, ymd(2024, 11, 3).and_hms_opt(21, 15, 0).unwrap());
    }

    #[test]
    fn test_marked_timestamp_outside_season() {
        let err = resolve_marked_timestamp("Jul 4, 1:00 PM EDT", &season()).unwrap_err();
        assert!(matches!(err, FantraxError::DateNotInSeason { .. }));
    }

    #[test]
    fn test_marked_timestamp_garbage() {
        assert!(resolve_marked_timestamp("yesterday", &season()).is_err());
        assert!(matches!(
            resolve_marked_timestamp("Foo 99, 1:00 PM EDT", &season()),
            Err(FantraxError::DateParse(_))
        ));
    }

    #[test]
    fn test_transaction_timestamp() {
        let ts = parse_transaction_timestamp("Sat Apr 12, 2025, 10:30AM").unwrap();
        assert_eq!(ts, ymd(2025, 4, 12).and_hms_opt(10, 30, 0).unwrap());

        let ts = parse_transaction_timestamp("Dec 1, 2024, 4:05PM").unwrap();
        assert_eq!(ts, ymd(2024, 12, 1).and_hms_opt(16, 5, 0).unwrap());
    }
}

#[cfg(test)]
mod period_tests {
    use super::*;

    #[test]
    fn test_parse_period_name() {
        let (start, end) = parse_period_name("(Oct 21/24 - Oct 27/24)").unwrap();
        assert_eq!(start, ymd(2024, 10, 21));
        assert_eq!(end, ymd(2024, 10, 27));

        let (start, end) = parse_period_name("(Dec 30/24 - Jan 5/25)").unwrap();
        assert_eq!(start, ymd(2024, 12, 30));
        assert_eq!(end, ymd(2025, 1, 5));
    }

    #[test]
    fn test_parse_period_name_without_range() {
        assert!(matches!(
            parse_period_name("Full Season"),
            Err(FantraxError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn test_parse_caption_range() {
        let (start, end) = parse_caption_range("(Mon Apr 07, 2025 - Thu Apr 17, 2025)").unwrap();
        assert_eq!(start, ymd(2025, 4, 7));
        assert_eq!(end, ymd(2025, 4, 17));
    }

    #[test]
    fn test_format_range() {
        assert_eq!(
            format_range(ymd(2024, 10, 21), ymd(2024, 10, 27)),
            "2024-10-21 - 2024-10-27"
        );
    }

    #[test]
    fn test_day_label_key_strips_leading_zero() {
        assert_eq!(day_label_key(ymd(2024, 10, 4)), "Oct 4");
        assert_eq!(day_label_key(ymd(2024, 10, 10)), "Oct 10");
        assert_eq!(day_label_key(ymd(2024, 11, 1)), "Nov 1");
        assert_eq!(day_label_key(ymd(2024, 11, 30)), "Nov 30");
    }

    #[test]
    fn test_parse_period_list_entry() {
        assert_eq!(
            parse_period_list_entry("12 (Fri Oct 4)"),
            Some((12, "Oct 4".to_string()))
        );
        assert_eq!(
            parse_period_list_entry("178 (Thu Apr 17)"),
            Some((178, "Apr 17".to_string()))
        );
        assert_eq!(parse_period_list_entry("garbage"), None);
    }

    #[test]
    fn test_season_bounds_contains() {
        let bounds = season();
        assert!(bounds.contains_date(ymd(2025, 6, 1)));
        assert!(!bounds.contains_date(ymd(2025, 6, 2)));
        assert!(bounds.contains(ymd(2025, 6, 1).and_hms_opt(23, 0, 0).unwrap()));
        assert!(!bounds.contains(ymd(2024, 9, 30).and_hms_opt(23, 59, 59).unwrap()));
    }
}
