// Date utility functions

use chrono::{Datelike, Duration, NaiveDate};

/// Monday of the week containing `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// First visible date for a grid with `columns` day-columns around `today`.
pub fn visible_start(today: NaiveDate, columns: u32) -> NaiveDate {
    if columns > 1 {
        start_of_week(today)
    } else {
        today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_of_week() {
        let thursday = NaiveDate::from_ymd_opt(2025, 3, 13).unwrap();
        let monday = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(start_of_week(thursday), monday);
        assert_eq!(start_of_week(monday), monday);
    }

    #[test]
    fn test_visible_start() {
        let sunday = NaiveDate::from_ymd_opt(2025, 3, 16).unwrap();
        assert_eq!(visible_start(sunday, 1), sunday);
        assert_eq!(visible_start(sunday, 7), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
    }
}
