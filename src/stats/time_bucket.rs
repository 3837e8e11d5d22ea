//! Date bucketing utilities for stats aggregation
//!
//! - Day buckets: "YYYY-MM-DD" keys, the format completion dates are stored in
//! - Windows: trailing N-day ranges ending today
//! - Month and week bounds for calendar and chart views

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Format a date as its "YYYY-MM-DD" day bucket.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// let day = NaiveDate::from_ymd_opt(2023, 12, 28).unwrap();
/// assert_eq!(rickmorty::stats::day_bucket(day), "2023-12-28");
/// ```
pub fn day_bucket(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// First day of the trailing window of `days` days that ends on `today`.
///
/// A window of 7 ending on a Sunday starts on the Monday before it.
pub fn window_start(today: NaiveDate, days: u32) -> NaiveDate {
    let back = i64::from(days.saturating_sub(1));
    today
        .checked_sub_signed(Duration::days(back))
        .unwrap_or(NaiveDate::MIN)
}

/// True if `date` falls in the window of `days` days ending on `today`
pub fn in_window(date: NaiveDate, today: NaiveDate, days: u32) -> bool {
    days > 0 && date <= today && date >= window_start(today, days)
}

/// First and last day of a month, or None if the month is invalid
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let first_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }?;
    Some((first, first_next.pred_opt()?))
}

/// Most recent `week_start` day on or before `date`
pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = days_from_week_start(date.weekday(), week_start);
    date.checked_sub_signed(Duration::days(i64::from(offset)))
        .unwrap_or(date)
}

/// Column index (0..7) of `day` in a week beginning on `week_start`
pub fn days_from_week_start(day: Weekday, week_start: Weekday) -> u32 {
    (day.num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_bucket() {
        assert_eq!(day_bucket(date(2023, 4, 5)), "2023-04-05");
    }

    #[test]
    fn test_window() {
        let today = date(2023, 8, 25);
        assert_eq!(window_start(today, 7), date(2023, 8, 19));
        assert_eq!(window_start(today, 1), today);
        assert!(in_window(date(2023, 8, 19), today, 7));
        assert!(!in_window(date(2023, 8, 18), today, 7));
        assert!(!in_window(date(2023, 8, 26), today, 7));
        assert!(!in_window(today, today, 0));
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(
            month_bounds(2024, 2),
            Some((date(2024, 2, 1), date(2024, 2, 29)))
        );
        assert_eq!(
            month_bounds(2023, 12),
            Some((date(2023, 12, 1), date(2023, 12, 31)))
        );
        assert_eq!(month_bounds(2023, 13), None);
        assert_eq!(month_bounds(2023, 0), None);
    }

    #[test]
    fn test_start_of_week() {
        // 2023-08-25 is a Friday
        let friday = date(2023, 8, 25);
        assert_eq!(start_of_week(friday, Weekday::Mon), date(2023, 8, 21));
        assert_eq!(start_of_week(friday, Weekday::Sun), date(2023, 8, 20));
        assert_eq!(days_from_week_start(Weekday::Sun, Weekday::Mon), 6);
        assert_eq!(days_from_week_start(Weekday::Sun, Weekday::Sun), 0);
    }
}
