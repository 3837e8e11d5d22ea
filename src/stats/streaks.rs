//! Streak calculation
//!
//! A streak is the number of consecutive calendar days, ending today or
//! yesterday, on which a habit was completed.

use std::collections::BTreeSet;

use chrono::{Local, NaiveDate};

use crate::domain::Habit;

/// Count consecutive completed days anchored at `today` or yesterday.
///
/// Returns 0 when neither today nor yesterday is in the set, regardless of
/// older entries.
pub fn compute_streak(completion_dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    if completion_dates.is_empty() {
        return 0;
    }

    let anchor = if completion_dates.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if completion_dates.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 1;
    let mut day = anchor;
    while let Some(prev) = day.pred_opt() {
        if !completion_dates.contains(&prev) {
            break;
        }
        streak += 1;
        day = prev;
    }

    streak
}

/// Same as [`compute_streak`] for raw "YYYY-MM-DD" strings.
///
/// Entries that fail to parse count as not completed.
pub fn compute_streak_from_strs<'a, I>(dates: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    let parsed: BTreeSet<NaiveDate> = dates.into_iter().filter_map(parse_day).collect();
    compute_streak(&parsed, today)
}

/// Longest run of consecutive days anywhere in the set
pub fn longest_streak(completion_dates: &BTreeSet<NaiveDate>) -> u32 {
    let mut best = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;

    // BTreeSet iterates in ascending order
    for &day in completion_dates {
        run = match prev {
            Some(p) if p.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        prev = Some(day);
    }

    best
}

/// Union of every habit's completion dates
pub fn combined_dates<'a, I>(habits: I) -> BTreeSet<NaiveDate>
where
    I: IntoIterator<Item = &'a Habit>,
{
    habits
        .into_iter()
        .flat_map(|h| h.completed_dates.iter().copied())
        .collect()
}

/// Parse a "YYYY-MM-DD" day string
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Current and best streak for a set of dates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreakInfo {
    pub current: u32,
    pub best: u32,
    /// Latest completion on or before today
    pub last_activity_day: Option<NaiveDate>,
}

impl StreakInfo {
    pub fn from_dates(completion_dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> Self {
        Self {
            current: compute_streak(completion_dates, today),
            best: longest_streak(completion_dates),
            last_activity_day: completion_dates.range(..=today).next_back().copied(),
        }
    }

    /// Check if the streak is still active (activity today or yesterday)
    pub fn is_active(&self, today: NaiveDate) -> bool {
        let Some(last_date) = self.last_activity_day else {
            return false;
        };
        let days_since = (today - last_date).num_days();
        (0..=1).contains(&days_since)
    }
}

/// Today's local date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    fn set(days: &[&str]) -> BTreeSet<NaiveDate> {
        days.iter().map(|d| date(d)).collect()
    }

    #[test]
    fn test_empty_set_has_no_streak() {
        assert_eq!(compute_streak(&BTreeSet::new(), date("2023-08-25")), 0);
    }

    #[test]
    fn test_five_day_run_ending_today() {
        let dates = set(&[
            "2023-08-21",
            "2023-08-22",
            "2023-08-23",
            "2023-08-24",
            "2023-08-25",
        ]);
        assert_eq!(compute_streak(&dates, date("2023-08-25")), 5);
    }

    #[test]
    fn test_run_anchored_at_yesterday() {
        let dates = set(&["2023-08-22", "2023-08-23", "2023-08-24"]);
        assert_eq!(compute_streak(&dates, date("2023-08-25")), 3);
    }

    #[test]
    fn test_gap_stops_the_walk() {
        // today + 2 preceding days, then a gap, then older entries
        let dates = set(&[
            "2023-08-18",
            "2023-08-19",
            "2023-08-23",
            "2023-08-24",
            "2023-08-25",
        ]);
        assert_eq!(compute_streak(&dates, date("2023-08-25")), 3);
    }

    #[test]
    fn test_broken_when_neither_today_nor_yesterday() {
        let dates = set(&["2023-08-20", "2023-08-21", "2023-08-22", "2023-08-23"]);
        assert_eq!(compute_streak(&dates, date("2023-08-25")), 0);
    }

    #[test]
    fn test_future_dates_are_ignored() {
        let dates = set(&["2023-08-25", "2023-08-26", "2023-08-27"]);
        assert_eq!(compute_streak(&dates, date("2023-08-25")), 1);
    }

    #[test]
    fn test_order_and_duplicates_do_not_matter() {
        let today = date("2023-08-25");
        let a = compute_streak_from_strs(["2023-08-25", "2023-08-23", "2023-08-24"], today);
        let b = compute_streak_from_strs(
            ["2023-08-24", "2023-08-25", "2023-08-25", "2023-08-23", "2023-08-24"],
            today,
        );
        assert_eq!(a, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_unparseable_entries_count_as_absent() {
        let today = date("2023-08-25");
        let streak = compute_streak_from_strs(["2023-08-25", "garbage", "2023-08-24"], today);
        assert_eq!(streak, 2);
        assert_eq!(compute_streak_from_strs(["nope"], today), 0);
    }

    #[test]
    fn test_streak_crosses_month_and_year_boundaries() {
        let dates = set(&["2022-12-30", "2022-12-31", "2023-01-01"]);
        assert_eq!(compute_streak(&dates, date("2023-01-01")), 3);
    }

    #[test]
    fn test_longest_streak() {
        let dates = set(&[
            "2023-04-01",
            "2023-04-02",
            "2023-04-03",
            "2023-04-04",
            "2023-04-10",
            "2023-04-11",
        ]);
        assert_eq!(longest_streak(&dates), 4);
        assert_eq!(longest_streak(&BTreeSet::new()), 0);
    }

    #[test]
    fn test_streak_info_activity() {
        let dates = set(&["2023-04-17", "2023-04-18"]);
        let info = StreakInfo::from_dates(&dates, date("2023-04-19"));
        assert_eq!(info.current, 2);
        assert_eq!(info.best, 2);
        assert!(info.is_active(date("2023-04-19")));
        assert!(!info.is_active(date("2023-04-20")));
    }
}
