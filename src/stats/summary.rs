//! Completion summaries for the stats screen

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::streaks::{combined_dates, compute_streak, longest_streak};
use super::time_bucket::{in_window, start_of_week};
use crate::domain::Habit;

/// Time range for performance views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    #[default]
    Week,
    Month,
    Year,
}

impl Timeframe {
    pub fn days(&self) -> u32 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Year => 365,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Week => "This Week",
            Self::Month => "This Month",
            Self::Year => "This Year",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            _ => None,
        }
    }
}

/// Per-habit completion percentage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitPerformance {
    pub habit_id: String,
    pub title: String,
    pub completed: u32,
    pub percentage: u32,
}

/// Everything the stats view shows at once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSummary {
    pub total_habits: usize,
    pub total_completions: usize,
    pub completion_rate: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub weekday_completions: [u32; 7],
    pub performance: Vec<HabitPerformance>,
}

impl StatsSummary {
    pub fn build(habits: &[Habit], timeframe: Timeframe, today: NaiveDate) -> Self {
        let all_dates = combined_dates(habits);
        Self {
            total_habits: habits.len(),
            total_completions: total_completions(habits),
            completion_rate: completion_rate(habits, today),
            current_streak: compute_streak(&all_dates, today),
            longest_streak: longest_streak(&all_dates),
            weekday_completions: weekday_completions(habits, today),
            performance: habits
                .iter()
                .map(|h| habit_performance(h, timeframe, today))
                .collect(),
        }
    }
}

/// Total completions across every habit
pub fn total_completions(habits: &[Habit]) -> usize {
    habits.iter().map(Habit::completion_count).sum()
}

/// Completions in the last 7 days over `habits * 7`, as a rounded percent.
pub fn completion_rate(habits: &[Habit], today: NaiveDate) -> u32 {
    if habits.is_empty() {
        return 0;
    }
    let possible = habits.len() as u32 * 7;
    let done: u32 = habits
        .iter()
        .map(|h| completions_in_window(h, today, 7))
        .sum();
    percentage(done, possible)
}

/// Share of days in the timeframe window on which `habit` was completed
pub fn habit_performance(habit: &Habit, timeframe: Timeframe, today: NaiveDate) -> HabitPerformance {
    let completed = completions_in_window(habit, today, timeframe.days());
    HabitPerformance {
        habit_id: habit.id.clone(),
        title: habit.title.clone(),
        completed,
        percentage: percentage(completed, timeframe.days()),
    }
}

/// Completions per weekday (Mon..Sun) in the ISO week containing `today`
pub fn weekday_completions(habits: &[Habit], today: NaiveDate) -> [u32; 7] {
    let monday = start_of_week(today, Weekday::Mon);
    let sunday = monday + Duration::days(6);
    let mut counts = [0u32; 7];

    for habit in habits {
        for date in habit.completed_dates.range(monday..=sunday) {
            counts[date.weekday().num_days_from_monday() as usize] += 1;
        }
    }

    counts
}

fn completions_in_window(habit: &Habit, today: NaiveDate, days: u32) -> u32 {
    habit
        .completed_dates
        .iter()
        .filter(|d| in_window(**d, today, days))
        .count() as u32
}

fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let pct = (f64::from(part) / f64::from(whole) * 100.0).round() as u32;
    pct.min(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HabitDraft;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn habit(title: &str, days: &[&str]) -> Habit {
        let mut h = Habit::from_draft(HabitDraft::new(title)).unwrap();
        for d in days {
            h.toggle(date(d));
        }
        h
    }

    #[test]
    fn test_totals_and_rate() {
        let today = date("2023-04-18");
        let habits = vec![
            habit("Meditate", &["2023-04-15", "2023-04-16", "2023-04-17", "2023-04-18"]),
            habit("Read", &["2023-04-15", "2023-04-17", "2023-04-18", "2023-03-01"]),
        ];
        assert_eq!(total_completions(&habits), 8);
        // 7 of 14 possible in the last week
        assert_eq!(completion_rate(&habits, today), 50);
        assert_eq!(completion_rate(&[], today), 0);
    }

    #[test]
    fn test_habit_performance_caps_at_window() {
        let today = date("2023-04-18");
        let h = habit("Meditate", &["2023-04-12", "2023-04-13", "2023-04-18", "2023-04-01"]);

        let week = habit_performance(&h, Timeframe::Week, today);
        assert_eq!(week.completed, 3);
        assert_eq!(week.percentage, 43);

        let month = habit_performance(&h, Timeframe::Month, today);
        assert_eq!(month.completed, 4);
        assert_eq!(month.percentage, 13);
    }

    #[test]
    fn test_weekday_completions() {
        // 2023-04-18 is a Tuesday; its ISO week is Apr 17..=Apr 23
        let habits = vec![
            habit("A", &["2023-04-16", "2023-04-17", "2023-04-18"]),
            habit("B", &["2023-04-17", "2023-04-23"]),
        ];
        let counts = weekday_completions(&habits, date("2023-04-18"));
        assert_eq!(counts, [2, 1, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_summary_uses_combined_streak() {
        let today = date("2023-04-18");
        let habits = vec![
            habit("A", &["2023-04-16", "2023-04-18"]),
            habit("B", &["2023-04-17"]),
        ];
        let summary = StatsSummary::build(&habits, Timeframe::Week, today);
        assert_eq!(summary.current_streak, 3);
        assert_eq!(summary.longest_streak, 3);
        assert_eq!(summary.performance.len(), 2);
        assert_eq!(Timeframe::from_str("Month"), Some(Timeframe::Month));
    }
}
