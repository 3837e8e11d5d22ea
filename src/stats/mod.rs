//! Statistics for habit activity
//!
//! Everything in here is derived from habit completion dates and recomputed
//! on demand; nothing is stored.
//!
//! # Usage
//!
//! ```ignore
//! let streak = compute_streak(&habit.completed_dates, today);
//! let grid = month_grid(2023, 8, &habit.completed_dates, today, Weekday::Mon)?;
//! let summary = StatsSummary::build(&habits, Timeframe::Week, today);
//! ```

pub mod achievements;
mod calendar;
mod streaks;
mod summary;
mod time_bucket;

pub use calendar::{CalendarDay, CalendarError, MonthGrid, month_grid};
pub use streaks::{
    StreakInfo, combined_dates, compute_streak, compute_streak_from_strs, longest_streak,
    parse_day, today,
};
pub use summary::{
    HabitPerformance, StatsSummary, Timeframe, completion_rate, habit_performance,
    total_completions, weekday_completions,
};
pub use time_bucket::{day_bucket, in_window, month_bounds, start_of_week, window_start};
