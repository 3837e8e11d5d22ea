//! Month calendar grid
//!
//! Lays out a month as rows of seven cells and marks the days a habit (or any
//! habit) was completed.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::debug;

use super::time_bucket::{days_from_week_start, month_bounds};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid month: {year:04}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },
}

/// One in-month day of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub completed: bool,
    pub is_today: bool,
    pub is_future: bool,
}

/// A month laid out in weeks; cells outside the month are `None`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub week_start: Weekday,
    pub weeks: Vec<[Option<CalendarDay>; 7]>,
}

impl MonthGrid {
    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks.iter().flat_map(|w| w.iter().flatten())
    }

    pub fn completed_days(&self) -> usize {
        self.days().filter(|d| d.completed).count()
    }

    pub fn total_days(&self) -> usize {
        self.days().count()
    }

    /// Weekday header labels in column order
    pub fn header(&self) -> [&'static str; 7] {
        let mut labels = [""; 7];
        let mut day = self.week_start;
        for label in labels.iter_mut() {
            *label = weekday_label(day);
            day = day.succ();
        }
        labels
    }
}

/// Build the calendar grid for `year`-`month`.
pub fn month_grid(
    year: i32,
    month: u32,
    completed: &BTreeSet<NaiveDate>,
    today: NaiveDate,
    week_start: Weekday,
) -> Result<MonthGrid, CalendarError> {
    let (first, last) =
        month_bounds(year, month).ok_or(CalendarError::InvalidMonth { year, month })?;

    let mut weeks = Vec::new();
    let mut row: [Option<CalendarDay>; 7] = [None; 7];
    let mut column = days_from_week_start(first.weekday(), week_start) as usize;

    for date in first.iter_days().take_while(|d| *d <= last) {
        row[column] = Some(CalendarDay {
            date,
            completed: completed.contains(&date),
            is_today: date == today,
            is_future: date > today,
        });
        column += 1;
        if column == 7 {
            weeks.push(row);
            row = [None; 7];
            column = 0;
        }
    }
    if column > 0 {
        weeks.push(row);
    }

    debug!(
        "Built calendar {:04}-{:02} with {} weeks",
        year,
        month,
        weeks.len()
    );

    Ok(MonthGrid {
        year,
        month,
        week_start,
        weeks,
    })
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_august_2023_monday_start() {
        // Aug 1 2023 is a Tuesday
        let completed: BTreeSet<_> = [date(2023, 8, 1), date(2023, 8, 25)].into_iter().collect();
        let grid = month_grid(2023, 8, &completed, date(2023, 8, 25), Weekday::Mon).unwrap();

        assert_eq!(grid.weeks.len(), 5);
        assert!(grid.weeks[0][0].is_none());
        assert_eq!(grid.weeks[0][1].unwrap().date, date(2023, 8, 1));
        // Aug 31 is a Thursday, trailing cells empty
        assert_eq!(grid.weeks[4][3].unwrap().date, date(2023, 8, 31));
        assert!(grid.weeks[4][4].is_none());

        assert_eq!(grid.total_days(), 31);
        assert_eq!(grid.completed_days(), 2);

        let today = grid.days().find(|d| d.is_today).unwrap();
        assert_eq!(today.date, date(2023, 8, 25));
        assert!(today.completed);
        assert_eq!(grid.days().filter(|d| d.is_future).count(), 6);
    }

    #[test]
    fn test_sunday_start_shifts_columns() {
        let grid = month_grid(2023, 10, &BTreeSet::new(), date(2023, 10, 1), Weekday::Sun).unwrap();
        // Oct 1 2023 is a Sunday
        assert_eq!(grid.weeks[0][0].unwrap().date, date(2023, 10, 1));
        assert_eq!(grid.header()[0], "Sun");
        assert_eq!(grid.header()[6], "Sat");
    }

    #[test]
    fn test_february_fits_four_rows() {
        // Feb 2021 starts on a Monday and has 28 days
        let grid = month_grid(2021, 2, &BTreeSet::new(), date(2021, 2, 1), Weekday::Mon).unwrap();
        assert_eq!(grid.weeks.len(), 4);
        assert!(grid.weeks.iter().all(|w| w.iter().all(|c| c.is_some())));
    }

    #[test]
    fn test_invalid_month() {
        let err = month_grid(2023, 13, &BTreeSet::new(), date(2023, 1, 1), Weekday::Mon)
            .unwrap_err();
        assert_eq!(
            err,
            CalendarError::InvalidMonth {
                year: 2023,
                month: 13
            }
        );
    }
}
