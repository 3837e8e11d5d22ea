//! Core domain types

mod habit;
mod mode;

pub use habit::{Frequency, Habit, HabitDraft, HabitError};
pub use mode::{AppMode, Theme, ThemeOverrides};
