//! Application state
//!
//! `HabitTracker` owns everything the screens share: habits, the selected
//! mode, today's water intake and reward progress. Every habit or water
//! mutation recomputes the overall streak and re-evaluates rewards, and
//! returns the resulting events.

mod events;
mod snapshot;

pub use events::{HabitChange, TrackerEvent, unlocked_titles};
pub use snapshot::TrackerSnapshot;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use tracing::{debug, info};

use crate::config::Config;
use crate::domain::{AppMode, Frequency, Habit, HabitDraft, HabitError};
use crate::stats::achievements::{AchievementManager, HYDRATION_GOAL, Signals, is_perfect_day};
use crate::stats::{StreakInfo, combined_dates, compute_streak, longest_streak};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error("Habit not found: {0}")]
    HabitNotFound(String),

    #[error(transparent)]
    Habit(#[from] HabitError),
}

/// Tunables the tracker needs from config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerSettings {
    pub early_bird_hour: u32,
    pub default_mode: AppMode,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            early_bird_hour: 9,
            default_mode: AppMode::PersonalGrowth,
        }
    }
}

impl From<&Config> for TrackerSettings {
    fn from(config: &Config) -> Self {
        Self {
            early_bird_hour: config.settings.early_bird_hour,
            default_mode: config.settings.default_mode,
        }
    }
}

/// Glasses of water logged on a single day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct WaterLog {
    day: Option<NaiveDate>,
    glasses: u32,
}

impl WaterLog {
    fn glasses_on(&self, day: NaiveDate) -> u32 {
        if self.day == Some(day) { self.glasses } else { 0 }
    }
}

#[derive(Debug, Clone)]
pub struct HabitTracker {
    settings: TrackerSettings,
    habits: Vec<Habit>,
    mode: AppMode,
    water: WaterLog,
    hydration_credited_on: Option<NaiveDate>,
    early_completion_on: Option<NaiveDate>,
    last_streak: u32,
    achievements: AchievementManager,
}

impl Default for HabitTracker {
    fn default() -> Self {
        Self::new(TrackerSettings::default())
    }
}

impl HabitTracker {
    pub fn new(settings: TrackerSettings) -> Self {
        Self {
            settings,
            habits: Vec::new(),
            mode: settings.default_mode,
            water: WaterLog::default(),
            hydration_credited_on: None,
            early_completion_on: None,
            last_streak: 0,
            achievements: AchievementManager::new(),
        }
    }

    // ========================================
    // READ ACCESS
    // ========================================

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Habits matching a frequency filter; `None` means all
    pub fn habits_by_frequency(&self, filter: Option<Frequency>) -> Vec<&Habit> {
        self.habits
            .iter()
            .filter(|h| filter.is_none_or(|f| h.frequency == f))
            .collect()
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn achievements(&self) -> &AchievementManager {
        &self.achievements
    }

    pub fn water_today(&self, today: NaiveDate) -> u32 {
        self.water.glasses_on(today)
    }

    /// Overall streak across every habit
    pub fn current_streak(&self, today: NaiveDate) -> u32 {
        compute_streak(&combined_dates(&self.habits), today)
    }

    /// Longest run of consecutive days across every habit
    pub fn best_streak(&self) -> u32 {
        longest_streak(&combined_dates(&self.habits))
    }

    pub fn streak_info(&self, today: NaiveDate) -> StreakInfo {
        StreakInfo::from_dates(&combined_dates(&self.habits), today)
    }

    /// Daily habits done today vs. daily habits total
    pub fn today_progress(&self, today: NaiveDate) -> (usize, usize) {
        let daily = self.habits_by_frequency(Some(Frequency::Daily));
        let done = daily.iter().filter(|h| h.is_completed_on(today)).count();
        (done, daily.len())
    }

    // ========================================
    // MUTATIONS
    // ========================================

    /// Switch the UI mode. Returns false if `mode` is already active.
    pub fn switch_mode(&mut self, mode: AppMode) -> bool {
        if mode == self.mode {
            return false;
        }
        info!("Switching mode {} -> {}", self.mode, mode);
        self.mode = mode;
        true
    }

    pub fn add_habit(
        &mut self,
        draft: HabitDraft,
        now: NaiveDateTime,
    ) -> Result<HabitChange, TrackerError> {
        let habit = Habit::from_draft(draft)?;
        debug!("Adding habit {} ({})", habit.title, habit.id);
        self.habits.push(habit.clone());

        let events = self.refresh(now);
        Ok(HabitChange { habit, events })
    }

    pub fn delete_habit(&mut self, id: &str, now: NaiveDateTime) -> Result<HabitChange, TrackerError> {
        let index = self.index_of(id)?;
        let habit = self.habits.remove(index);
        debug!("Deleted habit {} ({})", habit.title, habit.id);

        let events = self.refresh(now);
        Ok(HabitChange { habit, events })
    }

    /// Flip completion of habit `id` on `date`.
    ///
    /// Completing a habit for today before the early-bird hour counts as an
    /// early completion.
    pub fn toggle_completion(
        &mut self,
        id: &str,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> Result<HabitChange, TrackerError> {
        let index = self.index_of(id)?;
        let today = now.date();

        let completed = self.habits[index].toggle(date);
        if completed && date == today && now.hour() < self.settings.early_bird_hour {
            self.early_completion_on = Some(today);
        }
        debug!(
            "Habit {} {} on {}",
            id,
            if completed { "completed" } else { "uncompleted" },
            date
        );

        let events = self.refresh(now);
        Ok(HabitChange {
            habit: self.habits[index].clone(),
            events,
        })
    }

    /// Add glasses of water to today's intake
    pub fn log_water(&mut self, glasses: u32, now: NaiveDateTime) -> Vec<TrackerEvent> {
        let today = now.date();
        let current = self.water.glasses_on(today);
        self.water = WaterLog {
            day: Some(today),
            glasses: current.saturating_add(glasses),
        };
        debug!("Water today: {} glasses", self.water.glasses);
        self.refresh(now)
    }

    /// Clear habits, water and reward progress; the mode is kept
    pub fn reset(&mut self) {
        info!("Clearing all habits and progress");
        let mode = self.mode;
        *self = Self::new(self.settings);
        self.mode = mode;
    }

    /// Recompute the streak and evaluate rewards for the current state
    pub fn refresh(&mut self, now: NaiveDateTime) -> Vec<TrackerEvent> {
        let today = now.date();
        let mut events = Vec::new();

        let streak = self.current_streak(today);
        if streak != self.last_streak {
            events.push(TrackerEvent::StreakChanged {
                previous: self.last_streak,
                current: streak,
            });
            self.last_streak = streak;
        }

        // Hydration counts toward its reward at most once per day
        let water = self.water.glasses_on(today);
        let hydration_count = if self.hydration_credited_on == Some(today) {
            0
        } else {
            water
        };

        let signals = Signals {
            habit_count: self.habits.len() as u32,
            streak_count: streak,
            hydration_count,
            perfect_day: is_perfect_day(&self.habits, today),
            early_completion: self.early_completion_on == Some(today),
        };

        if hydration_count >= HYDRATION_GOAL {
            self.hydration_credited_on = Some(today);
        }

        events.extend(
            self.achievements
                .check(&signals)
                .into_iter()
                .map(TrackerEvent::Gamification),
        );

        events
    }

    /// Points earned so far
    pub fn total_points(&self) -> u32 {
        self.achievements.total_points()
    }

    fn index_of(&self, id: &str) -> Result<usize, TrackerError> {
        self.habits
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| TrackerError::HabitNotFound(id.to_string()))
    }
}
