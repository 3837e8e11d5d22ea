//! Tracker persistence

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{HabitTracker, TrackerSettings, WaterLog};
use crate::domain::{AppMode, Habit};
use crate::stats::achievements::{AchievementManager, AchievementState};
use crate::storage::{self, KeyValueStore, keys};

/// Serializable tracker state, stored as JSON under `trackerState`.
///
/// The mode is stored separately under `appMode`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerSnapshot {
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_day: Option<NaiveDate>,
    #[serde(default)]
    pub water_glasses: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hydration_credited_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_completion_on: Option<NaiveDate>,
    #[serde(default)]
    pub last_streak: u32,
    #[serde(default)]
    pub achievements: AchievementState,
}

impl HabitTracker {
    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot {
            habits: self.habits.clone(),
            water_day: self.water.day,
            water_glasses: self.water.glasses,
            hydration_credited_on: self.hydration_credited_on,
            early_completion_on: self.early_completion_on,
            last_streak: self.last_streak,
            achievements: self.achievements.state(),
        }
    }

    pub fn from_snapshot(snapshot: TrackerSnapshot, mode: AppMode, settings: TrackerSettings) -> Self {
        Self {
            settings,
            habits: snapshot.habits,
            mode,
            water: WaterLog {
                day: snapshot.water_day,
                glasses: snapshot.water_glasses,
            },
            hydration_credited_on: snapshot.hydration_credited_on,
            early_completion_on: snapshot.early_completion_on,
            last_streak: snapshot.last_streak,
            achievements: AchievementManager::from_state(snapshot.achievements),
        }
    }

    /// Load tracker state and mode from `store`.
    ///
    /// Missing keys give a fresh tracker; an unrecognized stored mode falls
    /// back to the configured default.
    pub async fn load(store: &dyn KeyValueStore, settings: TrackerSettings) -> Result<Self> {
        let snapshot: TrackerSnapshot = storage::get_json(store, keys::TRACKER_STATE)
            .await?
            .unwrap_or_default();

        let mode = match store.get_item(keys::APP_MODE).await? {
            Some(raw) => AppMode::from_str(&raw).unwrap_or_else(|| {
                warn!("Ignoring unknown stored mode: {}", raw);
                settings.default_mode
            }),
            None => settings.default_mode,
        };

        debug!("Loaded {} habits, mode {}", snapshot.habits.len(), mode);
        Ok(Self::from_snapshot(snapshot, mode, settings))
    }

    /// Persist tracker state and mode to `store`
    pub async fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        storage::set_json(store, keys::TRACKER_STATE, &self.snapshot()).await?;
        store.set_item(keys::APP_MODE, self.mode.as_str()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HabitDraft;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_save_and_load() {
        let store = MemoryStore::new();
        let now = NaiveDate::from_ymd_opt(2023, 4, 18)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();

        let mut tracker = HabitTracker::default();
        let id = tracker.add_habit(HabitDraft::new("Read"), now).unwrap().habit.id;
        tracker.toggle_completion(&id, now.date(), now).unwrap();
        tracker.log_water(3, now);
        tracker.switch_mode(AppMode::Action);
        tracker.save(&store).await.unwrap();

        let loaded = HabitTracker::load(&store, TrackerSettings::default()).await.unwrap();
        assert_eq!(loaded.snapshot(), tracker.snapshot());
        assert_eq!(loaded.mode(), AppMode::Action);
        assert_eq!(loaded.water_today(now.date()), 3);
        assert_eq!(loaded.total_points(), 50);
    }

    #[tokio::test]
    async fn test_unknown_mode_falls_back() {
        let store = MemoryStore::new();
        store.set_item(keys::APP_MODE, "chaos").await.unwrap();

        let settings = TrackerSettings {
            default_mode: AppMode::Action,
            ..TrackerSettings::default()
        };
        let loaded = HabitTracker::load(&store, settings).await.unwrap();
        assert_eq!(loaded.mode(), AppMode::Action);
        assert!(loaded.habits().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_completion_date_is_skipped() {
        let store = MemoryStore::new();
        store
            .set_item(
                keys::TRACKER_STATE,
                r#"{"habits":[{"id":"h1","title":"Read","completed_dates":["2023-08-24","2023-8-25x","2023-08-25"]}]}"#,
            )
            .await
            .unwrap();

        let loaded = HabitTracker::load(&store, TrackerSettings::default()).await.unwrap();
        let today = NaiveDate::from_ymd_opt(2023, 8, 25).unwrap();
        assert_eq!(loaded.habits().len(), 1);
        assert_eq!(loaded.current_streak(today), 2);
    }
}
