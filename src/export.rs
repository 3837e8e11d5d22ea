//! Data export
//!
//! Dumps habits, streaks and reward progress as a single JSON document.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AppMode, Habit};
use crate::stats::achievements::RewardId;
use crate::tracker::HabitTracker;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub exported_at: DateTime<Utc>,
    pub mode: AppMode,
    pub current_streak: u32,
    pub best_streak: u32,
    pub total_points: u32,
    pub habits: Vec<Habit>,
    pub rewards: Vec<ExportedReward>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedReward {
    pub id: RewardId,
    pub title: String,
    pub points: u32,
    pub current_count: u32,
    pub required_count: u32,
    pub is_unlocked: bool,
}

impl ExportDocument {
    pub fn from_tracker(tracker: &HabitTracker, today: NaiveDate, exported_at: DateTime<Utc>) -> Self {
        let rewards = tracker
            .achievements()
            .rewards()
            .iter()
            .map(|progress| {
                let reward = progress.definition();
                ExportedReward {
                    id: progress.id,
                    title: reward.title.to_string(),
                    points: reward.points,
                    current_count: progress.current_count,
                    required_count: reward.required_count,
                    is_unlocked: progress.is_unlocked,
                }
            })
            .collect();

        Self {
            exported_at,
            mode: tracker.mode(),
            current_streak: tracker.current_streak(today),
            best_streak: tracker.best_streak(),
            total_points: tracker.total_points(),
            habits: tracker.habits().to_vec(),
            rewards,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).with_context(|| "Failed to serialize export")
    }

    /// Write the document to `path`, creating parent directories
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write export: {}", path.display()))
    }
}
