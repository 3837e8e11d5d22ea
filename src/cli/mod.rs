//! CLI command implementations

pub mod account;
pub mod calendar;
pub mod export;
pub mod feed;
pub mod habit;
pub mod init;
pub mod mode;
pub mod progress;
pub mod water;

use anyhow::{Result, bail};
use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use rickmorty::config::Config;
use rickmorty::remote::{MockRemote, RemoteSync};
use rickmorty::stats::achievements::GamificationEvent;
use rickmorty::storage::{KeyValueStore, SqliteStore};
use rickmorty::tracker::{HabitTracker, TrackerEvent, TrackerSettings};

/// Everything a command needs: config, storage and the remote
pub struct AppContext {
    pub config: Config,
    pub store: Arc<dyn KeyValueStore>,
    pub remote: MockRemote,
}

/// Resolve the config path - uses global config (~/.rickmorty/config.toml)
/// unless overridden with --config.
pub fn resolve_config_path(config_override: Option<&Path>) -> PathBuf {
    match config_override {
        Some(p) => p.to_path_buf(),
        None => Config::global_config_path(),
    }
}

impl AppContext {
    pub fn open(config_override: Option<&Path>, data_dir: Option<&Path>) -> Result<Self> {
        let mut config = Config::load_or_init(&resolve_config_path(config_override))?;
        if let Some(dir) = data_dir {
            config.settings.data_dir = Some(dir.to_path_buf());
        }

        let store = SqliteStore::open(&config.data_db_path())?;
        let remote = MockRemote::with_latency(config.remote_latency());

        Ok(Self {
            config,
            store: Arc::new(store),
            remote,
        })
    }

    pub fn latency(&self) -> Duration {
        self.config.remote_latency()
    }

    pub async fn load_tracker(&self) -> Result<HabitTracker> {
        HabitTracker::load(self.store.as_ref(), TrackerSettings::from(&self.config)).await
    }

    pub async fn save_tracker(&self, tracker: &HabitTracker) -> Result<()> {
        tracker.save(self.store.as_ref()).await
    }
}

/// Local wall-clock time
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Find a habit by full id or unique id prefix
pub fn resolve_habit_id(tracker: &HabitTracker, id: &str) -> Result<String> {
    if tracker.habit(id).is_some() {
        return Ok(id.to_string());
    }

    let matches: Vec<_> = tracker
        .habits()
        .iter()
        .filter(|h| h.id.starts_with(id))
        .collect();

    match matches.as_slice() {
        [habit] => Ok(habit.id.clone()),
        [] => bail!("Habit not found: {}", id),
        _ => bail!("Ambiguous habit id '{}' matches {} habits", id, matches.len()),
    }
}

/// Print tracker events as one-line notifications
pub fn print_events(events: &[TrackerEvent]) {
    for event in events {
        match event {
            TrackerEvent::StreakChanged { previous, current } if current > previous => {
                println!("Streak: {} day(s)", current);
            }
            TrackerEvent::StreakChanged { current, .. } => {
                println!("Streak dropped to {} day(s)", current);
            }
            TrackerEvent::Gamification(GamificationEvent::RewardUnlocked(unlocked)) => {
                println!(
                    "Reward unlocked: {} - {}",
                    unlocked.reward.title, unlocked.reward.description
                );
            }
            TrackerEvent::Gamification(GamificationEvent::PointsAwarded { amount, total }) => {
                println!("+{} points ({} total)", amount, total);
            }
        }
    }
}

/// Push a changed habit to the remote; failures are reported, not fatal
pub async fn sync_habit(ctx: &AppContext, habit: &rickmorty::Habit) {
    if let Err(e) = ctx.remote.update_habit(habit).await {
        tracing::warn!("Failed to update habit {}: {:#}", habit.id, e);
    }
}
