//! Remote update collaborator
//!
//! The app pushes a habit to the "cloud" whenever its completion set changes.
//! There is no real backend; [`MockRemote`] logs the update and resolves,
//! optionally after a simulated network delay.

use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::domain::Habit;

/// Receives habit updates
#[async_trait]
pub trait RemoteSync: Send + Sync {
    async fn update_habit(&self, habit: &Habit) -> Result<()>;
}

/// Remote that accepts every update
#[derive(Debug, Default)]
pub struct MockRemote {
    latency: Duration,
    updated: Mutex<Vec<String>>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep for `latency` before resolving each update
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    /// IDs of habits pushed so far, in order
    pub fn updated_ids(&self) -> Vec<String> {
        self.updated.lock().expect("lock").clone()
    }
}

#[async_trait]
impl RemoteSync for MockRemote {
    async fn update_habit(&self, habit: &Habit) -> Result<()> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        debug!(
            "Updating document {} in collection habits ({} completions)",
            habit.id,
            habit.completion_count()
        );
        self.updated.lock().expect("lock").push(habit.id.clone());
        Ok(())
    }
}
