//! Achievement Manager - reward progress and points
//!
//! Holds the progress of every reward plus the running points total, and
//! turns evaluations into events the UI can show as one-shot notifications.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::checker::{Evaluation, RewardProgress, Signals, evaluate, initial_progress};
use super::definitions::{Reward, RewardId};

/// A reward that was just unlocked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockedReward {
    pub reward: &'static Reward,
}

/// Events that can happen during a reward check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GamificationEvent {
    RewardUnlocked(UnlockedReward),
    PointsAwarded { amount: u32, total: u32 },
}

/// Serializable manager state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementState {
    #[serde(default)]
    pub rewards: Vec<RewardProgress>,
    #[serde(default)]
    pub total_points: u32,
}

/// Main manager for reward progress
#[derive(Debug, Clone)]
pub struct AchievementManager {
    rewards: Vec<RewardProgress>,
    total_points: u32,
}

impl Default for AchievementManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AchievementManager {
    /// Create a manager with every reward locked
    pub fn new() -> Self {
        Self {
            rewards: initial_progress(),
            total_points: 0,
        }
    }

    /// Restore from saved state.
    ///
    /// Rewards missing from the saved state start locked; duplicates keep the
    /// first entry.
    pub fn from_state(state: AchievementState) -> Self {
        let rewards = RewardId::all()
            .iter()
            .map(|id| {
                state
                    .rewards
                    .iter()
                    .find(|r| r.id == *id)
                    .cloned()
                    .unwrap_or_else(|| RewardProgress::locked(*id))
            })
            .collect();

        Self {
            rewards,
            total_points: state.total_points,
        }
    }

    pub fn state(&self) -> AchievementState {
        AchievementState {
            rewards: self.rewards.clone(),
            total_points: self.total_points,
        }
    }

    pub fn rewards(&self) -> &[RewardProgress] {
        &self.rewards
    }

    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    pub fn is_unlocked(&self, id: RewardId) -> bool {
        self.rewards.iter().any(|r| r.id == id && r.is_unlocked)
    }

    pub fn unlocked_count(&self) -> usize {
        self.rewards.iter().filter(|r| r.is_unlocked).count()
    }

    /// Evaluate all rewards and apply the result.
    ///
    /// Returns one event per newly unlocked reward, followed by a points
    /// event when anything was awarded.
    pub fn check(&mut self, signals: &Signals) -> Vec<GamificationEvent> {
        let Evaluation {
            rules,
            points_delta,
            newly_unlocked,
        } = evaluate(&self.rewards, signals);

        self.rewards = rules;

        let mut events: Vec<GamificationEvent> = newly_unlocked
            .into_iter()
            .map(|id| {
                let reward = Reward::get(id);
                info!("Reward unlocked: {} (+{} pts)", reward.title, reward.points);
                GamificationEvent::RewardUnlocked(UnlockedReward { reward })
            })
            .collect();

        if points_delta > 0 {
            self.total_points += points_delta;
            events.push(GamificationEvent::PointsAwarded {
                amount: points_delta,
                total: self.total_points,
            });
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_accumulates_points() {
        let mut manager = AchievementManager::new();
        let events = manager.check(&Signals {
            habit_count: 5,
            streak_count: 7,
            ..Default::default()
        });

        assert_eq!(events.len(), 3);
        assert!(matches!(
            events.last(),
            Some(GamificationEvent::PointsAwarded { amount: 90, total: 90 })
        ));
        assert_eq!(manager.total_points(), 90);
        assert_eq!(manager.unlocked_count(), 2);

        // nothing new to unlock
        let events = manager.check(&Signals {
            habit_count: 6,
            streak_count: 8,
            ..Default::default()
        });
        assert!(events.is_empty());
        assert_eq!(manager.total_points(), 90);
    }

    #[test]
    fn test_state_roundtrip_fills_missing_rewards() {
        let state = AchievementState {
            rewards: vec![RewardProgress {
                id: RewardId::PerfectDay,
                current_count: 1,
                is_unlocked: true,
            }],
            total_points: 50,
        };
        let manager = AchievementManager::from_state(state);
        assert_eq!(manager.rewards().len(), RewardId::all().len());
        assert!(manager.is_unlocked(RewardId::PerfectDay));
        assert!(!manager.is_unlocked(RewardId::EarlyBird));
        assert_eq!(manager.state().total_points, 50);
    }
}
