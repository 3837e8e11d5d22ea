//! Rewards system: achievement definitions, threshold checks and points
//!
//! This module provides the gamification layer on top of habit activity.

mod checker;
mod definitions;
mod manager;

pub use checker::{Evaluation, RewardProgress, Signals, evaluate, initial_progress, is_perfect_day};
pub use definitions::{HYDRATION_GOAL, REWARDS, Reward, RewardId};
pub use manager::{AchievementManager, AchievementState, GamificationEvent, UnlockedReward};
