//! Reward definitions and metadata
//!
//! All rewards are defined here with their thresholds and point values.

use serde::{Deserialize, Serialize};

/// Unique identifier for each reward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardId {
    EarlyBird,
    StreakMaster,
    HydrationHero,
    HabitBuilder,
    PerfectDay,
}

impl RewardId {
    /// Get the string ID for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EarlyBird => "early_bird",
            Self::StreakMaster => "streak_master",
            Self::HydrationHero => "hydration_hero",
            Self::HabitBuilder => "habit_builder",
            Self::PerfectDay => "perfect_day",
        }
    }

    /// Parse from storage string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "early_bird" => Some(Self::EarlyBird),
            "streak_master" => Some(Self::StreakMaster),
            "hydration_hero" => Some(Self::HydrationHero),
            "habit_builder" => Some(Self::HabitBuilder),
            "perfect_day" => Some(Self::PerfectDay),
            _ => None,
        }
    }

    /// All reward IDs in display order
    pub fn all() -> &'static [RewardId] {
        &[
            Self::EarlyBird,
            Self::StreakMaster,
            Self::HydrationHero,
            Self::HabitBuilder,
            Self::PerfectDay,
        ]
    }
}

/// Reward definition with all metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reward {
    pub id: RewardId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub points: u32,
    pub required_count: u32,
}

/// Glasses of water per day that count towards Hydration Hero
pub const HYDRATION_GOAL: u32 = 8;

/// All reward definitions
pub static REWARDS: &[Reward] = &[
    Reward {
        id: RewardId::EarlyBird,
        title: "Early Bird",
        description: "Complete a habit before 9 AM",
        icon: "sunny-outline",
        color: "#fbbf24",
        points: 20,
        required_count: 1,
    },
    Reward {
        id: RewardId::StreakMaster,
        title: "Streak Master",
        description: "Maintain a 7-day streak",
        icon: "flame-outline",
        color: "#ef4444",
        points: 50,
        required_count: 7,
    },
    Reward {
        id: RewardId::HydrationHero,
        title: "Hydration Hero",
        description: "Track 8 glasses of water for 3 days",
        icon: "water-outline",
        color: "#3b82f6",
        points: 30,
        required_count: 3,
    },
    Reward {
        id: RewardId::HabitBuilder,
        title: "Habit Builder",
        description: "Create 5 habits",
        icon: "construct-outline",
        color: "#8b5cf6",
        points: 40,
        required_count: 5,
    },
    Reward {
        id: RewardId::PerfectDay,
        title: "Perfect Day",
        description: "Complete all habits in a day",
        icon: "checkmark-done-outline",
        color: "#10b981",
        points: 50,
        required_count: 1,
    },
];

impl Reward {
    /// Get reward definition by ID
    pub fn get(id: RewardId) -> &'static Reward {
        REWARDS
            .iter()
            .find(|r| r.id == id)
            .unwrap_or(&REWARDS[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_id_has_a_definition() {
        for id in RewardId::all() {
            assert_eq!(Reward::get(*id).id, *id);
            assert_eq!(RewardId::from_str(id.as_str()), Some(*id));
        }
        assert_eq!(REWARDS.len(), RewardId::all().len());
    }
}
