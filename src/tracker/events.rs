use crate::domain::Habit;
use crate::stats::achievements::GamificationEvent;

/// Something the UI should tell the user about after a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerEvent {
    /// The overall daily streak moved
    StreakChanged { previous: u32, current: u32 },
    /// Reward unlocks and points (one-shot notifications)
    Gamification(GamificationEvent),
}

/// Result of a habit mutation
#[derive(Debug, Clone)]
pub struct HabitChange {
    /// The habit after the change (or as it was, for deletions)
    pub habit: Habit,
    pub events: Vec<TrackerEvent>,
}

impl HabitChange {
    /// Titles of rewards unlocked by this change
    pub fn unlocked_titles(&self) -> Vec<&'static str> {
        unlocked_titles(&self.events)
    }
}

/// Titles of rewards unlocked in a batch of events
pub fn unlocked_titles(events: &[TrackerEvent]) -> Vec<&'static str> {
    events
        .iter()
        .filter_map(|e| match e {
            TrackerEvent::Gamification(GamificationEvent::RewardUnlocked(u)) => {
                Some(u.reward.title)
            }
            _ => None,
        })
        .collect()
}
