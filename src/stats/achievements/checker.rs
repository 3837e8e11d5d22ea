//! Reward checking logic
//!
//! Pure functions that compare activity counters against each reward's
//! threshold. Nothing here touches storage or the clock.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::definitions::{HYDRATION_GOAL, Reward, RewardId};
use crate::domain::{Frequency, Habit};

/// Activity counters a reward evaluation looks at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    /// Number of habits the user has
    pub habit_count: u32,
    /// Current overall daily streak
    pub streak_count: u32,
    /// Glasses of water logged today
    pub hydration_count: u32,
    /// Every daily habit is done today
    pub perfect_day: bool,
    /// A habit was completed before the early-bird cutoff today
    pub early_completion: bool,
}

/// Progress of a single reward
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardProgress {
    pub id: RewardId,
    pub current_count: u32,
    pub is_unlocked: bool,
}

impl RewardProgress {
    pub fn locked(id: RewardId) -> Self {
        Self {
            id,
            current_count: 0,
            is_unlocked: false,
        }
    }

    pub fn definition(&self) -> &'static Reward {
        Reward::get(self.id)
    }

    /// Fraction of the threshold reached, clamped to 1.0
    pub fn progress_fraction(&self) -> f32 {
        let required = self.definition().required_count.max(1);
        (self.current_count as f32 / required as f32).min(1.0)
    }
}

/// Fresh, all-locked progress for every reward
pub fn initial_progress() -> Vec<RewardProgress> {
    RewardId::all()
        .iter()
        .map(|id| RewardProgress::locked(*id))
        .collect()
}

/// Result of evaluating all rewards once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub rules: Vec<RewardProgress>,
    pub points_delta: u32,
    pub newly_unlocked: Vec<RewardId>,
}

/// Evaluate every reward against the signals.
///
/// Already-unlocked rewards keep their state and never award points again.
/// Hydration Hero counts evaluations, not days: each call made with at least
/// [`HYDRATION_GOAL`] glasses adds one to its progress.
pub fn evaluate(rules: &[RewardProgress], signals: &Signals) -> Evaluation {
    let mut updated = Vec::with_capacity(rules.len());
    let mut points_delta = 0;
    let mut newly_unlocked = Vec::new();

    for rule in rules {
        let mut rule = rule.clone();
        if !rule.is_unlocked && advance(&mut rule, signals) {
            rule.is_unlocked = true;
            points_delta += rule.definition().points;
            newly_unlocked.push(rule.id);
        }
        updated.push(rule);
    }

    Evaluation {
        rules: updated,
        points_delta,
        newly_unlocked,
    }
}

/// Update progress for a locked rule; returns true if it should unlock now
fn advance(rule: &mut RewardProgress, signals: &Signals) -> bool {
    let required = rule.definition().required_count;
    match rule.id {
        RewardId::EarlyBird => {
            if signals.early_completion {
                rule.current_count = required;
            }
            signals.early_completion
        }
        RewardId::StreakMaster => {
            rule.current_count = signals.streak_count;
            signals.streak_count >= required
        }
        RewardId::HydrationHero => {
            if signals.hydration_count >= HYDRATION_GOAL {
                rule.current_count += 1;
            }
            rule.current_count >= required
        }
        RewardId::HabitBuilder => {
            rule.current_count = signals.habit_count;
            signals.habit_count >= required
        }
        RewardId::PerfectDay => {
            if signals.perfect_day {
                rule.current_count = required;
            }
            signals.perfect_day
        }
    }
}

/// True when at least one daily habit exists and all of them are done on `day`
pub fn is_perfect_day<'a, I>(habits: I, day: NaiveDate) -> bool
where
    I: IntoIterator<Item = &'a Habit>,
{
    let mut any_daily = false;
    for habit in habits {
        if habit.frequency != Frequency::Daily {
            continue;
        }
        any_daily = true;
        if !habit.is_completed_on(day) {
            return false;
        }
    }
    any_daily
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HabitDraft;

    fn progress_for(eval: &Evaluation, id: RewardId) -> &RewardProgress {
        eval.rules.iter().find(|r| r.id == id).unwrap()
    }

    #[test]
    fn test_habit_builder_awards_once() {
        let rules = initial_progress();
        let first = evaluate(
            &rules,
            &Signals {
                habit_count: 5,
                ..Default::default()
            },
        );
        assert_eq!(first.newly_unlocked, vec![RewardId::HabitBuilder]);
        assert_eq!(first.points_delta, 40);

        let second = evaluate(
            &first.rules,
            &Signals {
                habit_count: 6,
                ..Default::default()
            },
        );
        assert!(second.newly_unlocked.is_empty());
        assert_eq!(second.points_delta, 0);
        assert!(progress_for(&second, RewardId::HabitBuilder).is_unlocked);
    }

    #[test]
    fn test_hydration_hero_needs_three_evaluations() {
        let hydrated = Signals {
            hydration_count: 8,
            ..Default::default()
        };

        let mut rules = initial_progress();
        for _ in 0..2 {
            let eval = evaluate(&rules, &hydrated);
            assert!(eval.newly_unlocked.is_empty());
            rules = eval.rules;
        }
        let hero = rules.iter().find(|r| r.id == RewardId::HydrationHero).unwrap();
        assert_eq!(hero.current_count, 2);
        assert!(!hero.is_unlocked);

        let third = evaluate(&rules, &hydrated);
        assert_eq!(third.newly_unlocked, vec![RewardId::HydrationHero]);
        assert_eq!(third.points_delta, 30);
    }

    #[test]
    fn test_hydration_below_goal_does_not_count() {
        let eval = evaluate(
            &initial_progress(),
            &Signals {
                hydration_count: 7,
                ..Default::default()
            },
        );
        assert_eq!(progress_for(&eval, RewardId::HydrationHero).current_count, 0);
    }

    #[test]
    fn test_streak_master_tracks_streak() {
        let eval = evaluate(
            &initial_progress(),
            &Signals {
                streak_count: 4,
                ..Default::default()
            },
        );
        let master = progress_for(&eval, RewardId::StreakMaster);
        assert_eq!(master.current_count, 4);
        assert!(!master.is_unlocked);
        assert!((master.progress_fraction() - 4.0 / 7.0).abs() < f32::EPSILON);

        let eval = evaluate(
            &eval.rules,
            &Signals {
                streak_count: 7,
                ..Default::default()
            },
        );
        assert_eq!(eval.newly_unlocked, vec![RewardId::StreakMaster]);
        assert_eq!(eval.points_delta, 50);
    }

    #[test]
    fn test_unlocked_rule_is_never_relocked() {
        let eval = evaluate(
            &initial_progress(),
            &Signals {
                streak_count: 9,
                ..Default::default()
            },
        );
        // streak broken afterwards
        let eval = evaluate(&eval.rules, &Signals::default());
        let master = progress_for(&eval, RewardId::StreakMaster);
        assert!(master.is_unlocked);
        assert_eq!(master.current_count, 9);
    }

    #[test]
    fn test_multiple_unlocks_sum_points() {
        let eval = evaluate(
            &initial_progress(),
            &Signals {
                habit_count: 5,
                perfect_day: true,
                early_completion: true,
                ..Default::default()
            },
        );
        assert_eq!(
            eval.newly_unlocked,
            vec![RewardId::EarlyBird, RewardId::HabitBuilder, RewardId::PerfectDay]
        );
        assert_eq!(eval.points_delta, 20 + 40 + 50);
    }

    #[test]
    fn test_perfect_day_rules() {
        let day = NaiveDate::from_ymd_opt(2023, 4, 18).unwrap();
        let mut meditate = Habit::from_draft(HabitDraft::new("Meditate")).unwrap();
        let mut read = Habit::from_draft(HabitDraft::new("Read")).unwrap();
        let workout =
            Habit::from_draft(HabitDraft::new("Workout").with_frequency(Frequency::Weekly))
                .unwrap();

        meditate.toggle(day);
        assert!(!is_perfect_day([&meditate, &read, &workout], day));

        read.toggle(day);
        // weekly habits are not required
        assert!(is_perfect_day([&meditate, &read, &workout], day));

        // no daily habits at all
        assert!(!is_perfect_day([&workout], day));
        assert!(!is_perfect_day(std::iter::empty::<&Habit>(), day));
    }
}
