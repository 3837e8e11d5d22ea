use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::stats::parse_day;

/// Error type for habit validation
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HabitError {
    #[error("Habit title must not be empty")]
    EmptyTitle,

    #[error("Unknown frequency: {0} (expected daily, weekly or monthly)")]
    UnknownFrequency(String),
}

/// How often a habit is meant to be done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }
}

impl FromStr for Frequency {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(HabitError::UnknownFrequency(other.to_string())),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input for creating a habit
#[derive(Debug, Clone)]
pub struct HabitDraft {
    pub title: String,
    pub description: String,
    pub frequency: Frequency,
    pub icon: String,
    pub color: String,
}

impl HabitDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Default for HabitDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            frequency: Frequency::Daily,
            icon: "leaf".to_string(),
            color: "#8b5cf6".to_string(),
        }
    }
}

/// A tracked habit and the days it was completed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    /// Serialized as "YYYY-MM-DD" strings; unparseable entries are dropped on load
    #[serde(default, deserialize_with = "lenient_dates")]
    pub completed_dates: BTreeSet<NaiveDate>,
}

fn lenient_dates<'de, D>(deserializer: D) -> Result<BTreeSet<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw
        .iter()
        .filter_map(|s| {
            let day = parse_day(s);
            if day.is_none() {
                warn!("Ignoring invalid completion date: {}", s);
            }
            day
        })
        .collect())
}

impl Habit {
    /// Build a habit from a draft, assigning a fresh id.
    ///
    /// Blank titles are rejected; title and description are trimmed.
    pub fn from_draft(draft: HabitDraft) -> Result<Self, HabitError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(HabitError::EmptyTitle);
        }

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: draft.description.trim().to_string(),
            frequency: draft.frequency,
            icon: draft.icon,
            color: draft.color,
            completed_dates: BTreeSet::new(),
        })
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&date)
    }

    /// Flip membership of `date`. Returns true if the date is now completed.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        if self.completed_dates.remove(&date) {
            false
        } else {
            self.completed_dates.insert(date);
            true
        }
    }

    pub fn completion_count(&self) -> usize {
        self.completed_dates.len()
    }
}
