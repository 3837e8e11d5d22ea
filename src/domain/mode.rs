//! App modes and their color themes
//!
//! The app has two moods: a calm "personal growth" mode and an energetic
//! "action" mode. Each mode maps to a fixed palette; the config file may
//! override individual colors.

use serde::{Deserialize, Serialize};

/// UI mode selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppMode {
    #[default]
    PersonalGrowth,
    Action,
}

impl AppMode {
    /// Storage value (matches the `appMode` key contents)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PersonalGrowth => "personal_growth",
            Self::Action => "action",
        }
    }

    /// Parse a stored or user-supplied mode name.
    ///
    /// Accepts dashes in place of underscores so CLI input like
    /// `personal-growth` works.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "personal_growth" => Some(Self::PersonalGrowth),
            "action" => Some(Self::Action),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PersonalGrowth => "Personal Growth",
            Self::Action => "Action",
        }
    }

    /// The other mode
    pub fn toggled(&self) -> Self {
        match self {
            Self::PersonalGrowth => Self::Action,
            Self::Action => Self::PersonalGrowth,
        }
    }
}

impl std::fmt::Display for AppMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolved color palette for a mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub card: String,
    pub text: String,
    pub accent: String,
}

impl Theme {
    /// Built-in palette for a mode
    pub fn for_mode(mode: AppMode) -> Self {
        match mode {
            AppMode::PersonalGrowth => Self {
                primary: "#8b5cf6".to_string(),
                secondary: "#c4b5fd".to_string(),
                background: "#f5f3ff".to_string(),
                card: "#ffffff".to_string(),
                text: "#4b5563".to_string(),
                accent: "#a78bfa".to_string(),
            },
            AppMode::Action => Self {
                primary: "#ef4444".to_string(),
                secondary: "#fca5a5".to_string(),
                background: "#fef2f2".to_string(),
                card: "#ffffff".to_string(),
                text: "#1f2937".to_string(),
                accent: "#f87171".to_string(),
            },
        }
    }

    /// Apply per-color overrides on top of this palette
    pub fn with_overrides(mut self, overrides: &ThemeOverrides) -> Self {
        let fields = [
            (&mut self.primary, &overrides.primary),
            (&mut self.secondary, &overrides.secondary),
            (&mut self.background, &overrides.background),
            (&mut self.card, &overrides.card),
            (&mut self.text, &overrides.text),
            (&mut self.accent, &overrides.accent),
        ];
        for (slot, value) in fields {
            if let Some(value) = value {
                *slot = value.clone();
            }
        }
        self
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_mode(AppMode::default())
    }
}

/// Optional color overrides from config (`[theme.action]` etc.)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}
