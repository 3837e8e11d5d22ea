//! Configuration loading and management

mod io;

use std::path::PathBuf;
use std::time::Duration;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::domain::{AppMode, Theme, ThemeOverrides};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,

    /// Per-mode color overrides
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// General settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Completing a habit before this hour (local time) unlocks Early Bird
    #[serde(default = "default_early_bird_hour")]
    pub early_bird_hour: u32,

    /// First column of calendar views
    #[serde(default)]
    pub week_start: WeekStart,

    /// Mode used until the user picks one
    #[serde(default)]
    pub default_mode: AppMode,

    /// Simulated network delay for the mock remote and login, in milliseconds
    #[serde(default)]
    pub remote_latency_ms: u64,

    /// Where the data database lives (defaults to ~/.rickmorty)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_early_bird_hour() -> u32 {
    9
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            early_bird_hour: default_early_bird_hour(),
            week_start: WeekStart::default(),
            default_mode: AppMode::default(),
            remote_latency_ms: 0,
            data_dir: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn weekday(&self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Sunday => Weekday::Sun,
        }
    }
}

/// `[theme.personal_growth]` and `[theme.action]` tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default)]
    pub personal_growth: ThemeOverrides,
    #[serde(default)]
    pub action: ThemeOverrides,
}

impl Config {
    /// Resolved theme for a mode, config overrides applied
    pub fn theme_for(&self, mode: AppMode) -> Theme {
        let overrides = match mode {
            AppMode::PersonalGrowth => &self.theme.personal_growth,
            AppMode::Action => &self.theme.action,
        };
        Theme::for_mode(mode).with_overrides(overrides)
    }

    /// Directory holding the data database
    pub fn data_dir(&self) -> PathBuf {
        self.settings
            .data_dir
            .clone()
            .unwrap_or_else(Self::global_config_dir)
    }

    /// Simulated network delay for the remote and login
    pub fn remote_latency(&self) -> Duration {
        Duration::from_millis(self.settings.remote_latency_ms)
    }

    /// Path of the data database
    pub fn data_db_path(&self) -> PathBuf {
        self.data_dir().join("data.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r##"
            [settings]
            week_start = "sunday"

            [theme.action]
            primary = "#00ff00"
            "##,
        )
        .unwrap();

        assert_eq!(config.settings.early_bird_hour, 9);
        assert_eq!(config.settings.week_start.weekday(), Weekday::Sun);
        assert_eq!(config.settings.default_mode, AppMode::PersonalGrowth);
        assert_eq!(config.theme_for(AppMode::Action).primary, "#00ff00");
        assert_eq!(config.theme_for(AppMode::PersonalGrowth).primary, "#8b5cf6");
    }

    #[test]
    fn test_default_config_serializes() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, Config::default());
    }
}
