//! Init command implementation

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use rickmorty::config::Config;
use rickmorty::storage::SqliteStore;

use super::resolve_config_path;

/// Default configuration content for rickmorty init
pub const DEFAULT_CONFIG: &str = r##"# Rick&Morty Configuration
# ========================

[settings]
# Completing a habit for today before this hour (local time) unlocks Early Bird
early_bird_hour = 9

# First column of the calendar: "monday" or "sunday"
week_start = "monday"

# Mode used until you pick one: "personal_growth" or "action"
default_mode = "personal_growth"

# Simulated network delay for login and habit sync, in milliseconds
remote_latency_ms = 0

# Where data.db lives (defaults to ~/.rickmorty)
# data_dir = "/path/to/data"

# Per-mode color overrides. Any of: primary, secondary, background, card,
# text, accent
[theme.personal_growth]
# primary = "#8b5cf6"

[theme.action]
# primary = "#ef4444"
"##;

/// Write the default config and create the data database
pub async fn init_command(
    config_override: Option<&Path>,
    data_dir: Option<&Path>,
    force: bool,
) -> Result<()> {
    let config_path = resolve_config_path(config_override);

    if config_path.exists() && !force {
        println!(
            "Config file already exists: {} (use --force to overwrite)",
            config_path.display()
        );
    } else {
        write_default_config(&config_path)?;
        println!("Created {}", config_path.display());
    }

    let mut config = Config::from_file(&config_path)?;
    if let Some(dir) = data_dir {
        config.settings.data_dir = Some(dir.to_path_buf());
    }

    let db_path = config.data_db_path();
    SqliteStore::open(&db_path)?;
    info!("Data database ready at {}", db_path.display());
    println!("Data: {}", db_path.display());

    Ok(())
}

fn write_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write config file: {}", path.display()))
}
