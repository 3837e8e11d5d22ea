use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

use cli::AppContext;

#[derive(Parser)]
#[command(name = "rickmorty")]
#[command(about = "Rick&Morty - track habits, keep streaks, unlock rewards")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.rickmorty/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory for the data database (overrides settings.data_dir)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the config file and data database
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Manage habits
    Habit {
        #[command(subcommand)]
        command: HabitCommands,
    },

    /// Log glasses of water for today
    Water {
        /// Number of glasses
        #[arg(default_value_t = 1)]
        glasses: u32,
    },

    /// Show the current and best streak
    Streak,

    /// Show rewards and points
    Rewards,

    /// Show a month calendar of completed days
    Calendar {
        /// Month to show as YYYY-MM (defaults to the current month)
        #[arg(long)]
        month: Option<String>,
    },

    /// Show completion statistics
    Stats {
        /// week, month or year
        #[arg(long, default_value = "week")]
        timeframe: String,
    },

    /// Show or switch the UI mode
    Mode {
        /// personal_growth, action or toggle
        mode: Option<String>,
    },

    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Log out
    Logout,

    /// Community feed
    Feed {
        #[command(subcommand)]
        command: FeedCommands,
    },

    /// Export habits and rewards as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Clear all habits and progress
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum HabitCommands {
    /// Add a new habit
    Add {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// daily, weekly or monthly
        #[arg(long, default_value = "daily")]
        frequency: String,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },

    /// List habits
    List {
        /// all, daily, weekly or monthly
        #[arg(long, default_value = "all")]
        frequency: String,
    },

    /// Delete a habit
    Delete {
        /// Habit id (a unique prefix is enough)
        id: String,
    },

    /// Toggle completion of a habit
    Done {
        /// Habit id (a unique prefix is enough)
        id: String,
        /// Day to toggle as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
enum FeedCommands {
    /// Show recent posts
    List,

    /// Share a post with the community
    Post { content: String },

    /// Like or unlike a post
    Like { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    if let Some(Commands::Init { force }) = cli.command {
        return cli::init::init_command(cli.config.as_deref(), cli.data_dir.as_deref(), force).await;
    }

    let ctx = AppContext::open(cli.config.as_deref(), cli.data_dir.as_deref())?;

    match cli.command {
        // Handled before the context is opened
        Some(Commands::Init { .. }) => {}
        Some(Commands::Habit { command }) => match command {
            HabitCommands::Add {
                title,
                description,
                frequency,
                icon,
                color,
            } => {
                cli::habit::add_command(&ctx, title, description, &frequency, icon, color).await?;
            }
            HabitCommands::List { frequency } => {
                cli::habit::list_command(&ctx, &frequency).await?;
            }
            HabitCommands::Delete { id } => {
                cli::habit::delete_command(&ctx, &id).await?;
            }
            HabitCommands::Done { id, date } => {
                cli::habit::done_command(&ctx, &id, date.as_deref()).await?;
            }
        },
        Some(Commands::Water { glasses }) => {
            cli::water::water_command(&ctx, glasses).await?;
        }
        Some(Commands::Streak) => {
            cli::progress::streak_command(&ctx).await?;
        }
        Some(Commands::Rewards) => {
            cli::progress::rewards_command(&ctx).await?;
        }
        Some(Commands::Calendar { month }) => {
            cli::calendar::calendar_command(&ctx, month.as_deref()).await?;
        }
        Some(Commands::Stats { timeframe }) => {
            cli::progress::stats_command(&ctx, &timeframe).await?;
        }
        Some(Commands::Mode { mode }) => {
            cli::mode::mode_command(&ctx, mode.as_deref()).await?;
        }
        Some(Commands::Login { email, password }) => {
            cli::account::login_command(&ctx, &email, &password).await?;
        }
        Some(Commands::Logout) => {
            cli::account::logout_command(&ctx).await?;
        }
        Some(Commands::Feed { command }) => match command {
            FeedCommands::List => cli::feed::list_command(&ctx).await?,
            FeedCommands::Post { content } => cli::feed::post_command(&ctx, &content).await?,
            FeedCommands::Like { id } => cli::feed::like_command(&ctx, &id).await?,
        },
        Some(Commands::Export { output }) => {
            cli::export::export_command(&ctx, output.as_deref()).await?;
        }
        Some(Commands::Reset { yes }) => {
            cli::account::reset_command(&ctx, yes).await?;
        }
        None => {
            // Default: show today's overview
            cli::habit::today_command(&ctx).await?;
        }
    }

    Ok(())
}
