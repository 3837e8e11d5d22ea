//! Streak, reward and statistics commands

use anyhow::{Result, bail};

use rickmorty::stats::{StatsSummary, Timeframe};

use super::habit::print_streak_line;
use super::{AppContext, now};

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Show the overall streak
pub async fn streak_command(ctx: &AppContext) -> Result<()> {
    let tracker = ctx.load_tracker().await?;
    let today = now().date();
    let info = tracker.streak_info(today);

    print_streak_line(&info, today);
    if let Some(last) = info.last_activity_day {
        println!("Last activity: {}", last);
    }
    Ok(())
}

/// Show reward progress and points
pub async fn rewards_command(ctx: &AppContext) -> Result<()> {
    let tracker = ctx.load_tracker().await?;
    let achievements = tracker.achievements();

    println!(
        "Points: {}  ({}/{} rewards unlocked)\n",
        achievements.total_points(),
        achievements.unlocked_count(),
        achievements.rewards().len()
    );

    for progress in achievements.rewards() {
        let reward = progress.definition();
        let status = if progress.is_unlocked {
            "unlocked".to_string()
        } else {
            format!(
                "{}/{} ({:.0}%)",
                progress.current_count.min(reward.required_count),
                reward.required_count,
                progress.progress_fraction() * 100.0
            )
        };
        println!("  {:<15} {:>4} pts  {}", reward.title, reward.points, status);
        println!("      {}", reward.description);
    }
    Ok(())
}

/// Show completion statistics for a timeframe
pub async fn stats_command(ctx: &AppContext, timeframe: &str) -> Result<()> {
    let Some(timeframe) = Timeframe::from_str(timeframe) else {
        bail!("Unknown timeframe '{}', expected week, month or year", timeframe);
    };

    let tracker = ctx.load_tracker().await?;
    let today = now().date();
    let summary = StatsSummary::build(tracker.habits(), timeframe, today);

    println!("Habits: {}", summary.total_habits);
    println!("Completions: {}", summary.total_completions);
    println!("Completion rate (7 days): {}%", summary.completion_rate);
    println!("Current streak: {}", summary.current_streak);
    println!("Best streak: {}", summary.longest_streak);

    println!("\nThis week:");
    for (label, count) in WEEKDAYS.iter().zip(summary.weekday_completions) {
        println!("  {} {:>3} {}", label, count, "#".repeat(count as usize));
    }

    if !summary.performance.is_empty() {
        println!("\nHabit performance ({}):", timeframe.label());
        for perf in &summary.performance {
            println!(
                "  {:<24} {:>3}%  ({} days)",
                perf.title, perf.percentage, perf.completed
            );
        }
    }
    Ok(())
}
