//! Habit commands

use anyhow::{Result, bail};
use chrono::NaiveDate;

use rickmorty::stats::{StreakInfo, compute_streak, parse_day};
use rickmorty::{Frequency, Habit, HabitDraft};

use super::{AppContext, now, print_events, resolve_habit_id, sync_habit};

/// Add a new habit
pub async fn add_command(
    ctx: &AppContext,
    title: String,
    description: String,
    frequency: &str,
    icon: Option<String>,
    color: Option<String>,
) -> Result<()> {
    let frequency: Frequency = frequency.parse()?;
    let mut draft = HabitDraft::new(title)
        .with_frequency(frequency)
        .with_description(description);
    if let Some(icon) = icon {
        draft.icon = icon;
    }
    if let Some(color) = color {
        draft.color = color;
    }

    let mut tracker = ctx.load_tracker().await?;
    let change = tracker.add_habit(draft, now())?;
    ctx.save_tracker(&tracker).await?;

    println!(
        "Added {} habit: {} ({})",
        change.habit.frequency, change.habit.title, change.habit.id
    );
    print_events(&change.events);
    Ok(())
}

/// List habits, optionally filtered by frequency
pub async fn list_command(ctx: &AppContext, frequency: &str) -> Result<()> {
    let filter = match frequency.to_lowercase().as_str() {
        "all" => None,
        other => Some(other.parse::<Frequency>()?),
    };

    let tracker = ctx.load_tracker().await?;
    let today = now().date();
    let habits = tracker.habits_by_frequency(filter);

    if habits.is_empty() {
        println!("No habits found.");
        return Ok(());
    }

    println!("Habits ({}):\n", habits.len());
    for habit in habits {
        print_habit(habit, today);
    }

    Ok(())
}

/// Delete a habit
pub async fn delete_command(ctx: &AppContext, id: &str) -> Result<()> {
    let mut tracker = ctx.load_tracker().await?;
    let id = resolve_habit_id(&tracker, id)?;
    let change = tracker.delete_habit(&id, now())?;
    ctx.save_tracker(&tracker).await?;

    println!("Deleted habit: {}", change.habit.title);
    print_events(&change.events);
    Ok(())
}

/// Toggle completion of a habit for a day
pub async fn done_command(ctx: &AppContext, id: &str, date: Option<&str>) -> Result<()> {
    let now = now();
    let date = match date {
        Some(raw) => match parse_day(raw) {
            Some(day) => day,
            None => bail!("Invalid date '{}', expected YYYY-MM-DD", raw),
        },
        None => now.date(),
    };

    let mut tracker = ctx.load_tracker().await?;
    let id = resolve_habit_id(&tracker, id)?;
    let change = tracker.toggle_completion(&id, date, now)?;
    ctx.save_tracker(&tracker).await?;
    sync_habit(ctx, &change.habit).await;

    if change.habit.is_completed_on(date) {
        println!("Completed {} on {}", change.habit.title, date);
    } else {
        println!("Unchecked {} on {}", change.habit.title, date);
    }
    print_events(&change.events);
    Ok(())
}

/// Today's overview: progress, streak and habits
pub async fn today_command(ctx: &AppContext) -> Result<()> {
    let tracker = ctx.load_tracker().await?;
    let today = now().date();
    let streak = tracker.streak_info(today);
    let (done, total) = tracker.today_progress(today);

    println!("{} - {}", tracker.mode().label(), today.format("%A, %B %-d"));
    println!("Today: {}/{} daily habits done", done, total);
    print_streak_line(&streak, today);
    println!("Water: {} glasses", tracker.water_today(today));

    if tracker.habits().is_empty() {
        println!("\nNo habits yet. Add one with `rickmorty habit add <title>`.");
        return Ok(());
    }

    println!();
    for habit in tracker.habits() {
        print_habit(habit, today);
    }
    Ok(())
}

pub fn print_streak_line(streak: &StreakInfo, today: NaiveDate) {
    if streak.is_active(today) {
        println!("Streak: {} day(s) (best {})", streak.current, streak.best);
    } else {
        println!("Streak: none (best {})", streak.best);
    }
}

fn print_habit(habit: &Habit, today: NaiveDate) {
    let mark = if habit.is_completed_on(today) { "x" } else { " " };
    println!(
        "  [{}] {} {:<8} {} - streak {}",
        mark,
        short_id(&habit.id),
        habit.frequency.label(),
        habit.title,
        compute_streak(&habit.completed_dates, today)
    );
    if !habit.description.is_empty() {
        println!("      {}", habit.description);
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
