//! Water intake command

use anyhow::Result;

use rickmorty::stats::achievements::HYDRATION_GOAL;

use super::{AppContext, now, print_events};

/// Log glasses of water for today
pub async fn water_command(ctx: &AppContext, glasses: u32) -> Result<()> {
    let now = now();
    let mut tracker = ctx.load_tracker().await?;
    let events = tracker.log_water(glasses, now);
    ctx.save_tracker(&tracker).await?;

    let total = tracker.water_today(now.date());
    println!("Water today: {}/{} glasses", total, HYDRATION_GOAL);
    if total >= HYDRATION_GOAL {
        println!("Daily hydration goal reached");
    }
    print_events(&events);
    Ok(())
}
