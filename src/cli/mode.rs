//! Mode command

use anyhow::{Result, bail};

use rickmorty::AppMode;

use super::AppContext;

/// Show the current mode, or switch to `mode` ("toggle" flips it)
pub async fn mode_command(ctx: &AppContext, mode: Option<&str>) -> Result<()> {
    let mut tracker = ctx.load_tracker().await?;

    if let Some(raw) = mode {
        let target = if raw.eq_ignore_ascii_case("toggle") {
            tracker.mode().toggled()
        } else {
            match AppMode::from_str(raw) {
                Some(m) => m,
                None => bail!("Unknown mode '{}', expected personal_growth or action", raw),
            }
        };

        if tracker.switch_mode(target) {
            ctx.save_tracker(&tracker).await?;
            println!("Switched to {} mode", target.label());
        } else {
            println!("Already in {} mode", target.label());
        }
    }

    let current = tracker.mode();
    let theme = ctx.config.theme_for(current);
    println!("Mode: {} ({})", current.label(), current);
    println!("  primary    {}", theme.primary);
    println!("  secondary  {}", theme.secondary);
    println!("  background {}", theme.background);
    println!("  card       {}", theme.card);
    println!("  text       {}", theme.text);
    println!("  accent     {}", theme.accent);
    Ok(())
}
