//! Login, logout and reset commands

use anyhow::Result;
use tracing::info;

use rickmorty::auth::AuthService;
use rickmorty::storage::keys;

use super::AppContext;

fn auth_service(ctx: &AppContext) -> AuthService {
    AuthService::new(ctx.store.clone()).with_latency(ctx.latency())
}

pub async fn login_command(ctx: &AppContext, email: &str, password: &str) -> Result<()> {
    let session = auth_service(ctx).login(email, password).await?;
    println!("Logged in as {}", session.email);
    Ok(())
}

pub async fn logout_command(ctx: &AppContext) -> Result<()> {
    let auth = auth_service(ctx);
    if !auth.is_logged_in().await? {
        println!("Not logged in.");
        return Ok(());
    }
    auth.logout().await?;
    println!("Logged out.");
    Ok(())
}

/// Clear habits, water, rewards and the community feed
pub async fn reset_command(ctx: &AppContext, yes: bool) -> Result<()> {
    if !yes {
        println!("This clears all your habits and progress. Re-run with --yes to confirm.");
        return Ok(());
    }

    let mut tracker = ctx.load_tracker().await?;
    tracker.reset();
    ctx.save_tracker(&tracker).await?;
    ctx.store.remove_item(keys::COMMUNITY_FEED).await?;
    info!("Reset all data");

    println!("All habits and progress cleared.");
    Ok(())
}
