//! Community feed commands

use anyhow::Result;
use chrono::Utc;

use rickmorty::community::{Feed, Post};

use super::AppContext;

async fn load_feed(ctx: &AppContext) -> Result<Feed> {
    Feed::load(ctx.store.as_ref(), Utc::now()).await
}

async fn save_feed(ctx: &AppContext, feed: &Feed) -> Result<()> {
    feed.save(ctx.store.as_ref()).await
}

pub async fn list_command(ctx: &AppContext) -> Result<()> {
    let feed = load_feed(ctx).await?;
    if feed.posts().is_empty() {
        println!("No posts yet.");
        return Ok(());
    }

    let now = Utc::now();
    for post in feed.posts() {
        print_post(post, now);
    }
    Ok(())
}

pub async fn post_command(ctx: &AppContext, content: &str) -> Result<()> {
    let mut feed = load_feed(ctx).await?;
    let now = Utc::now();
    let post = feed.create_post(content, now)?.clone();
    save_feed(ctx, &feed).await?;

    println!("Posted:");
    print_post(&post, now);
    Ok(())
}

pub async fn like_command(ctx: &AppContext, id: &str) -> Result<()> {
    let mut feed = load_feed(ctx).await?;
    let likes = feed.toggle_like(id)?;
    save_feed(ctx, &feed).await?;

    let liked = feed.get(id).is_some_and(|p| p.is_liked);
    println!("{} ({} likes)", if liked { "Liked" } else { "Unliked" }, likes);
    Ok(())
}

fn print_post(post: &Post, now: chrono::DateTime<Utc>) {
    let heart = if post.is_liked { "*" } else { " " };
    println!(
        "  {} - {}  [{}]",
        post.author.name,
        post.age_label(now),
        post.id
    );
    println!("    {}", post.content);
    println!(
        "    {} {} likes  {} comments\n",
        heart, post.likes, post.comments
    );
}
