//! Community feed
//!
//! A local feed of posts from other habit trackers. Posts can be liked and
//! unliked, and the user can share new posts, which go to the top.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::storage::{self, KeyValueStore, keys};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FeedError {
    #[error("Please enter some text for your post")]
    EmptyPost,

    #[error("Post not found: {0}")]
    PostNotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author: Author,
    pub content: String,
    pub likes: u32,
    pub comments: u32,
    pub created_at: DateTime<Utc>,
    pub is_liked: bool,
}

impl Post {
    /// Relative age label like "3 hours ago"
    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        let elapsed = now - self.created_at;
        if elapsed < Duration::minutes(1) {
            "Just now".to_string()
        } else if elapsed < Duration::hours(1) {
            plural(elapsed.num_minutes(), "minute")
        } else if elapsed < Duration::days(1) {
            plural(elapsed.num_hours(), "hour")
        } else {
            plural(elapsed.num_days(), "day")
        }
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Ordered list of posts, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    posts: Vec<Post>,
}

impl Feed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed seeded with a few example posts relative to `now`
    pub fn with_sample_posts(now: DateTime<Utc>) -> Self {
        let sample = |id: &str,
                      user_id: &str,
                      name: &str,
                      content: &str,
                      likes: u32,
                      comments: u32,
                      hours: i64,
                      liked: bool| Post {
            id: id.to_string(),
            author: Author {
                id: user_id.to_string(),
                name: name.to_string(),
            },
            content: content.to_string(),
            likes,
            comments,
            created_at: now - Duration::hours(hours),
            is_liked: liked,
        };

        Self {
            posts: vec![
                sample(
                    "1",
                    "101",
                    "Summer Smith",
                    "Three weeks in and my morning workout habit is at 18 check-ins. Feeling stronger every day!",
                    24,
                    5,
                    2,
                    false,
                ),
                sample(
                    "2",
                    "102",
                    "Birdperson",
                    "5 day meditation streak. Staying consistent with mindfulness. Anyone else meditating daily?",
                    17,
                    8,
                    3,
                    false,
                ),
                sample(
                    "3",
                    "103",
                    "Beth Smith",
                    "Finished my 30-day water challenge. 8 glasses a day is second nature now.",
                    42,
                    12,
                    5,
                    true,
                ),
            ],
        }
    }

    /// Load the stored feed.
    ///
    /// On first use the feed is seeded with sample posts and saved right away,
    /// so their timestamps stay fixed across runs.
    pub async fn load(store: &dyn KeyValueStore, now: DateTime<Utc>) -> anyhow::Result<Self> {
        if let Some(feed) = storage::get_json(store, keys::COMMUNITY_FEED).await? {
            return Ok(feed);
        }

        debug!("Seeding community feed");
        let feed = Self::with_sample_posts(now);
        feed.save(store).await?;
        Ok(feed)
    }

    pub async fn save(&self, store: &dyn KeyValueStore) -> anyhow::Result<()> {
        storage::set_json(store, keys::COMMUNITY_FEED, self).await
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Flip the like state of a post; returns the new like count
    pub fn toggle_like(&mut self, id: &str) -> Result<u32, FeedError> {
        let post = self
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| FeedError::PostNotFound(id.to_string()))?;

        if post.is_liked {
            post.likes = post.likes.saturating_sub(1);
        } else {
            post.likes += 1;
        }
        post.is_liked = !post.is_liked;
        Ok(post.likes)
    }

    /// Share a new post from the current user at the top of the feed
    pub fn create_post(&mut self, content: &str, now: DateTime<Utc>) -> Result<&Post, FeedError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(FeedError::EmptyPost);
        }

        self.posts.insert(
            0,
            Post {
                id: uuid::Uuid::new_v4().to_string(),
                author: Author {
                    id: "current_user".to_string(),
                    name: "You".to_string(),
                },
                content: content.to_string(),
                likes: 0,
                comments: 0,
                created_at: now,
                is_liked: false,
            },
        );
        Ok(&self.posts[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2023-08-25T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_toggle_like_twice_restores_count() {
        let mut feed = Feed::with_sample_posts(now());
        assert_eq!(feed.toggle_like("1").unwrap(), 25);
        assert!(feed.get("1").unwrap().is_liked);
        assert_eq!(feed.toggle_like("1").unwrap(), 24);
        assert!(!feed.get("1").unwrap().is_liked);

        // already liked by us
        assert_eq!(feed.toggle_like("3").unwrap(), 41);
    }

    #[test]
    fn test_unknown_post() {
        let mut feed = Feed::new();
        assert_eq!(
            feed.toggle_like("42").unwrap_err(),
            FeedError::PostNotFound("42".to_string())
        );
    }

    #[test]
    fn test_create_post_goes_first() {
        let mut feed = Feed::with_sample_posts(now());
        assert_eq!(feed.create_post("   ", now()).unwrap_err(), FeedError::EmptyPost);

        let post = feed.create_post(" Wubba lubba dub dub ", now()).unwrap();
        assert_eq!(post.content, "Wubba lubba dub dub");
        assert_eq!(post.author.name, "You");
        assert_eq!(post.age_label(now()), "Just now");
        assert_eq!(feed.posts().len(), 4);
        assert_eq!(feed.posts()[1].id, "1");
    }

    #[test]
    fn test_age_labels() {
        let feed = Feed::with_sample_posts(now());
        assert_eq!(feed.get("1").unwrap().age_label(now()), "2 hours ago");
        assert_eq!(
            feed.get("3").unwrap().age_label(now() + Duration::hours(20)),
            "1 day ago"
        );
    }

    #[tokio::test]
    async fn test_seeded_feed_is_persisted_on_first_load() {
        let store = crate::storage::MemoryStore::new();

        let first = Feed::load(&store, now()).await.unwrap();
        assert_eq!(first.posts().len(), 3);
        assert!(store.get_item(keys::COMMUNITY_FEED).await.unwrap().is_some());

        // a later load keeps the original timestamps
        let later = now() + Duration::hours(6);
        let again = Feed::load(&store, later).await.unwrap();
        assert_eq!(again, first);
        assert_eq!(again.get("1").unwrap().age_label(later), "8 hours ago");
    }
}
