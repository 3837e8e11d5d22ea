//! Device key-value storage
//!
//! The app keeps a handful of values (selected mode, auth token, tracker
//! snapshot, community feed) under string keys. Values are strings; typed
//! values are stored as JSON.

mod db;
mod memory;

pub use db::SqliteStore;
pub use memory::MemoryStore;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Storage keys used by the app
pub mod keys {
    pub const APP_MODE: &str = "appMode";
    pub const USER_TOKEN: &str = "userToken";
    pub const TRACKER_STATE: &str = "trackerState";
    pub const COMMUNITY_FEED: &str = "communityFeed";
}

/// Asynchronous string key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` if the key is not set
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace a value
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key; removing a missing key is not an error
    async fn remove_item(&self, key: &str) -> Result<()>;
}

/// Read and deserialize a JSON value
pub async fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>> {
    let Some(raw) = store.get_item(key).await? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse stored value for key: {}", key))?;
    Ok(Some(value))
}

/// Serialize and store a JSON value
pub async fn set_json<T: Serialize + Sync>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)
        .with_context(|| format!("Failed to serialize value for key: {}", key))?;
    store.set_item(key, &raw).await
}
