//! SQLite-backed key-value store
//!
//! Manages the `~/.rickmorty/data.db` database with automatic schema migration.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

use super::KeyValueStore;

/// Database wrapper shared across clones
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create the store at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open data db: {}", path.display()))?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        debug!("Opened data db at {}", path.display());
        Self::with_connection(conn)
    }

    /// In-memory database, mostly for tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory db")?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("Data DB lock poisoned")
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)?;
        drop(conn);
        self.run_migrations()
    }

    /// Run any pending migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn();

        let version: i32 = conn
            .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))
            .unwrap_or(0);

        // Migration 1: key-value table
        if version < 1 {
            conn.execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS kv_store (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at INTEGER NOT NULL
                );
                "#,
            )?;
            conn.execute("INSERT OR REPLACE INTO schema_version VALUES (1)", [])?;
            debug!("Applied data db migration 1");
        }

        Ok(())
    }

    /// Delete every stored value
    pub fn clear(&self) -> Result<()> {
        self.conn().execute("DELETE FROM kv_store", [])?;
        Ok(())
    }

    fn now_ms() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn();
        let value = conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |r| {
                r.get::<_, String>(0)
            })
            .optional()
            .with_context(|| format!("Failed to read key: {}", key))?;
        Ok(value)
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            r#"
            INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3
            "#,
            (key, value, Self::now_ms()),
        )
        .with_context(|| format!("Failed to write key: {}", key))?;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let conn = self.conn();
        conn.execute("DELETE FROM kv_store WHERE key = ?1", [key])
            .with_context(|| format!("Failed to remove key: {}", key))?;
        Ok(())
    }
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("data.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.set_item("appMode", "action").await.unwrap();
            store.set_item("appMode", "personal_growth").await.unwrap();
            store.set_item("userToken", "demo-token").await.unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(
            store.get_item("appMode").await.unwrap().as_deref(),
            Some("personal_growth")
        );

        store.remove_item("userToken").await.unwrap();
        assert_eq!(store.get_item("userToken").await.unwrap(), None);

        store.clear().unwrap();
        assert_eq!(store.get_item("appMode").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.get_item("trackerState").await.unwrap(), None);

        // removing a missing key is not an error
        store.remove_item("trackerState").await.unwrap();

        store.set_item("trackerState", "{}").await.unwrap();
        let copy = store.clone();
        assert_eq!(
            copy.get_item("trackerState").await.unwrap().as_deref(),
            Some("{}")
        );

        // re-running migrations on an initialized schema is a no-op
        store.init_schema().unwrap();
        assert_eq!(
            store.get_item("trackerState").await.unwrap().as_deref(),
            Some("{}")
        );
    }
}
