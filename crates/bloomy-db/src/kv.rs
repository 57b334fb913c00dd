//! # Key-Value Store
//!
//! The durable blob store the storefront persists into: string keys, JSON
//! string values, every call async.
//!
//! ## Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │                     trait KeyValueStore                                 │
//! │                get / set / remove (async)                               │
//! │                    │                  │                                 │
//! │                    ▼                  ▼                                 │
//! │            SqliteKvStore        MemoryKvStore                           │
//! │            kv_store table       RwLock<HashMap>                         │
//! │            native builds        tests, web build                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::DbResult;

/// Asynchronous string-keyed, string-valued storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value under `key`, or `None` if nothing is stored.
    async fn get(&self, key: &str) -> DbResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> DbResult<()>;

    /// Deletes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> DbResult<()>;
}

// =============================================================================
// SQLite
// =============================================================================

/// [`KeyValueStore`] on the `kv_store` table.
#[derive(Debug, Clone)]
pub struct SqliteKvStore {
    pool: SqlitePool,
}

impl SqliteKvStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteKvStore { pool }
    }

    /// Number of stored keys.
    pub async fn len(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_store")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl KeyValueStore for SqliteKvStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, bytes = value.len(), "Writing blob");

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> DbResult<()> {
        debug!(key = %key, "Removing blob");

        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// =============================================================================
// In-Memory
// =============================================================================

/// [`KeyValueStore`] kept in process memory. Lost on exit.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> DbResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn exercise(store: &dyn KeyValueStore) {
        assert_eq!(store.get("userData").await.unwrap(), None);

        store.set("userData", r#"{"fullName":"Aysel"}"#).await.unwrap();
        assert_eq!(
            store.get("userData").await.unwrap().as_deref(),
            Some(r#"{"fullName":"Aysel"}"#)
        );

        store.set("userData", "{}").await.unwrap();
        assert_eq!(store.get("userData").await.unwrap().as_deref(), Some("{}"));

        store.remove("userData").await.unwrap();
        assert_eq!(store.get("userData").await.unwrap(), None);

        // Removing twice is fine.
        store.remove("userData").await.unwrap();
    }

    #[tokio::test]
    async fn test_memory_store() {
        exercise(&MemoryKvStore::new()).await;
    }

    #[tokio::test]
    async fn test_sqlite_store() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let kv = db.kv();

        exercise(&kv).await;

        kv.set("a", "1").await.unwrap();
        kv.set("b", "2").await.unwrap();
        kv.set("a", "3").await.unwrap();
        assert_eq!(kv.len().await.unwrap(), 2);
    }
}
