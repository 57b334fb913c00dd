//! # Notification History Repository
//!
//! The `notification_history` blob: every local notification the device has
//! shown, newest first.

use std::sync::Arc;

use bloomy_core::NotificationRecord;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::kv::KeyValueStore;

/// Storage key of the history blob.
pub const NOTIFICATION_HISTORY_KEY: &str = "notification_history";

/// Repository for the `notification_history` blob.
#[derive(Clone)]
pub struct NotificationHistoryRepository {
    store: Arc<dyn KeyValueStore>,
}

impl NotificationHistoryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        NotificationHistoryRepository { store }
    }

    /// History, newest first. A missing blob reads as empty.
    pub async fn list(&self) -> DbResult<Vec<NotificationRecord>> {
        match self.store.get(NOTIFICATION_HISTORY_KEY).await? {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| DbError::corrupt(NOTIFICATION_HISTORY_KEY, e)),
            None => Ok(Vec::new()),
        }
    }

    /// Prepends `record` unless one with the same id is already stored.
    ///
    /// Returns whether it was inserted.
    pub async fn record(&self, record: NotificationRecord) -> DbResult<bool> {
        let mut history = self.list().await?;
        if history.iter().any(|h| h.id == record.id) {
            debug!(id = %record.id, "Notification already in history");
            return Ok(false);
        }

        debug!(id = %record.id, "Recording notification");
        history.insert(0, record);
        let json = serde_json::to_string(&history)?;
        self.store.set(NOTIFICATION_HISTORY_KEY, &json).await?;
        Ok(true)
    }

    pub async fn clear(&self) -> DbResult<()> {
        self.store.remove(NOTIFICATION_HISTORY_KEY).await
    }
}

impl std::fmt::Debug for NotificationHistoryRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationHistoryRepository")
            .field("key", &NOTIFICATION_HISTORY_KEY)
            .finish()
    }
}
