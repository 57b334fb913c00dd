//! # Local Notifications
//!
//! Schedules the "Payment Confirmed" notice and files delivered notices into
//! the notification history.
//!
//! ## Delivery Flow (native)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  pay() ── schedule(notice, 1s) ──► id returned immediately             │
//! │                    │                                                    │
//! │                    ▼  tokio::spawn                                      │
//! │             sleep(delay)                                                │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │     NotificationHistoryRepository::record(record)                      │
//! │       (failures logged, nobody is waiting on the result)               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The web build has no local notifications; checkout writes the history
//! entry directly instead of going through a scheduler.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use bloomy_core::checkout::PaymentNotice;
use bloomy_core::NotificationRecord;
use bloomy_db::NotificationHistoryRepository;
use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Fire-and-forget delivery of a local notification.
#[async_trait]
pub trait NotificationScheduler: Send + Sync {
    /// Schedules `notice` to fire after `delay` and returns its id.
    async fn schedule(&self, notice: PaymentNotice, delay: Duration) -> String;

    /// Delivers everything still scheduled. Called before storage closes.
    async fn flush(&self);
}

/// Builds the history entry for a delivered notice.
pub fn history_record(
    id: String,
    notice: PaymentNotice,
    received_at: DateTime<Utc>,
    scheduled_at: Option<DateTime<Utc>>,
) -> NotificationRecord {
    NotificationRecord {
        id,
        title: notice.title,
        body: notice.body,
        data: Some(notice.data),
        received_at,
        scheduled_at,
    }
}

/// Scheduler backed by tokio timers.
///
/// Delivery means "recorded into the history", which is what the
/// notification screen lists.
pub struct LocalNotificationScheduler {
    history: NotificationHistoryRepository,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl LocalNotificationScheduler {
    pub fn new(history: NotificationHistoryRepository) -> Self {
        LocalNotificationScheduler {
            history,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Waits until every scheduled notice has been delivered.
    pub async fn wait_idle(&self) {
        let handles: Vec<_> = {
            let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
            pending.drain(..).collect()
        };

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Notification task failed: {}", e);
            }
        }
    }

    /// Number of notices not yet delivered.
    pub fn pending(&self) -> usize {
        let pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.iter().filter(|h| !h.is_finished()).count()
    }
}

#[async_trait]
impl NotificationScheduler for LocalNotificationScheduler {
    async fn schedule(&self, notice: PaymentNotice, delay: Duration) -> String {
        let id = Uuid::new_v4().to_string();
        let scheduled_at = Utc::now();
        let history = self.history.clone();
        let task_id = id.clone();

        debug!(id = %id, delay_ms = delay.as_millis() as u64, "Scheduling notification");

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let record = history_record(task_id.clone(), notice, Utc::now(), Some(scheduled_at));
            match history.record(record).await {
                Ok(_) => info!(id = %task_id, "Notification delivered"),
                Err(e) => error!(id = %task_id, "Failed to record notification: {}", e),
            }
        });

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.retain(|h| !h.is_finished());
        pending.push(handle);

        id
    }

    async fn flush(&self) {
        self.wait_idle().await;
    }
}

impl std::fmt::Debug for LocalNotificationScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalNotificationScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}
