//! # Notification Commands
//!
//! The notification history screen.

use bloomy_core::{NotificationData, NotificationRecord};
use chrono::Utc;
use tracing::{debug, error, info};

use crate::error::ApiError;
use crate::state::DbState;

/// Notification history, newest first.
///
/// A failed read shows an empty list rather than an error screen.
pub async fn notification_history(db: &DbState) -> Vec<NotificationRecord> {
    debug!("notification_history command");

    match db.notifications().list().await {
        Ok(history) => history,
        Err(e) => {
            error!("Failed to load notification history: {}", e);
            Vec::new()
        }
    }
}

/// The "Clear all" button.
pub async fn clear_notification_history(db: &DbState) -> Result<(), ApiError> {
    debug!("clear_notification_history command");

    db.notifications().clear().await?;
    info!("Notification history cleared");
    Ok(())
}

/// Files a notification the device received while the app was open.
///
/// ## Arguments
/// * `id` - Platform notification id; repeats are ignored
///
/// ## Returns
/// Whether the notification was new
pub async fn record_notification(
    db: &DbState,
    id: &str,
    title: &str,
    body: &str,
    data: Option<NotificationData>,
) -> Result<bool, ApiError> {
    debug!(id = %id, "record_notification command");

    let record = NotificationRecord {
        id: id.to_string(),
        title: title.to_string(),
        body: body.to_string(),
        data,
        received_at: Utc::now(),
        scheduled_at: None,
    };

    Ok(db.notifications().record(record).await?)
}

#[cfg(test)]
mod tests {
    use bloomy_db::KeyValueStore;

    use super::*;

    #[tokio::test]
    async fn test_record_list_clear() {
        let db = DbState::memory();

        assert!(record_notification(&db, "n1", "Hello", "First", None).await.unwrap());
        assert!(record_notification(&db, "n2", "Hello", "Second", None).await.unwrap());
        assert!(!record_notification(&db, "n1", "Hello", "Again", None).await.unwrap());

        let history = notification_history(&db).await;
        let bodies: Vec<_> = history.iter().map(|r| r.body.as_str()).collect();
        assert_eq!(bodies, vec!["Second", "First"]);

        clear_notification_history(&db).await.unwrap();
        assert!(notification_history(&db).await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_history_reads_empty() {
        let db = DbState::memory();
        db.kv().set("notification_history", "{").await.unwrap();

        assert!(notification_history(&db).await.is_empty());
    }
}
