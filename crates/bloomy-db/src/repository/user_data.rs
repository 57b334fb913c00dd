//! # User Data Repository
//!
//! The `userData` blob: name, email, password and order history of the one
//! account on the device.

use std::sync::Arc;

use bloomy_core::{Order, UserData};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::kv::KeyValueStore;

/// Storage key of the identity blob.
pub const USER_DATA_KEY: &str = "userData";

/// Outcome of a password change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordChange {
    Changed,
    /// A password is stored and `current` did not match it.
    IncorrectCurrent,
}

/// Repository for the `userData` blob.
#[derive(Clone)]
pub struct UserDataRepository {
    store: Arc<dyn KeyValueStore>,
}

impl UserDataRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        UserDataRepository { store }
    }

    /// Loads the blob. A missing blob reads as empty.
    pub async fn load(&self) -> DbResult<UserData> {
        match self.store.get(USER_DATA_KEY).await? {
            Some(json) => {
                serde_json::from_str(&json).map_err(|e| DbError::corrupt(USER_DATA_KEY, e))
            }
            None => Ok(UserData::default()),
        }
    }

    pub async fn save(&self, data: &UserData) -> DbResult<()> {
        let json = serde_json::to_string(data)?;
        self.store.set(USER_DATA_KEY, &json).await
    }

    /// Replaces the blob with a fresh account.
    ///
    /// Order history from a previous account is dropped.
    pub async fn register(&self, full_name: &str, email: &str, password: &str) -> DbResult<UserData> {
        let data = UserData {
            full_name: Some(full_name.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            orders: Vec::new(),
        };
        self.save(&data).await?;

        info!(email = %email, "Account registered");
        Ok(data)
    }

    /// Updates name and email, keeping password and orders.
    pub async fn update_profile(&self, full_name: &str, email: &str) -> DbResult<()> {
        let mut data = self.load().await?;
        data.full_name = Some(full_name.to_string());
        data.email = Some(email.to_string());
        self.save(&data).await
    }

    /// Replaces the password if `current` matches the stored one.
    ///
    /// With no stored password any `current` is accepted.
    pub async fn change_password(&self, current: &str, new: &str) -> DbResult<PasswordChange> {
        let mut data = self.load().await?;

        if let Some(stored) = &data.password {
            if stored != current {
                debug!("Stored password did not match");
                return Ok(PasswordChange::IncorrectCurrent);
            }
        }

        data.password = Some(new.to_string());
        self.save(&data).await?;
        Ok(PasswordChange::Changed)
    }

    /// Puts `order` at the head of the stored history.
    pub async fn prepend_order(&self, order: &Order) -> DbResult<()> {
        let mut data = self.load().await?;
        data.orders.insert(0, order.clone());
        self.save(&data).await?;

        debug!(order_id = %order.id, stored = data.orders.len(), "Order persisted");
        Ok(())
    }

    /// Stored orders, newest first.
    pub async fn orders(&self) -> DbResult<Vec<Order>> {
        Ok(self.load().await?.orders)
    }
}

impl std::fmt::Debug for UserDataRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDataRepository")
            .field("key", &USER_DATA_KEY)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use bloomy_core::{Money, OrderStatus};
    use chrono::NaiveDate;

    use super::*;
    use crate::kv::MemoryKvStore;

    fn repo() -> (Arc<MemoryKvStore>, UserDataRepository) {
        let store = Arc::new(MemoryKvStore::new());
        (store.clone(), UserDataRepository::new(store))
    }

    fn order(id: &str) -> Order {
        Order {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            status: OrderStatus::OnTheWay,
            items: 2,
            total: Money::from_major(95),
        }
    }

    #[tokio::test]
    async fn test_missing_blob_is_empty() {
        let (_, repo) = repo();
        assert_eq!(repo.load().await.unwrap(), UserData::default());
        assert!(repo.orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_overwrites() {
        let (_, repo) = repo();
        repo.prepend_order(&order("ORD-2026-100")).await.unwrap();

        let data = repo.register("Aysel", "aysel@gmail.com", "pw").await.unwrap();

        assert_eq!(data.full_name.as_deref(), Some("Aysel"));
        assert!(repo.orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blob_uses_camel_case() {
        let (store, repo) = repo();
        repo.register("Aysel", "aysel@gmail.com", "pw").await.unwrap();

        let raw = store.get(USER_DATA_KEY).await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["fullName"], "Aysel");
        assert_eq!(json["orders"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_update_profile_keeps_orders() {
        let (_, repo) = repo();
        repo.register("Aysel", "aysel@gmail.com", "pw").await.unwrap();
        repo.prepend_order(&order("ORD-2026-100")).await.unwrap();

        repo.update_profile("Aysel M.", "aysel.m@gmail.com").await.unwrap();

        let data = repo.load().await.unwrap();
        assert_eq!(data.email.as_deref(), Some("aysel.m@gmail.com"));
        assert_eq!(data.password.as_deref(), Some("pw"));
        assert_eq!(data.orders.len(), 1);
    }

    #[tokio::test]
    async fn test_change_password() {
        let (_, repo) = repo();
        repo.register("Aysel", "aysel@gmail.com", "old").await.unwrap();

        assert_eq!(
            repo.change_password("wrong", "new").await.unwrap(),
            PasswordChange::IncorrectCurrent
        );
        assert_eq!(
            repo.change_password("old", "new").await.unwrap(),
            PasswordChange::Changed
        );
        assert_eq!(repo.load().await.unwrap().password.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_change_password_without_stored_password() {
        let (_, repo) = repo();
        assert_eq!(
            repo.change_password("anything", "new").await.unwrap(),
            PasswordChange::Changed
        );
    }

    #[tokio::test]
    async fn test_prepend_order_newest_first() {
        let (_, repo) = repo();
        repo.prepend_order(&order("ORD-2026-100")).await.unwrap();
        repo.prepend_order(&order("ORD-2026-200")).await.unwrap();

        let ids: Vec<_> = repo.orders().await.unwrap().into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["ORD-2026-200", "ORD-2026-100"]);
    }

    #[tokio::test]
    async fn test_corrupt_blob() {
        let (store, repo) = repo();
        store.set(USER_DATA_KEY, "not json").await.unwrap();

        let err = repo.load().await.unwrap_err();
        assert!(matches!(err, DbError::Serialization { ref key, .. } if key == USER_DATA_KEY));
    }
}
