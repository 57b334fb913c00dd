//! # Database State
//!
//! The durable key-value store and the repositories on top of it.
//!
//! Native builds open SQLite through [`Database`]; the web build and tests
//! run on a [`MemoryKvStore`]. Commands only see the repositories, so they
//! do not care which one is underneath.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! async fn load_orders(store: &StoreState, db: &DbState) -> Result<Vec<Order>, ApiError> {
//!     let orders = db.user_data().orders().await?;
//!     store.with_store_mut(|s| s.set_orders(orders.clone()));
//!     Ok(orders)
//! }
//! ```

use std::sync::Arc;

use bloomy_db::{
    Database, KeyValueStore, MemoryKvStore, NotificationHistoryRepository, UserDataRepository,
};

/// Storage handle shared by commands and the notification task.
#[derive(Clone)]
pub struct DbState {
    kv: Arc<dyn KeyValueStore>,
    /// Kept so the pool can be closed on shutdown.
    db: Option<Database>,
}

impl DbState {
    /// Wraps an open SQLite database.
    pub fn new(db: Database) -> Self {
        DbState {
            kv: Arc::new(db.kv()),
            db: Some(db),
        }
    }

    /// A volatile in-process store.
    pub fn memory() -> Self {
        DbState::from_store(Arc::new(MemoryKvStore::new()))
    }

    pub fn from_store(kv: Arc<dyn KeyValueStore>) -> Self {
        DbState { kv, db: None }
    }

    /// Raw key-value access.
    pub fn kv(&self) -> Arc<dyn KeyValueStore> {
        self.kv.clone()
    }

    pub fn user_data(&self) -> UserDataRepository {
        UserDataRepository::new(self.kv.clone())
    }

    pub fn notifications(&self) -> NotificationHistoryRepository {
        NotificationHistoryRepository::new(self.kv.clone())
    }

    /// The SQLite database, when one is open.
    pub fn database(&self) -> Option<&Database> {
        self.db.as_ref()
    }

    /// Closes the SQLite pool, if any.
    pub async fn close(&self) {
        if let Some(db) = &self.db {
            db.close().await;
        }
    }
}

impl std::fmt::Debug for DbState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbState")
            .field("sqlite", &self.db.is_some())
            .finish()
    }
}
