//! # Bloomy Storefront Library
//!
//! The application host for the Bloomy flower storefront. The mobile shell
//! links against this crate, builds one [`Storefront`] at launch and calls
//! the functions in [`commands`] from its screens.
//!
//! ## Module Organization
//! ```text
//! bloomy_storefront/
//! ├── lib.rs          ◄─── You are here (startup & composition root)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── app.rs      ◄─── The shared AppState behind a Mutex
//! │   ├── db.rs       ◄─── Key-value store and repositories
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/       ◄─── One function per user interaction
//! ├── payment.rs      ◄─── PaymentGateway seam + simulated gateway
//! ├── notify.rs       ◄─── Local notification scheduling
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management (Multiple State Types)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storefront                                           │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │   StoreState     │ │    DbState       │ │    ConfigState       │   │
//! │  │                  │ │                  │ │                      │   │
//! │  │  • Catalog       │ │  • userData      │ │  • Currency          │   │
//! │  │  • Cart          │ │  • notification_ │ │  • Delivery fee      │   │
//! │  │  • Favorites     │ │    history       │ │  • Platform          │   │
//! │  │  • Addresses     │ │                  │ │                      │   │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘   │
//! │                                                                         │
//! │  ┌──────────────────────────┐ ┌───────────────────────────────────┐    │
//! │  │ Arc<dyn PaymentGateway>  │ │ Arc<dyn NotificationScheduler>    │    │
//! │  └──────────────────────────┘ └───────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod notify;
pub mod payment;
pub mod state;

use std::sync::Arc;

use bloomy_db::{Database, DbConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use error::ApiError;
use notify::{LocalNotificationScheduler, NotificationScheduler};
use payment::{PaymentGateway, SimulatedPaymentGateway};
use state::{ConfigState, DbState, StoreState};

/// Everything the screens talk to, built once at launch.
#[derive(Clone)]
pub struct Storefront {
    pub store: StoreState,
    pub db: DbState,
    pub config: ConfigState,
    pub payments: Arc<dyn PaymentGateway>,
    pub notifier: Arc<dyn NotificationScheduler>,
}

impl Storefront {
    /// Opens storage and restores the last session.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │                       Storefront Startup                                │
    /// │                                                                         │
    /// │  1. Resolve Database Path ────────────────────────────────────────────► │
    /// │     • BLOOMY_DB_PATH / database_path, else the platform data dir        │
    /// │                                                                         │
    /// │  2. Open Storage ─────────────────────────────────────────────────────► │
    /// │     • native: SQLite with WAL mode, pending migrations applied          │
    /// │     • web: in-memory key-value store                                    │
    /// │                                                                         │
    /// │  3. Initialize State Objects ─────────────────────────────────────────► │
    /// │     • StoreState: seeded catalog, guest identity                        │
    /// │     • Simulated payment gateway, local notification scheduler           │
    /// │                                                                         │
    /// │  4. Restore Session ──────────────────────────────────────────────────► │
    /// │     • Name and email from userData                                      │
    /// │     • Order history from userData                                       │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    pub async fn start(config: ConfigState) -> Result<Self, ApiError> {
        info!(platform = ?config.platform, currency = %config.currency, "Starting Bloomy storefront");

        let db = match config.platform {
            state::Platform::Native => {
                let path = config.database_path()?;
                info!(?path, "Database path determined");
                let database = Database::new(DbConfig::new(path)).await?;
                info!("Database connected and migrations applied");
                DbState::new(database)
            }
            state::Platform::Web => DbState::memory(),
        };

        let storefront = Storefront::with_db(config, db);
        storefront.restore_session().await;
        Ok(storefront)
    }

    /// A storefront on a volatile store, for tests and previews.
    pub fn in_memory(config: ConfigState) -> Self {
        Storefront::with_db(config, DbState::memory())
    }

    /// Wires the default gateway and scheduler around `db`.
    pub fn with_db(config: ConfigState, db: DbState) -> Self {
        let notifier = Arc::new(LocalNotificationScheduler::new(db.notifications()));
        Storefront {
            store: StoreState::new(),
            db,
            config,
            payments: Arc::new(SimulatedPaymentGateway),
            notifier,
        }
    }

    /// Pulls identity and order history from storage into the store.
    pub async fn restore_session(&self) {
        commands::account::hydrate_profile(&self.store, &self.db).await;

        if let Err(e) = commands::orders::load_orders(&self.store, &self.db).await {
            warn!("Could not restore order history: {}", e);
        }
    }

    /// Delivers pending notifications, then closes storage.
    pub async fn shutdown(&self) {
        info!("Shutting down Bloomy storefront");
        self.notifier.flush().await;
        self.db.close().await;
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("db", &self.db)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bloomy=trace` - Show trace for bloomy crates only
/// - Default: INFO, DEBUG for bloomy crates
///
/// Calling it again is harmless; only the first call installs a subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bloomy=debug,sqlx=warn"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_restores_session_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState {
            database_path: Some(dir.path().join("bloomy.db")),
            ..ConfigState::default()
        };

        let first = Storefront::start(config.clone()).await.unwrap();
        first
            .db
            .user_data()
            .register("Aysel", "aysel@gmail.com", "pw")
            .await
            .unwrap();
        first.shutdown().await;

        let second = Storefront::start(config).await.unwrap();
        let profile = commands::account::get_profile(&second.store);
        assert_eq!(profile.user_name, "Aysel");
        second.shutdown().await;
    }

    #[tokio::test]
    async fn test_web_platform_uses_memory_store() {
        let config = ConfigState {
            platform: state::Platform::Web,
            ..ConfigState::default()
        };
        let storefront = Storefront::start(config).await.unwrap();
        assert!(storefront.db.database().is_none());
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing();
        init_tracing();
    }
}
