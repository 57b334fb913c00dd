//! # bloomy-db: Durable Storage for Bloomy
//!
//! The key-value blob store the storefront persists identity, order history
//! and notification history into, on SQLite via sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bloomy Data Flow                                 │
//! │                                                                         │
//! │  Command (pay, sign_up, notification_history, ...)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     bloomy-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ UserData      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ Notification  │    │ 001_kv_store │  │   │
//! │  │   │ KeyValueStore │    │ History       │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <data dir>/bloomy.db                                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`kv`] - The key-value store trait and its SQLite and memory backends
//! - [`error`] - Database error types
//! - [`repository`] - Typed blob repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bloomy_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("bloomy.db")).await?;
//! let orders = db.user_data().orders().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod kv;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use kv::{KeyValueStore, MemoryKvStore, SqliteKvStore};
pub use pool::{Database, DbConfig};

pub use repository::notification::{NotificationHistoryRepository, NOTIFICATION_HISTORY_KEY};
pub use repository::user_data::{PasswordChange, UserDataRepository, USER_DATA_KEY};
