//! # Repository Module
//!
//! Typed access to the JSON blobs in the key-value store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Blob Repositories                                    │
//! │                                                                         │
//! │  Command                                                               │
//! │       │                                                                 │
//! │       │  db.user_data().prepend_order(&order)                          │
//! │       ▼                                                                 │
//! │  UserDataRepository                                                    │
//! │  ├── load / save                    key: "userData"                    │
//! │  ├── register / update_profile                                         │
//! │  └── change_password / prepend_order                                   │
//! │                                                                         │
//! │  NotificationHistoryRepository      key: "notification_history"        │
//! │  ├── list                                                              │
//! │  ├── record (dedupe by id)                                             │
//! │  └── clear                                                             │
//! │       │                                                                 │
//! │       │  get / set / remove                                             │
//! │       ▼                                                                 │
//! │  dyn KeyValueStore (SQLite or memory)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every write is a read-modify-write of the whole blob.

pub mod notification;
pub mod user_data;
