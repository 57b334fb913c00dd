//! # State Module
//!
//! Manages application state for the storefront.
//!
//! ## Why Multiple State Types?
//! Instead of handing every command the whole world, each concern gets its
//! own state type and a command takes only the ones it touches.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   Storefront (composition root)                 │   │
//! │  │  Storefront::start(config)                                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │  StoreState  │  │   DbState    │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Arc<Mutex<  │  │  key-value   │  │  currency        │              │
//! │  │   AppState   │  │  store +     │  │  delivery fee    │              │
//! │  │  >>          │  │  repositories│  │  platform        │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • StoreState: every mutator runs under the Mutex                      │
//! │  • DbState: the store behind it is Send + Sync                         │
//! │  • ConfigState: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod config;
mod db;

pub use app::StoreState;
pub use config::{ConfigError, ConfigState, Platform};
pub use db::DbState;
