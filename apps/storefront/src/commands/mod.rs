//! # Storefront Commands
//!
//! One function per user interaction, called by the mobile shell.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs            ◄─── You are here (exports)
//! ├── catalog.rs        ◄─── Product list, search, detail
//! ├── favorites.rs      ◄─── Heart toggle, favorites screen
//! ├── cart.rs           ◄─── Cart manipulation
//! ├── addresses.rs      ◄─── Address book
//! ├── account.rs        ◄─── Sign-up, profile, password, contact
//! ├── checkout.rs       ◄─── Date, address, payment
//! ├── orders.rs         ◄─── Order history
//! ├── notifications.rs  ◄─── Notification history
//! └── config.rs         ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Screen event (tap "Add to cart")                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::cart::add_to_cart(                                           │
//! │      &store,        ◄── StoreState, the single AppState                 │
//! │      &config,       ◄── ConfigState, for the fee and formatting         │
//! │      "1",           ◄── product id                                      │
//! │      Some(2),       ◄── optional quantity                               │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         │ (JSON serialization, camelCase)                               │
//! │         ▼                                                               │
//! │  Screen re-renders from the response                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the store
//! fn toggle_favorite(store: &StoreState, id: &str)
//!
//! // Store plus storage
//! async fn load_orders(store: &StoreState, db: &DbState)
//!
//! // Everything, plus the payment and notification seams
//! async fn pay(store, db, config, payments, notifier, form)
//! ```
//!
//! Navigation stays with the shell. Commands return what the next screen
//! needs and the shell decides where to go.

pub mod account;
pub mod addresses;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod favorites;
pub mod notifications;
pub mod orders;
