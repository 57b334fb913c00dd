//! # bloomy-core: Pure Business Logic for Bloomy
//!
//! This crate is the **heart** of the Bloomy flower storefront. It holds the
//! single application state container and every rule the screens rely on,
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bloomy Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Mobile UI shell (screens)                    │   │
//! │  │   Catalog ──► Product ──► Cart ──► Date ──► Address ──► Pay    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ command calls                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 apps/storefront (commands)                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bloomy-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐ │   │
//! │  │   │  types  │ │  money  │ │  cart   │ │  store   │ │checkout│ │   │
//! │  │   │ Product │ │  Money  │ │ Totals  │ │ AppState │ │ Order  │ │   │
//! │  │   │ Address │ │Currency │ │CartItem │ │ mutators │ │  ids   │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                bloomy-db (key-value blob store)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Address, Order, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - The seeded flower catalog
//! - [`cart`] - Cart line items and checkout totals
//! - [`store`] - The application state container and its mutators
//! - [`checkout`] - Delivery slots and order synthesis
//! - [`validation`] - Form validation (card, sign-up, profile, address)
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bloomy_core::store::AppState;
//!
//! let mut state = AppState::new();
//! let roses = state.product("1").cloned().unwrap();
//!
//! state.add_to_cart(&roses, 2);
//! state.update_cart_quantity("1", 3);
//! assert_eq!(state.cart()[0].quantity, 5);
//!
//! state.clear_cart();
//! assert!(state.cart().is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartItem, CheckoutTotals};
pub use checkout::{CheckoutSelection, DeliverySlot};
pub use error::{CoreError, CoreResult, FieldErrors, ValidationError};
pub use money::{Currency, Money};
pub use store::AppState;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Display name used before anyone signs up or signs in.
pub const GUEST_NAME: &str = "Guest";

/// Email used before anyone signs up or signs in.
pub const GUEST_EMAIL: &str = "guest@bloomy.com";

/// Flat delivery fee charged on any non-empty cart (5.00).
pub const DELIVERY_FEE: Money = Money::from_cents(500);

/// Maximum quantity a single add-to-cart request may carry.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Card expiry years are two-digit; anything below this is already expired.
pub const MIN_EXPIRY_YEAR: u32 = 26;
