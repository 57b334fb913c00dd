//! # Cart Commands
//!
//! Cart manipulation from the product detail and cart screens.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │  steps   │     │  placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                 │              │
//! │                   add_to_cart                        pay (checkout.rs) │
//! │                   update_cart_quantity                   │              │
//! │                   remove_from_cart                       │              │
//! │                        │                                 │              │
//! │                        ▼                                 ▼              │
//! │                   clear_cart ──────────────────► (back to empty)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bloomy_core::validation::validate_quantity;
use bloomy_core::{AppState, CartItem, CheckoutTotals, CoreError, MAX_ITEM_QUANTITY};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{ConfigState, StoreState};

/// Totals formatted for the cart footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsDisplay {
    pub subtotal: String,
    pub delivery: String,
    pub total: String,
}

impl TotalsDisplay {
    pub fn new(totals: &CheckoutTotals, config: &ConfigState) -> Self {
        TotalsDisplay {
            subtotal: config.format_currency(totals.subtotal),
            delivery: config.format_currency(totals.delivery),
            total: config.format_currency(totals.total),
        }
    }
}

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CheckoutTotals,
    pub display: TotalsDisplay,
}

impl CartResponse {
    pub(crate) fn from_state(state: &AppState, config: &ConfigState) -> Self {
        let totals = state.cart_totals(config.delivery_fee());
        CartResponse {
            items: state.cart().to_vec(),
            totals,
            display: TotalsDisplay::new(&totals, config),
        }
    }
}

/// Gets the current cart contents.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  My Cart                                                               │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  Pink Roses Bouquet        [-] 2 [+]            90.00 AZN      │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  Subtotal                                       90 AZN         │    │
/// │  │  Delivery                                        5 AZN         │    │
/// │  │  Total                                          95 AZN         │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(store: &StoreState, config: &ConfigState) -> CartResponse {
    debug!("get_cart command");
    store.with_store(|s| CartResponse::from_state(s, config))
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases
/// - If product not in cart: added as new line
/// - The line keeps the product as it was when first added
///
/// ## Arguments
/// * `product_id` - Catalog id to add
/// * `quantity` - Quantity to add (default: 1)
///
/// ## Errors
/// - VALIDATION_ERROR for a quantity outside 1..=999
/// - NOT_FOUND for an id the catalog doesn't have
/// - CART_ERROR when the line would exceed 999 units
pub fn add_to_cart(
    store: &StoreState,
    config: &ConfigState,
    product_id: &str,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id = %product_id, quantity = %quantity, "add_to_cart command");

    validate_quantity(quantity)?;

    store.with_store_mut(|s| -> Result<CartResponse, ApiError> {
        let product = s
            .product(product_id)
            .cloned()
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        let in_cart = line_quantity(s, product_id).unwrap_or(0);
        if in_cart.saturating_add(quantity) > MAX_ITEM_QUANTITY {
            return Err(ApiError::cart(format!(
                "Cannot have more than {} of one product in the cart",
                MAX_ITEM_QUANTITY
            )));
        }

        s.add_to_cart(&product, quantity);
        Ok(CartResponse::from_state(s, config))
    })
}

/// Applies a [-]/[+] tap to a cart line.
///
/// ## Behavior
/// - Quantity never drops below 1; removing is a separate action
/// - Ids not in the cart are ignored
///
/// ## Errors
/// CART_ERROR when the line would exceed 999 units
pub fn update_cart_quantity(
    store: &StoreState,
    config: &ConfigState,
    id: &str,
    delta: i64,
) -> Result<CartResponse, ApiError> {
    debug!(id = %id, delta = %delta, "update_cart_quantity command");

    store.with_store_mut(|s| -> Result<CartResponse, ApiError> {
        let Some(in_cart) = line_quantity(s, id) else {
            return Ok(CartResponse::from_state(s, config));
        };
        if in_cart.saturating_add(delta) > MAX_ITEM_QUANTITY {
            return Err(ApiError::cart(format!(
                "Cannot have more than {} of one product in the cart",
                MAX_ITEM_QUANTITY
            )));
        }

        s.update_cart_quantity(id, delta);
        Ok(CartResponse::from_state(s, config))
    })
}

/// Removes a line from the cart. Unknown ids are a no-op.
pub fn remove_from_cart(store: &StoreState, config: &ConfigState, id: &str) -> CartResponse {
    debug!(id = %id, "remove_from_cart command");

    store.with_store_mut(|s| {
        s.remove_from_cart(id);
        CartResponse::from_state(s, config)
    })
}

/// Clears all items from the cart.
pub fn clear_cart(store: &StoreState, config: &ConfigState) -> CartResponse {
    debug!("clear_cart command");

    store.with_store_mut(|s| {
        s.clear_cart();
        CartResponse::from_state(s, config)
    })
}

fn line_quantity(state: &AppState, id: &str) -> Option<i64> {
    state
        .cart()
        .iter()
        .find(|item| item.id() == id)
        .map(|item| item.quantity)
}
