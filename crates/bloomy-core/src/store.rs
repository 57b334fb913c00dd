//! # Application State
//!
//! The single source of truth every screen reads from. Fields are private:
//! the mutator methods below are the only write path.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   composition root ──owns──► AppState                                   │
//! │                                 │                                       │
//! │          ┌──────────┬──────────┼──────────┬───────────┐                 │
//! │          ▼          ▼          ▼          ▼           ▼                 │
//! │      identity   favorites    cart     addresses    orders               │
//! │      dark mode  (ids)        lines    book         newest first         │
//! │                                                                         │
//! │   screens ──read──► accessors                                           │
//! │   screens ──call──► mutators (never fail, unknown ids are no-ops)       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Default Address
//! While the address book is non-empty exactly one address is default.
//! Adding the first address makes it default, promoting another demotes the
//! old one, and deleting the default promotes the first remaining address.

use serde::Serialize;

use crate::cart::{CartItem, CheckoutTotals};
use crate::catalog;
use crate::checkout::{CheckoutSelection, DeliverySlot};
use crate::money::Money;
use crate::types::{Address, AddressPatch, CategoryFilter, Order, Product};
use crate::{GUEST_EMAIL, GUEST_NAME};

/// Everything the screens share.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    user_name: String,
    user_email: String,
    favorites: Vec<String>,
    products: Vec<Product>,
    cart: Vec<CartItem>,
    addresses: Vec<Address>,
    orders: Vec<Order>,
    is_dark_mode: bool,
    checkout: CheckoutSelection,
}

impl AppState {
    /// A fresh install: guest identity, seeded catalog and address book.
    pub fn new() -> Self {
        Self::with_catalog(catalog::seed_products(), catalog::seed_addresses())
    }

    pub fn with_catalog(products: Vec<Product>, addresses: Vec<Address>) -> Self {
        let mut state = AppState {
            user_name: GUEST_NAME.to_string(),
            user_email: GUEST_EMAIL.to_string(),
            favorites: Vec::new(),
            products,
            cart: Vec::new(),
            addresses: Vec::new(),
            orders: Vec::new(),
            is_dark_mode: false,
            checkout: CheckoutSelection::default(),
        };
        for address in addresses {
            state.add_address(address);
        }
        state
    }

    // =========================================================================
    // Identity
    // =========================================================================

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn user_email(&self) -> &str {
        &self.user_email
    }

    pub fn set_user_name(&mut self, name: impl Into<String>) {
        self.user_name = name.into();
    }

    pub fn set_user_email(&mut self, email: impl Into<String>) {
        self.user_email = email.into();
    }

    pub fn is_dark_mode(&self) -> bool {
        self.is_dark_mode
    }

    pub fn set_dark_mode(&mut self, value: bool) {
        self.is_dark_mode = value;
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products in `filter` whose name contains `query`, in catalog order.
    pub fn products_in(&self, filter: CategoryFilter, query: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| filter.matches(p) && p.name_matches(query))
            .collect()
    }

    // =========================================================================
    // Favorites
    // =========================================================================

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    /// Removes `id` from favorites if present, otherwise appends it.
    pub fn toggle_favorite(&mut self, id: &str) {
        if let Some(pos) = self.favorites.iter().position(|f| f == id) {
            self.favorites.remove(pos);
        } else {
            self.favorites.push(id.to_string());
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|f| f == id)
    }

    /// Favorited products in catalog order. Ids missing from the catalog are skipped.
    pub fn favorite_products(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| self.is_favorite(&p.id))
            .collect()
    }

    // =========================================================================
    // Cart
    // =========================================================================

    pub fn cart(&self) -> &[CartItem] {
        &self.cart
    }

    /// Adds `quantity` units, merging into an existing line for the same product.
    pub fn add_to_cart(&mut self, product: &Product, quantity: i64) {
        match self.cart.iter_mut().find(|item| item.id() == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.cart.push(CartItem::new(product, quantity)),
        }
    }

    pub fn remove_from_cart(&mut self, id: &str) {
        self.cart.retain(|item| item.id() != id);
    }

    /// Shifts a line's quantity by `delta`, never going below 1.
    pub fn update_cart_quantity(&mut self, id: &str, delta: i64) {
        if let Some(item) = self.cart.iter_mut().find(|item| item.id() == id) {
            item.quantity = item.quantity.saturating_add(delta).max(1);
        }
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    pub fn cart_totals(&self, delivery_fee: Money) -> CheckoutTotals {
        CheckoutTotals::from_cart(&self.cart, delivery_fee)
    }

    // =========================================================================
    // Addresses
    // =========================================================================

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn address(&self, id: &str) -> Option<&Address> {
        self.addresses.iter().find(|a| a.id == id)
    }

    pub fn default_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.is_default)
    }

    /// Appends an address. The first address is always default; a later one
    /// flagged default takes over from the current default.
    pub fn add_address(&mut self, mut address: Address) {
        if self.addresses.is_empty() {
            address.is_default = true;
        } else if address.is_default {
            self.clear_default();
        }
        self.addresses.push(address);
    }

    /// Merges `patch` into the address with `id`.
    ///
    /// `is_default: Some(true)` promotes the address. `Some(false)` is ignored:
    /// a default is replaced, never removed.
    pub fn update_address(&mut self, id: &str, patch: AddressPatch) {
        let Some(pos) = self.addresses.iter().position(|a| a.id == id) else {
            return;
        };

        if patch.is_default == Some(true) {
            self.clear_default();
            self.addresses[pos].is_default = true;
        }
        patch.apply_fields(&mut self.addresses[pos]);
    }

    /// Removes the address with `id`, promoting the first remaining address
    /// when the default was removed.
    pub fn delete_address(&mut self, id: &str) {
        let Some(pos) = self.addresses.iter().position(|a| a.id == id) else {
            return;
        };

        let removed = self.addresses.remove(pos);
        if removed.is_default {
            if let Some(first) = self.addresses.first_mut() {
                first.is_default = true;
            }
        }
        if self.checkout.address_id.as_deref() == Some(id) {
            self.checkout.address_id = None;
        }
    }

    fn clear_default(&mut self) {
        for address in &mut self.addresses {
            address.is_default = false;
        }
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Orders, newest first.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn add_order(&mut self, order: Order) {
        self.orders.insert(0, order);
    }

    /// Replaces the order history, e.g. when hydrating from storage.
    pub fn set_orders(&mut self, orders: Vec<Order>) {
        self.orders = orders;
    }

    // =========================================================================
    // Checkout Selection
    // =========================================================================

    pub fn checkout(&self) -> &CheckoutSelection {
        &self.checkout
    }

    pub fn set_checkout_date(&mut self, date: chrono::NaiveDate) {
        self.checkout.date = Some(date);
    }

    pub fn set_checkout_slot(&mut self, slot: DeliverySlot) {
        self.checkout.slot = slot;
    }

    pub fn set_checkout_address(&mut self, id: impl Into<String>) {
        self.checkout.address_id = Some(id.into());
    }

    /// The selected address, if it still exists.
    pub fn checkout_address(&self) -> Option<&Address> {
        self.checkout
            .address_id
            .as_deref()
            .and_then(|id| self.address(id))
    }

    pub fn reset_checkout(&mut self) {
        self.checkout = CheckoutSelection::default();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::types::{AddressKind, Category, OrderStatus};

    fn roses(state: &AppState) -> Product {
        state.product("1").cloned().unwrap()
    }

    fn order(id: &str) -> Order {
        Order {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            status: OrderStatus::OnTheWay,
            items: 1,
            total: Money::from_major(50),
        }
    }

    fn address(id: &str, title: &str, is_default: bool) -> Address {
        Address {
            id: id.to_string(),
            title: title.to_string(),
            address: format!("{} street", title),
            is_default,
            kind: AddressKind::from_title(title),
        }
    }

    fn defaults(state: &AppState) -> Vec<&str> {
        state
            .addresses()
            .iter()
            .filter(|a| a.is_default)
            .map(|a| a.id.as_str())
            .collect()
    }

    #[test]
    fn test_initial_state() {
        let state = AppState::new();
        assert_eq!(state.user_name(), "Guest");
        assert_eq!(state.user_email(), "guest@bloomy.com");
        assert_eq!(state.products().len(), 10);
        assert_eq!(state.addresses().len(), 2);
        assert_eq!(state.default_address().map(|a| a.id.as_str()), Some("1"));
        assert!(state.cart().is_empty());
        assert!(state.orders().is_empty());
        assert!(!state.is_dark_mode());
    }

    #[test]
    fn test_identity_setters() {
        let mut state = AppState::new();
        state.set_user_name("Aysel");
        state.set_user_email("aysel@gmail.com");
        state.set_dark_mode(true);
        assert_eq!(state.user_name(), "Aysel");
        assert_eq!(state.user_email(), "aysel@gmail.com");
        assert!(state.is_dark_mode());
    }

    #[test]
    fn test_toggle_favorite_twice_restores() {
        let mut state = AppState::new();
        state.toggle_favorite("3");
        let before = state.favorites().to_vec();

        state.toggle_favorite("5");
        assert!(state.is_favorite("5"));
        state.toggle_favorite("5");

        assert_eq!(state.favorites(), before.as_slice());
        assert!(!state.is_favorite("5"));
    }

    #[test]
    fn test_favorite_products_in_catalog_order() {
        let mut state = AppState::new();
        state.toggle_favorite("7");
        state.toggle_favorite("2");
        state.toggle_favorite("missing");

        let ids: Vec<_> = state.favorite_products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "7"]);
    }

    #[test]
    fn test_products_in_filter_and_query() {
        let state = AppState::new();

        let roses: Vec<_> = state
            .products_in(CategoryFilter::Only(Category::Roses), "")
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(roses, vec!["1", "5", "8"]);

        let search: Vec<_> = state
            .products_in(CategoryFilter::All, "SUN")
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(search, vec!["4", "9"]);

        assert!(state
            .products_in(CategoryFilter::Only(Category::Birthday), "orchid")
            .is_empty());
    }

    #[test]
    fn test_add_to_cart_merges() {
        let mut state = AppState::new();
        let product = roses(&state);

        state.add_to_cart(&product, 2);
        state.add_to_cart(&product, 4);

        assert_eq!(state.cart().len(), 1);
        assert_eq!(state.cart()[0].quantity, 6);
    }

    #[test]
    fn test_update_quantity_clamps_at_one() {
        let mut state = AppState::new();
        let product = roses(&state);
        state.add_to_cart(&product, 1);

        state.update_cart_quantity("1", -5);
        assert_eq!(state.cart()[0].quantity, 1);

        state.update_cart_quantity("1", i64::MIN);
        assert_eq!(state.cart()[0].quantity, 1);

        state.update_cart_quantity("nope", 3);
        assert_eq!(state.cart()[0].quantity, 1);
    }

    #[test]
    fn test_add_to_cart_saturates() {
        let mut state = AppState::new();
        let product = roses(&state);
        state.add_to_cart(&product, i64::MAX);
        state.add_to_cart(&product, 1);

        assert_eq!(state.cart().len(), 1);
        assert_eq!(state.cart()[0].quantity, i64::MAX);

        let totals = state.cart_totals(crate::DELIVERY_FEE);
        assert_eq!(totals.total, Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut state = AppState::new();
        state.remove_from_cart("1");
        assert!(state.cart().is_empty());

        let product = roses(&state);
        state.add_to_cart(&product, 1);
        state.remove_from_cart("2");
        assert_eq!(state.cart().len(), 1);

        state.remove_from_cart("1");
        assert!(state.cart().is_empty());
    }

    #[test]
    fn test_cart_scenario() {
        let mut state = AppState::new();
        let product = roses(&state);

        state.add_to_cart(&product, 2);
        state.update_cart_quantity(&product.id, 3);
        assert_eq!(state.cart().len(), 1);
        assert_eq!(state.cart()[0].quantity, 5);

        let totals = state.cart_totals(crate::DELIVERY_FEE);
        assert_eq!(totals.total, Money::from_major(230));

        state.clear_cart();
        assert!(state.cart().is_empty());
    }

    #[test]
    fn test_first_address_forced_default() {
        let mut state = AppState::with_catalog(Vec::new(), Vec::new());
        state.add_address(address("a", "Home", false));
        state.add_address(address("b", "Office", false));
        assert_eq!(defaults(&state), vec!["a"]);
    }

    #[test]
    fn test_new_default_demotes_old() {
        let mut state = AppState::new();
        state.add_address(address("3", "Grandma", true));
        assert_eq!(defaults(&state), vec!["3"]);
        assert_eq!(state.addresses()[2].kind, AddressKind::Other);
    }

    #[test]
    fn test_update_address_patch() {
        let mut state = AppState::new();

        state.update_address(
            "2",
            AddressPatch {
                address: Some("789 Garden Road".to_string()),
                ..AddressPatch::default()
            },
        );
        assert_eq!(state.address("2").unwrap().address, "789 Garden Road");
        assert_eq!(state.address("2").unwrap().title, "Office");

        state.update_address(
            "2",
            AddressPatch {
                is_default: Some(true),
                ..AddressPatch::default()
            },
        );
        assert_eq!(defaults(&state), vec!["2"]);

        // Unsetting the only default is ignored.
        state.update_address(
            "2",
            AddressPatch {
                is_default: Some(false),
                ..AddressPatch::default()
            },
        );
        assert_eq!(defaults(&state), vec!["2"]);

        state.update_address("missing", AddressPatch::default());
        assert_eq!(state.addresses().len(), 2);
    }

    #[test]
    fn test_delete_default_promotes_first_remaining() {
        let mut state = AppState::new();
        state.add_address(address("3", "Gym", false));

        state.delete_address("1");
        assert_eq!(defaults(&state), vec!["2"]);

        state.delete_address("2");
        assert_eq!(defaults(&state), vec!["3"]);

        state.delete_address("3");
        assert!(state.addresses().is_empty());
        assert!(state.default_address().is_none());

        state.delete_address("3");
        assert!(state.addresses().is_empty());
    }

    #[test]
    fn test_delete_clears_checkout_address() {
        let mut state = AppState::new();
        state.set_checkout_address("2");
        assert_eq!(state.checkout_address().map(|a| a.title.as_str()), Some("Office"));

        state.delete_address("2");
        assert!(state.checkout().address_id.is_none());
    }

    #[test]
    fn test_orders_newest_first() {
        let mut state = AppState::new();
        state.add_order(order("ORD-2026-100"));
        state.add_order(order("ORD-2026-200"));
        assert_eq!(state.orders()[0].id, "ORD-2026-200");

        state.set_orders(vec![order("ORD-2025-999")]);
        assert_eq!(state.orders().len(), 1);
        assert_eq!(state.orders()[0].id, "ORD-2025-999");
    }

    #[test]
    fn test_checkout_selection_reset() {
        let mut state = AppState::new();
        let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        state.set_checkout_date(date);
        state.set_checkout_slot(DeliverySlot::new(15).unwrap());
        state.set_checkout_address("1");

        assert_eq!(state.checkout().date, Some(date));
        assert_eq!(state.checkout().slot.hour(), 15);

        state.reset_checkout();
        assert_eq!(state.checkout(), &CheckoutSelection::default());
    }
}
