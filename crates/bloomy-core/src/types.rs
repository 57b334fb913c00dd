//! # Domain Types
//!
//! Core domain types shared by the state container and every screen.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Address      │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id ORD-Y-NNN   │       │
//! │  │  name           │   │  title          │   │  date           │       │
//! │  │  price (Money)  │   │  address        │   │  status         │       │
//! │  │  categories     │   │  is_default     │   │  items, total   │       │
//! │  └─────────────────┘   │  kind           │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Category      │   │  AddressKind    │   │  OrderStatus    │       │
//! │  │  Roses          │   │  Home           │   │  OnTheWay       │       │
//! │  │  Bouquets       │   │  Office         │   │  Delivered      │       │
//! │  │  Birthday       │   │  Other          │   │  Cancelled      │       │
//! │  │  Anniversary    │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names serialize in camelCase: the persisted `userData` blob and
//! the screens both speak that shape.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A catalog tag used by the home screen's category chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    Roses,
    Bouquets,
    Birthday,
    Anniversary,
}

impl Category {
    /// Every category, in chip order.
    pub const ALL: [Category; 4] = [
        Category::Roses,
        Category::Bouquets,
        Category::Birthday,
        Category::Anniversary,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            Category::Roses => "Roses",
            Category::Bouquets => "Bouquets",
            Category::Birthday => "Birthday",
            Category::Anniversary => "Anniversary",
        }
    }
}

/// Which slice of the catalog the home screen shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum CategoryFilter {
    /// The "All" chip.
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.categories.contains(category),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A bouquet or arrangement in the catalog.
///
/// The catalog is seeded at startup and never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique catalog identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price.
    pub price: Money,

    /// Opaque asset key resolved by the UI shell.
    pub image: String,

    /// Optional long description for the detail screen.
    pub description: Option<String>,

    /// Tags driving the category chips.
    pub categories: Vec<Category>,
}

impl Product {
    /// Case-insensitive substring match against the product name.
    ///
    /// An empty query matches everything.
    pub fn name_matches(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

// =============================================================================
// Address
// =============================================================================

/// Icon family of a saved address.
///
/// Serialized as the icon names the screens already use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum AddressKind {
    #[serde(rename = "home")]
    Home,
    #[serde(rename = "briefcase")]
    Office,
    #[default]
    #[serde(rename = "map-pin")]
    Other,
}

impl AddressKind {
    /// Derives the kind from a user-typed title.
    ///
    /// ```rust
    /// use bloomy_core::AddressKind;
    ///
    /// assert_eq!(AddressKind::from_title("Home"), AddressKind::Home);
    /// assert_eq!(AddressKind::from_title("OFFICE"), AddressKind::Office);
    /// assert_eq!(AddressKind::from_title("Grandma"), AddressKind::Other);
    /// ```
    pub fn from_title(title: &str) -> Self {
        match title.trim().to_lowercase().as_str() {
            "home" => AddressKind::Home,
            "office" => AddressKind::Office,
            _ => AddressKind::Other,
        }
    }
}

/// A saved delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: String,
    pub title: String,
    /// Free-form street address.
    pub address: String,
    pub is_default: bool,
    #[serde(rename = "type")]
    pub kind: AddressKind,
}

/// What the address form submits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    pub title: String,
    pub address: String,
}

/// Partial update of an [`Address`]. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AddressPatch {
    pub title: Option<String>,
    pub address: Option<String>,
    pub kind: Option<AddressKind>,
    pub is_default: Option<bool>,
}

impl AddressPatch {
    /// The patch the edit form produces: new title, text, and derived kind.
    pub fn from_form(form: &NewAddress) -> Self {
        AddressPatch {
            title: Some(form.title.clone()),
            address: Some(form.address.clone()),
            kind: Some(AddressKind::from_title(&form.title)),
            is_default: None,
        }
    }

    /// Applies every field except `is_default`, which the store owns.
    pub(crate) fn apply_fields(&self, target: &mut Address) {
        if let Some(title) = &self.title {
            target.title = title.clone();
        }
        if let Some(address) = &self.address {
            target.address = address.clone();
        }
        if let Some(kind) = self.kind {
            target.kind = kind;
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// Delivery status shown on the order card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "On the way")]
    OnTheWay,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const fn label(&self) -> &'static str {
        match self {
            OrderStatus::OnTheWay => "On the way",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

/// A placed order. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// `ORD-<year>-<NNN>`.
    pub id: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub status: OrderStatus,
    /// Total number of units across all lines.
    pub items: i64,
    pub total: Money,
}

// =============================================================================
// Notifications
// =============================================================================

/// Routing payload attached to a local notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    #[serde(rename = "type")]
    pub kind: String,
    /// Screen path opened when the notification is tapped.
    pub screen: Option<String>,
}

/// One entry of the notification history screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub data: Option<NotificationData>,
    #[ts(as = "String")]
    pub received_at: DateTime<Utc>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub scheduled_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Persisted Identity
// =============================================================================

/// The `userData` blob: identity, password, and order history.
///
/// Every field is optional on read so a blob written by an older build,
/// or by the sign-up form alone, still loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

// =============================================================================
// Unit Tests
// =============================================================================
