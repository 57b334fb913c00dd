//! # Checkout
//!
//! Delivery slots, the in-progress checkout selection, and order synthesis.
//!
//! ## Checkout Steps
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Cart ──► Date & Time ──► Address ──► Overview ──► Pay ──► Order        │
//! │            │               │                       │        │           │
//! │            ▼               ▼                       ▼        ▼           │
//! │     selection.date   selection.address_id    card form   ORD-2026-417   │
//! │     selection.slot                           validated   On the way     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here touches storage or the clock: callers pass `today` and the
//! random source in.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{CartItem, CheckoutTotals};
use crate::error::ValidationError;
use crate::types::{NotificationData, Order, OrderStatus};

// =============================================================================
// Delivery Slot
// =============================================================================

/// An hourly delivery window, `09:00` through `20:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeliverySlot(u8);

impl DeliverySlot {
    pub const FIRST_HOUR: u8 = 9;
    pub const LAST_HOUR: u8 = 20;

    pub fn new(hour: u8) -> Result<Self, ValidationError> {
        if (Self::FIRST_HOUR..=Self::LAST_HOUR).contains(&hour) {
            Ok(DeliverySlot(hour))
        } else {
            Err(ValidationError::OutOfRange {
                field: "time".to_string(),
                min: Self::FIRST_HOUR as i64,
                max: Self::LAST_HOUR as i64,
            })
        }
    }

    pub const fn hour(&self) -> u8 {
        self.0
    }

    /// Every slot the time picker offers, earliest first.
    pub fn all() -> impl Iterator<Item = DeliverySlot> {
        (Self::FIRST_HOUR..=Self::LAST_HOUR).map(DeliverySlot)
    }
}

impl Default for DeliverySlot {
    fn default() -> Self {
        DeliverySlot(Self::FIRST_HOUR)
    }
}

impl fmt::Display for DeliverySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

impl FromStr for DeliverySlot {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidFormat {
            field: "time".to_string(),
            reason: format!("expected HH:00, got '{}'", s),
        };

        let (hour, minutes) = s.trim().split_once(':').ok_or_else(invalid)?;
        if minutes != "00" || hour.len() != 2 {
            return Err(invalid());
        }
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        DeliverySlot::new(hour)
    }
}

impl TryFrom<String> for DeliverySlot {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DeliverySlot> for String {
    fn from(slot: DeliverySlot) -> Self {
        slot.to_string()
    }
}

// =============================================================================
// Checkout Selection
// =============================================================================

/// What the customer picked on the date and address steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSelection {
    #[ts(as = "Option<String>")]
    pub date: Option<NaiveDate>,
    #[ts(as = "String")]
    pub slot: DeliverySlot,
    pub address_id: Option<String>,
}

impl CheckoutSelection {
    /// Header text of the date step, e.g. `"October 16, 2026"`.
    pub fn date_label(&self) -> Option<String> {
        self.date.map(|d| d.format("%B %-d, %Y").to_string())
    }
}

// =============================================================================
// Order Synthesis
// =============================================================================

/// Generates an order id of the form `ORD-<year>-<NNN>` with NNN in 100..=999.
///
/// ```rust
/// use bloomy_core::checkout::generate_order_id;
///
/// let id = generate_order_id(2026, &mut rand::thread_rng());
/// assert!(id.starts_with("ORD-2026-"));
/// assert_eq!(id.len(), "ORD-2026-123".len());
/// ```
pub fn generate_order_id<R: Rng + ?Sized>(year: i32, rng: &mut R) -> String {
    let suffix: u16 = rng.gen_range(100..=999);
    format!("ORD-{}-{}", year, suffix)
}

/// Builds the order record for a paid cart.
pub fn build_order(
    id: String,
    date: NaiveDate,
    items: &[CartItem],
    totals: &CheckoutTotals,
) -> Order {
    Order {
        id,
        date,
        status: OrderStatus::OnTheWay,
        items: items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity)),
        total: totals.total,
    }
}

/// Date as the order history card prints it, e.g. `"16 Oct 2026"`.
pub fn order_date_label(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

// =============================================================================
// Payment Confirmation Notice
// =============================================================================

pub const PAYMENT_CONFIRMED_TITLE: &str = "Payment Confirmed! 🎉";
pub const PAYMENT_CONFIRMED_KIND: &str = "payment_confirmed";
pub const ORDERS_SCREEN: &str = "/orders";

/// Title, body and routing data of the notice sent after a successful payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentNotice {
    pub title: String,
    pub body: String,
    pub data: NotificationData,
}

impl PaymentNotice {
    pub fn for_order(order_id: &str) -> Self {
        PaymentNotice {
            title: PAYMENT_CONFIRMED_TITLE.to_string(),
            body: format!(
                "Your order {} has been placed successfully and is on its way.",
                order_id
            ),
            data: NotificationData {
                kind: PAYMENT_CONFIRMED_KIND.to_string(),
                screen: Some(ORDERS_SCREEN.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::catalog::seed_products;
    use crate::money::Money;
    use crate::DELIVERY_FEE;

    #[test]
    fn test_slots_cover_nine_to_eight() {
        let slots: Vec<String> = DeliverySlot::all().map(|s| s.to_string()).collect();
        assert_eq!(slots.len(), 12);
        assert_eq!(slots.first().map(String::as_str), Some("09:00"));
        assert_eq!(slots.last().map(String::as_str), Some("20:00"));
    }

    #[test]
    fn test_slot_parse() {
        assert_eq!("14:00".parse::<DeliverySlot>().unwrap().hour(), 14);
        assert!("08:00".parse::<DeliverySlot>().is_err());
        assert!("14:30".parse::<DeliverySlot>().is_err());
        assert!("9:00".parse::<DeliverySlot>().is_err());
        assert!("noon".parse::<DeliverySlot>().is_err());
    }

    #[test]
    fn test_slot_serializes_as_label() {
        let json = serde_json::to_string(&DeliverySlot::new(11).unwrap()).unwrap();
        assert_eq!(json, "\"11:00\"");
        let back: DeliverySlot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.hour(), 11);
    }

    #[test]
    fn test_order_id_suffix_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let id = generate_order_id(2026, &mut rng);
            let suffix: u16 = id.trim_start_matches("ORD-2026-").parse().unwrap();
            assert!((100..=999).contains(&suffix), "{}", id);
        }
    }

    #[test]
    fn test_build_order_counts_units() {
        let products = seed_products();
        let items = vec![CartItem::new(&products[0], 2), CartItem::new(&products[3], 3)];
        let totals = CheckoutTotals::from_cart(&items, DELIVERY_FEE);
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();

        let order = build_order("ORD-2026-417".to_string(), date, &items, &totals);

        assert_eq!(order.items, 5);
        assert_eq!(order.status, OrderStatus::OnTheWay);
        // 2 × 45 + 3 × 35 + 5
        assert_eq!(order.total, Money::from_major(200));
    }

    #[test]
    fn test_date_labels() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 6).unwrap();
        assert_eq!(order_date_label(date), "6 Oct 2026");

        let selection = CheckoutSelection {
            date: Some(date),
            ..CheckoutSelection::default()
        };
        assert_eq!(selection.date_label().as_deref(), Some("October 6, 2026"));
        assert_eq!(selection.slot.to_string(), "09:00");
    }

    #[test]
    fn test_payment_notice() {
        let notice = PaymentNotice::for_order("ORD-2026-417");
        assert_eq!(
            notice.body,
            "Your order ORD-2026-417 has been placed successfully and is on its way."
        );
        assert_eq!(notice.data.screen.as_deref(), Some("/orders"));
    }
}
