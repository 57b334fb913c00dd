//! # Checkout Commands
//!
//! The date, address, overview and payment steps.
//!
//! ## Payment Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         pay(form)                                       │
//! │                                                                         │
//! │  1. Snapshot cart + selection ──── empty cart? ──► CHECKOUT_INCOMPLETE │
//! │                                ─── no date/address? ─► CHECKOUT_INCOMPLETE
//! │  2. validate_card(form) ────────── bad fields? ──► VALIDATION_ERROR    │
//! │                                    (store untouched)                    │
//! │  3. PaymentGateway::charge(card, total) ── declined? ─► PAYMENT_ERROR  │
//! │  4. build_order(ORD-<year>-<NNN>, today, items, totals)                │
//! │  5. add_order → clear_cart → reset_checkout   (one store lock)         │
//! │  6. userData.orders ← order at the head       (failure logged)         │
//! │  7. Notify                                                              │
//! │       native: schedule "Payment Confirmed! 🎉" in 1s                   │
//! │       web:    write it straight into notification_history              │
//! │                                                                         │
//! │  Returns the order; the shell navigates to the success screen.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bloomy_core::checkout::{build_order, generate_order_id, PaymentNotice};
use bloomy_core::validation::{validate_card, validate_delivery_date, PaymentForm};
use bloomy_core::{
    Address, CartItem, CheckoutSelection, CheckoutTotals, CoreError, DeliverySlot, Order,
};
use chrono::{Datelike, Local, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::commands::cart::TotalsDisplay;
use crate::error::ApiError;
use crate::notify::{history_record, NotificationScheduler};
use crate::payment::{PaymentGateway, PaymentReceipt};
use crate::state::{ConfigState, DbState, StoreState};

/// Everything the overview step shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub items: Vec<CartItem>,
    pub totals: CheckoutTotals,
    pub display: TotalsDisplay,
    pub selection: CheckoutSelection,
    /// e.g. "October 16, 2026"
    pub date_label: Option<String>,
    pub address: Option<Address>,
}

/// What a successful payment produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOutcome {
    pub order: Order,
    pub receipt: PaymentReceipt,
    /// Id of the scheduled or recorded payment notification.
    pub notification_id: Option<String>,
}

/// Every slot the time picker offers, `09:00` to `20:00`.
pub fn delivery_slots() -> Vec<DeliverySlot> {
    DeliverySlot::all().collect()
}

/// Stores the date and time picked on the first checkout step.
///
/// ## Arguments
/// * `date` - Delivery day; today or later
/// * `slot` - Hourly window
/// * `today` - The caller's current date, so tests control the clock
pub fn select_delivery_date(
    store: &StoreState,
    date: NaiveDate,
    slot: DeliverySlot,
    today: NaiveDate,
) -> Result<CheckoutSelection, ApiError> {
    debug!(%date, %slot, "select_delivery_date command");

    validate_delivery_date(date, today)?;

    Ok(store.with_store_mut(|s| {
        s.set_checkout_date(date);
        s.set_checkout_slot(slot);
        s.checkout().clone()
    }))
}

/// Stores the address picked on the second checkout step.
pub fn select_address(store: &StoreState, id: &str) -> Result<CheckoutSelection, ApiError> {
    debug!(id = %id, "select_address command");

    store.with_store_mut(|s| -> Result<CheckoutSelection, ApiError> {
        if s.address(id).is_none() {
            return Err(CoreError::AddressNotFound(id.to_string()).into());
        }
        s.set_checkout_address(id);
        Ok(s.checkout().clone())
    })
}

/// The overview step.
///
/// With nothing selected yet the address falls back to the default one,
/// which is what the address step pre-selects.
pub fn checkout_summary(store: &StoreState, config: &ConfigState) -> CheckoutSummary {
    debug!("checkout_summary command");

    store.with_store(|s| {
        let totals = s.cart_totals(config.delivery_fee());
        let selection = s.checkout().clone();
        let address = s
            .checkout_address()
            .or_else(|| s.default_address())
            .cloned();

        CheckoutSummary {
            items: s.cart().to_vec(),
            display: TotalsDisplay::new(&totals, config),
            totals,
            date_label: selection.date_label(),
            selection,
            address,
        }
    })
}

/// Pays for the cart and places the order.
///
/// ## Errors
/// - CHECKOUT_INCOMPLETE: empty cart, or date/address not selected
/// - VALIDATION_ERROR: card form fields, with per-field messages
/// - PAYMENT_ERROR: the gateway refused the charge
///
/// Storage and notification failures after the charge are logged only;
/// the order stands.
pub async fn pay(
    store: &StoreState,
    db: &DbState,
    config: &ConfigState,
    payments: &dyn PaymentGateway,
    notifier: &dyn NotificationScheduler,
    form: PaymentForm,
) -> Result<PaymentOutcome, ApiError> {
    debug!("pay command");

    let (items, totals) = store.with_store(|s| -> Result<_, CoreError> {
        if s.cart().is_empty() {
            return Err(CoreError::EmptyCart);
        }
        if s.checkout().date.is_none() {
            return Err(CoreError::CheckoutIncomplete {
                missing: "delivery date".to_string(),
            });
        }
        if s.checkout_address().is_none() {
            return Err(CoreError::CheckoutIncomplete {
                missing: "delivery address".to_string(),
            });
        }
        Ok((s.cart().to_vec(), s.cart_totals(config.delivery_fee())))
    })?;

    let card = validate_card(&form)?;

    let receipt = payments.charge(&card, totals.total).await?;

    let today = Local::now().date_naive();
    let order_id = generate_order_id(today.year(), &mut rand::thread_rng());
    let order = build_order(order_id, today, &items, &totals);

    store.with_store_mut(|s| {
        s.add_order(order.clone());
        s.clear_cart();
        s.reset_checkout();
    });

    info!(
        order_id = %order.id,
        items = order.items,
        total = %order.total,
        reference = %receipt.reference,
        "Order placed"
    );

    if let Err(e) = db.user_data().prepend_order(&order).await {
        error!(order_id = %order.id, "Failed to persist order: {}", e);
    }

    let notification_id = notify(db, config, notifier, &order).await;

    Ok(PaymentOutcome {
        order,
        receipt,
        notification_id,
    })
}

async fn notify(
    db: &DbState,
    config: &ConfigState,
    notifier: &dyn NotificationScheduler,
    order: &Order,
) -> Option<String> {
    let notice = PaymentNotice::for_order(&order.id);

    if config.platform.supports_local_notifications() {
        return Some(notifier.schedule(notice, config.notification_delay()).await);
    }

    let now = Utc::now();
    let id = format!("web-notif-{}", now.timestamp_millis());
    match db
        .notifications()
        .record(history_record(id.clone(), notice, now, None))
        .await
    {
        Ok(_) => Some(id),
        Err(e) => {
            error!("Failed to save web notification: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use bloomy_core::Money;

    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::error::ErrorCode;
    use crate::notify::LocalNotificationScheduler;
    use crate::payment::SimulatedPaymentGateway;
    use crate::state::Platform;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn good_card() -> PaymentForm {
        PaymentForm {
            card_number: "1234 5678 9012 3456".to_string(),
            card_name: "Aysel Mammadova".to_string(),
            expiry: "03/27".to_string(),
            cvv: "123".to_string(),
        }
    }

    fn ready_store(config: &ConfigState) -> StoreState {
        let store = StoreState::new();
        add_to_cart(&store, config, "1", Some(2)).unwrap();
        select_delivery_date(&store, day(20), DeliverySlot::new(14).unwrap(), day(16)).unwrap();
        select_address(&store, "2").unwrap();
        store
    }

    #[test]
    fn test_past_date_rejected() {
        let store = StoreState::new();
        let err = select_delivery_date(&store, day(15), DeliverySlot::default(), day(16))
            .unwrap_err();
        assert!(err.fields.unwrap().get("date").is_some());
        assert!(store.with_store(|s| s.checkout().date.is_none()));
    }

    #[test]
    fn test_summary_falls_back_to_default_address() {
        let store = StoreState::new();
        let summary = checkout_summary(&store, &ConfigState::default());
        assert_eq!(summary.address.unwrap().id, "1");
        assert!(summary.date_label.is_none());

        let config = ConfigState::default();
        let store = ready_store(&config);
        let summary = checkout_summary(&store, &config);
        assert_eq!(summary.address.unwrap().id, "2");
        assert_eq!(summary.date_label.as_deref(), Some("October 20, 2026"));
        assert_eq!(summary.selection.slot.to_string(), "14:00");
        assert_eq!(summary.display.total, "95 AZN");
    }

    #[test]
    fn test_select_missing_address() {
        let store = StoreState::new();
        let err = select_address(&store, "nope").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_pay_web_records_notification_directly() {
        let config = ConfigState {
            platform: Platform::Web,
            ..ConfigState::default()
        };
        let store = ready_store(&config);
        let db = DbState::memory();
        let notifier = LocalNotificationScheduler::new(db.notifications());

        let outcome = pay(&store, &db, &config, &SimulatedPaymentGateway, &notifier, good_card())
            .await
            .unwrap();

        assert_eq!(outcome.order.items, 2);
        assert_eq!(outcome.order.total, Money::from_major(95));
        assert_eq!(outcome.receipt.card_last4, "3456");

        let history = db.notifications().list().await.unwrap();
        assert_eq!(history.len(), 1);
        assert!(history[0].id.starts_with("web-notif-"));
        assert_eq!(Some(history[0].id.clone()), outcome.notification_id);
        assert_eq!(notifier.pending(), 0);
    }

    #[tokio::test]
    async fn test_pay_requires_selection() {
        let config = ConfigState::default();
        let store = StoreState::new();
        let db = DbState::memory();
        let notifier = LocalNotificationScheduler::new(db.notifications());

        let err = pay(&store, &db, &config, &SimulatedPaymentGateway, &notifier, good_card())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CheckoutIncomplete);

        add_to_cart(&store, &config, "1", None).unwrap();
        let err = pay(&store, &db, &config, &SimulatedPaymentGateway, &notifier, good_card())
            .await
            .unwrap_err();
        assert_eq!(err.message, "Please select a delivery date");
    }

    #[tokio::test]
    async fn test_invalid_card_leaves_store_untouched() {
        let config = ConfigState::default();
        let store = ready_store(&config);
        let db = DbState::memory();
        let notifier = LocalNotificationScheduler::new(db.notifications());
        let form = PaymentForm {
            expiry: "03-27".to_string(),
            ..good_card()
        };

        let err = pay(&store, &db, &config, &SimulatedPaymentGateway, &notifier, form)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.fields.unwrap().get("expiry").is_some());
        assert_eq!(store.with_store(|s| s.cart().len()), 1);
        assert!(store.with_store(|s| s.orders().is_empty()));
    }
}
