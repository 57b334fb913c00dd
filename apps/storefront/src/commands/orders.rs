//! # Order Commands
//!
//! The order history screen.

use bloomy_core::checkout::order_date_label;
use bloomy_core::Order;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{ConfigState, DbState, StoreState};

/// An order card.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    /// e.g. "16 Oct 2026"
    pub date_label: String,
    pub status_label: String,
    pub total_label: String,
}

impl OrderView {
    fn new(order: &Order, config: &ConfigState) -> Self {
        OrderView {
            order: order.clone(),
            date_label: order_date_label(order.date),
            status_label: order.status.label().to_string(),
            total_label: config.format_price(order.total),
        }
    }
}

/// Replaces the store's orders with the stored history.
///
/// Runs when the order screen gains focus, so orders placed in an earlier
/// session show up.
pub async fn load_orders(store: &StoreState, db: &DbState) -> Result<Vec<Order>, ApiError> {
    debug!("load_orders command");

    let orders = db.user_data().orders().await?;
    info!(count = orders.len(), "Order history loaded");

    store.with_store_mut(|s| s.set_orders(orders.clone()));
    Ok(orders)
}

/// Orders in the store, newest first.
pub fn list_orders(store: &StoreState, config: &ConfigState) -> Vec<OrderView> {
    debug!("list_orders command");

    store.with_store(|s| {
        s.orders()
            .iter()
            .map(|o| OrderView::new(o, config))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use bloomy_core::{Money, OrderStatus};
    use chrono::NaiveDate;

    use super::*;

    fn order(id: &str, day: u32) -> Order {
        Order {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
            status: OrderStatus::OnTheWay,
            items: 3,
            total: Money::from_major(131),
        }
    }

    #[tokio::test]
    async fn test_load_orders_hydrates_store() {
        let store = StoreState::new();
        let db = DbState::memory();
        db.user_data().prepend_order(&order("ORD-2026-101", 1)).await.unwrap();
        db.user_data().prepend_order(&order("ORD-2026-202", 2)).await.unwrap();

        let orders = load_orders(&store, &db).await.unwrap();

        assert_eq!(orders.len(), 2);
        let views = list_orders(&store, &ConfigState::default());
        assert_eq!(views[0].order.id, "ORD-2026-202");
        assert_eq!(views[0].date_label, "2 Oct 2026");
        assert_eq!(views[0].status_label, "On the way");
        assert_eq!(views[0].total_label, "131.00 AZN");
    }

    #[tokio::test]
    async fn test_load_orders_with_no_blob() {
        let store = StoreState::new();
        let db = DbState::memory();
        assert!(load_orders(&store, &db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_blob_is_an_error() {
        use bloomy_db::KeyValueStore;

        let store = StoreState::new();
        let db = DbState::memory();
        db.kv().set("userData", "[").await.unwrap();

        let err = load_orders(&store, &db).await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::DatabaseError);
    }

    #[test]
    fn test_view_serializes_flat() {
        let store = StoreState::new();
        store.with_store_mut(|s| s.add_order(order("ORD-2026-303", 16)));

        let json = serde_json::to_value(list_orders(&store, &ConfigState::default())).unwrap();
        assert_eq!(json[0]["id"], "ORD-2026-303");
        assert_eq!(json[0]["status"], "On the way");
        assert_eq!(json[0]["dateLabel"], "16 Oct 2026");
    }
}
