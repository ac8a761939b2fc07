//! Order models.
//!
//! An order is created unpaid at checkout initiation with a fixed item set;
//! the payment webhook later flips `is_paid` and fills in address/phone.

use chrono::{DateTime, Utc};
use serde::Serialize;

use marquee_core::{OrderId, OrderItemId, ProductId, StoreId};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub store_id: StoreId,
    pub is_paid: bool,
    /// Shipping address as a single display string; empty until paid.
    pub address: String,
    /// Buyer phone number; empty until paid.
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Join row tying a product into an order. Immutable after creation.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
}

/// An order with its item set, as listed in the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub order_items: Vec<OrderItem>,
}
