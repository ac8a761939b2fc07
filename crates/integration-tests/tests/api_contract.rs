//! Contract tests on the API's serialized shapes. These run without a
//! server or database.

use marquee_api::models::{Order, OrderItem, OrderWithItems, Store};
use marquee_api::payloads::{CheckoutPayload, Payload, ProductPayload};
use marquee_core::{OrderId, OrderItemId, ProductId, StoreId, UserId};
use serde_json::Value;

fn sample_order(store_id: StoreId) -> Order {
    let now = chrono::Utc::now();
    Order {
        id: OrderId::generate(),
        store_id,
        is_paid: false,
        address: String::new(),
        phone: String::new(),
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn test_store_serializes_camel_case() {
    let now = chrono::Utc::now();
    let store = Store {
        id: StoreId::generate(),
        name: "Demo".to_string(),
        user_id: UserId::new("user_1".to_string()),
        created_at: now,
        updated_at: now,
    };

    let value = serde_json::to_value(&store).unwrap();
    assert!(value.get("userId").is_some());
    assert!(value.get("createdAt").is_some());
    assert!(value.get("user_id").is_none());
}

#[test]
fn test_order_with_items_flattens_order_fields() {
    let store_id = StoreId::generate();
    let order = sample_order(store_id);
    let order_id = order.id;
    let with_items = OrderWithItems {
        order,
        order_items: vec![OrderItem {
            id: OrderItemId::generate(),
            order_id,
            product_id: ProductId::generate(),
        }],
    };

    let value = serde_json::to_value(&with_items).unwrap();
    // Order fields sit at the top level, not nested under "order".
    assert_eq!(value["isPaid"], Value::Bool(false));
    assert!(value.get("order").is_none());
    assert_eq!(value["orderItems"].as_array().unwrap().len(), 1);
}

#[test]
fn test_checkout_payload_contract() {
    let payload: CheckoutPayload =
        serde_json::from_str(r#"{"productIds": [" a1 ", "b2"]}"#).unwrap();
    let payload = payload.normalize();
    assert!(payload.validate().is_ok());
    assert_eq!(payload.product_ids, vec!["a1", "b2"]);

    let empty: CheckoutPayload = serde_json::from_str(r#"{"productIds": []}"#).unwrap();
    assert!(empty.normalize().validate().is_err());
}

#[test]
fn test_product_payload_accepts_string_price() {
    // The dashboard posts decimal prices as JSON strings.
    let payload: ProductPayload = serde_json::from_str(
        r#"{"name": "Tee", "images": [{"url": "u"}], "price": "19.99",
            "categoryId": "c", "sizeId": "s", "colorId": "k"}"#,
    )
    .unwrap();

    assert!(payload.normalize().validate().is_ok());
}
