//! Checkout orchestration.
//!
//! Session creation writes the order first and only then calls the payment
//! gateway; a gateway failure therefore leaves an unpaid order behind rather
//! than a paid-but-unrecorded sale. The completion webhook reconciles the
//! order by ID from the session metadata.

use std::collections::HashSet;

use tracing::{info, instrument, warn};

use marquee_core::{Address, OrderId, PriceError, ProductId, StoreId};

use crate::db::{OrderRepository, ProductRepository};
use crate::error::AppError;
use crate::models::Product;
use crate::state::AppState;
use crate::stripe::types::SessionObject;
use crate::stripe::{Event, EventType, LineItem, StripeError};

/// Orchestrates checkout session creation and webhook reconciliation.
pub struct CheckoutService<'a> {
    state: &'a AppState,
}

impl<'a> CheckoutService<'a> {
    #[must_use]
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create a hosted checkout session for a cart of product IDs and return
    /// the redirect URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the order cannot be recorded or the gateway
    /// call fails.
    #[instrument(skip(self), fields(store_id = %store_id))]
    pub async fn create_session(
        &self,
        store_id: StoreId,
        requested: &[ProductId],
    ) -> Result<String, AppError> {
        let products = ProductRepository::new(self.state.pool())
            .find_by_ids(requested)
            .await?;

        // A cart whose every ID points at a missing product has nothing to
        // charge; reject before any order row is written.
        if products.is_empty() {
            return Err(AppError::Validation(
                "productIds must reference at least one existing product".to_string(),
            ));
        }

        let line_items = build_line_items(&products)
            .map_err(|e| AppError::Internal(format!("product price not chargeable: {e}")))?;

        // Items for products that no longer exist are dropped; duplicates
        // stay duplicated so the order mirrors the cart.
        let existing: HashSet<ProductId> = products.iter().map(|p| p.id).collect();
        let known: Vec<ProductId> = requested
            .iter()
            .copied()
            .filter(|id| existing.contains(id))
            .collect();

        let order = OrderRepository::new(self.state.pool())
            .create_with_items(store_id, &known)
            .await?;
        info!(order_id = %order.id, items = known.len(), "order recorded, opening session");

        let session = self
            .state
            .stripe()
            .create_checkout_session(order.id, &line_items)
            .await?;

        session
            .url
            .ok_or(StripeError::MissingRedirectUrl)
            .map_err(AppError::from)
    }

    /// Apply a verified webhook event. Unknown event types are acknowledged
    /// without side effects.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if a database write fails.
    #[instrument(skip_all, fields(event_id = %event.id))]
    pub async fn handle_event(&self, event: &Event) -> Result<(), AppError> {
        match event.event_type {
            EventType::CheckoutSessionCompleted => {
                self.complete_order(&event.data.object).await
            }
            EventType::Other => Ok(()),
        }
    }

    async fn complete_order(&self, session: &SessionObject) -> Result<(), AppError> {
        let Some(order_id) = session
            .metadata
            .order_id
            .as_deref()
            .and_then(|raw| raw.parse::<OrderId>().ok())
        else {
            warn!(session_id = %session.id, "completed session has no usable orderId metadata");
            return Ok(());
        };

        let orders = OrderRepository::new(self.state.pool());
        let Some(order) = orders.find_by_id(order_id).await? else {
            // The gateway outlives our data; acknowledge so it stops retrying.
            warn!(%order_id, "completed session references an unknown order");
            return Ok(());
        };

        let (address, phone) = session
            .customer_details
            .as_ref()
            .map(|details| {
                let address = details
                    .address
                    .clone()
                    .map(Address::from)
                    .unwrap_or_default()
                    .to_display_string();
                let phone = details.phone.clone().unwrap_or_default();
                (address, phone)
            })
            .unwrap_or_default();

        orders.mark_paid(order.id, &address, &phone).await?;

        let product_ids = orders.product_ids(order.id).await?;
        let archived = ProductRepository::new(self.state.pool())
            .archive_all(&product_ids)
            .await?;
        info!(%order_id, archived, "order paid and products archived");

        Ok(())
    }
}

/// Build gateway line items: one item per distinct product at quantity 1.
/// Duplicate cart entries collapse here (the order's item rows still record
/// them); IDs without a matching product contribute nothing.
fn build_line_items(products: &[Product]) -> Result<Vec<LineItem>, PriceError> {
    products
        .iter()
        .map(|product| {
            Ok(LineItem {
                name: product.name.clone(),
                unit_amount: product.price.minor_units()?,
                quantity: 1,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use marquee_core::{CategoryId, ColorId, Price, SizeId};

    use super::*;

    fn product(id: ProductId, name: &str, price: &str) -> Product {
        let now = Utc::now();
        Product {
            id,
            store_id: StoreId::generate(),
            category_id: CategoryId::generate(),
            size_id: SizeId::generate(),
            color_id: ColorId::generate(),
            name: name.to_string(),
            price: Price::new(price.parse::<Decimal>().expect("decimal")).expect("price"),
            is_featured: false,
            is_archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_line_items_one_per_product_at_quantity_one() {
        let tee = ProductId::generate();
        let cap = ProductId::generate();
        let products = vec![product(tee, "Tee", "19.99"), product(cap, "Cap", "9.50")];

        let items = build_line_items(&products).expect("line items");

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Tee");
        assert_eq!(items[0].quantity, 1);
        assert_eq!(items[0].unit_amount, 1999);
        assert_eq!(items[1].name, "Cap");
        assert_eq!(items[1].quantity, 1);
        assert_eq!(items[1].unit_amount, 950);
    }

    #[test]
    fn test_line_items_round_to_minor_units() {
        let id = ProductId::generate();
        let products = vec![product(id, "Socks", "45")];

        let items = build_line_items(&products).expect("line items");
        assert_eq!(items[0].unit_amount, 4500);
    }
}
