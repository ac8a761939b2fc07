//! Order repository.
//!
//! Orders are created unpaid when a checkout session starts. The item set is
//! immutable afterwards; the payment webhook flips `is_paid` and records the
//! buyer's address and phone.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use marquee_core::{OrderId, ProductId, StoreId};

use super::RepositoryError;
use crate::models::{Order, OrderItem, OrderWithItems};

const COLUMNS: &str = "id, store_id, is_paid, address, phone, created_at, updated_at";

pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an unpaid order with one item per entry in `product_ids`.
    /// Duplicate product IDs produce duplicate items, matching a cart that
    /// holds the same product twice.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn create_with_items(
        &self,
        store_id: StoreId,
        product_ids: &[ProductId],
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO marquee.store_order (store_id) VALUES ($1) RETURNING {COLUMNS}"
        ))
        .bind(store_id)
        .fetch_one(&mut *tx)
        .await?;

        let uuids: Vec<Uuid> = product_ids.iter().map(|id| id.as_uuid()).collect();
        sqlx::query(
            "INSERT INTO marquee.order_item (order_id, product_id)
             SELECT $1, unnest($2::uuid[])",
        )
        .bind(order.id)
        .bind(uuids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(order)
    }

    /// List a store's orders with their items, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_with_items(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<OrderWithItems>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {COLUMNS} FROM marquee.store_order
             WHERE store_id = $1 ORDER BY created_at DESC"
        ))
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id.as_uuid()).collect();
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT id, order_id, product_id FROM marquee.order_item
             WHERE order_id = ANY($1)",
        )
        .bind(order_ids)
        .fetch_all(self.pool)
        .await?;

        let mut items_by_order: HashMap<OrderId, Vec<OrderItem>> = HashMap::new();
        for item in items {
            items_by_order.entry(item.order_id).or_default().push(item);
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let order_items = items_by_order.remove(&order.id).unwrap_or_default();
                OrderWithItems { order, order_items }
            })
            .collect())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {COLUMNS} FROM marquee.store_order WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// Mark an order paid and record the buyer's shipping details.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order matches.
    pub async fn mark_paid(
        &self,
        id: OrderId,
        address: &str,
        phone: &str,
    ) -> Result<Order, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "UPDATE marquee.store_order
             SET is_paid = true, address = $2, phone = $3, updated_at = now()
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(address)
        .bind(phone)
        .fetch_optional(self.pool)
        .await?;

        order.ok_or(RepositoryError::NotFound)
    }

    /// Product IDs attached to an order, duplicates included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn product_ids(&self, id: OrderId) -> Result<Vec<ProductId>, RepositoryError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT product_id FROM marquee.order_item WHERE order_id = $1",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(ids.into_iter().map(ProductId::new).collect())
    }

    /// Paid revenue per calendar month across all years, as (month, total)
    /// pairs with month in 1..=12. Months with no sales are absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn monthly_revenue(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<(i32, Decimal)>, RepositoryError> {
        let rows = sqlx::query_as::<_, (i32, Decimal)>(
            "SELECT CAST(EXTRACT(MONTH FROM o.created_at) AS INTEGER) AS month,
                    COALESCE(SUM(p.price), 0) AS total
             FROM marquee.store_order o
             JOIN marquee.order_item oi ON oi.order_id = o.id
             JOIN marquee.product p ON p.id = oi.product_id
             WHERE o.store_id = $1 AND o.is_paid
             GROUP BY 1
             ORDER BY 1",
        )
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
