//! HTTP route handlers.
//!
//! # Route Tree
//!
//! ```text
//! /api
//! ├── /stores                          POST          create store
//! │   └── /{store_id}                  PATCH DELETE  rename / delete store
//! │       ├── /billboards              GET POST
//! │       │   └── /{billboard_id}      PATCH DELETE
//! │       ├── /categories              GET POST
//! │       │   └── /{category_id}       PATCH DELETE
//! │       ├── /sizes                   GET POST
//! │       │   └── /{size_id}           PATCH DELETE
//! │       ├── /colors                  GET POST
//! │       │   └── /{color_id}          PATCH DELETE
//! │       ├── /products                GET POST
//! │       │   └── /{product_id}        GET PATCH DELETE
//! │       ├── /orders                  GET
//! │       ├── /analytics/revenue       GET
//! │       └── /checkout                POST (permissive CORS)
//! └── /webhooks/stripe                 POST (signature auth)
//! ```
//!
//! Reads are public (the storefront consumes them); mutations require the
//! proxy-injected caller identity plus store ownership.

pub mod analytics;
pub mod billboards;
pub mod categories;
pub mod checkout;
pub mod colors;
pub mod orders;
pub mod products;
pub mod sizes;
pub mod stores;
pub mod webhook;

use axum::Router;

use marquee_core::{StoreId, UserId};

use crate::db::{RepositoryError, StoreRepository};
use crate::error::AppError;
use crate::models::Store;
use crate::state::AppState;

/// Assemble all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(stores::routes())
        .merge(billboards::routes())
        .merge(categories::routes())
        .merge(sizes::routes())
        .merge(colors::routes())
        .merge(products::routes())
        .merge(orders::routes())
        .merge(analytics::routes())
        .merge(checkout::routes())
        .merge(webhook::routes())
}

/// Verify that the store exists and belongs to the caller. Every mutation on
/// store-owned data goes through this first.
pub(crate) async fn require_store(
    state: &AppState,
    store_id: StoreId,
    owner: &UserId,
) -> Result<Store, AppError> {
    StoreRepository::new(state.pool())
        .find_owned(store_id, owner)
        .await?
        .ok_or_else(|| AppError::Conflict("Store with this id does not exist".to_string()))
}

/// Map a repository `NotFound` to the entity's fixed 409 message.
pub(crate) fn conflict_on_not_found(err: RepositoryError, message: &str) -> AppError {
    match err {
        RepositoryError::NotFound => AppError::Conflict(message.to_string()),
        other => AppError::Database(other),
    }
}
