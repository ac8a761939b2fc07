//! Product CRUD with storefront filters.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::instrument;

use marquee_core::{CategoryId, ColorId, Price, ProductId, SizeId, StoreId};

use super::{conflict_on_not_found, require_store};
use crate::db::{ProductFilter, ProductRepository};
use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::{Product, ProductDetail};
use crate::payloads::{ProductPayload, ValidJson};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/stores/{store_id}/products",
            get(list_products).post(create_product),
        )
        .route(
            "/api/stores/{store_id}/products/{product_id}",
            get(get_product).patch(update_product).delete(delete_product),
        )
}

/// Storefront query filters, all optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductQuery {
    category_id: Option<CategoryId>,
    size_id: Option<SizeId>,
    color_id: Option<ColorId>,
    is_featured: Option<bool>,
    is_archived: Option<bool>,
}

impl From<ProductQuery> for ProductFilter {
    fn from(query: ProductQuery) -> Self {
        Self {
            category_id: query.category_id,
            size_id: query.size_id,
            color_id: query.color_id,
            is_featured: query.is_featured,
            is_archived: query.is_archived,
        }
    }
}

/// Resolved references from the payload's string IDs.
struct ProductRefs {
    category_id: CategoryId,
    size_id: SizeId,
    color_id: ColorId,
    price: Price,
}

fn resolve_refs(payload: &ProductPayload) -> Result<ProductRefs, AppError> {
    let category_id = payload
        .category_id
        .parse()
        .map_err(|_| AppError::Validation("categoryId must be a valid id".to_string()))?;
    let size_id = payload
        .size_id
        .parse()
        .map_err(|_| AppError::Validation("sizeId must be a valid id".to_string()))?;
    let color_id = payload
        .color_id
        .parse()
        .map_err(|_| AppError::Validation("colorId must be a valid id".to_string()))?;
    let price = Price::new(payload.price)
        .map_err(|e| AppError::Validation(format!("price: {e}")))?;

    Ok(ProductRefs {
        category_id,
        size_id,
        color_id,
        price,
    })
}

fn image_urls(payload: &ProductPayload) -> Vec<String> {
    payload.images.iter().map(|image| image.url.clone()).collect()
}

#[instrument(skip_all, fields(%store_id))]
async fn list_products(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<ProductDetail>>, AppError> {
    let products = ProductRepository::new(state.pool())
        .list(store_id, &query.into())
        .await?;
    Ok(Json(products))
}

#[instrument(skip_all, fields(%store_id, %product_id))]
async fn get_product(
    State(state): State<AppState>,
    Path((store_id, product_id)): Path<(StoreId, ProductId)>,
) -> Result<Json<ProductDetail>, AppError> {
    let product = ProductRepository::new(state.pool())
        .find_detail(product_id)
        .await?
        .ok_or_else(|| AppError::Conflict("Product with this id does not exist".to_string()))?;

    Ok(Json(product))
}

#[instrument(skip_all, fields(%store_id, user = %user))]
async fn create_product(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
    AuthUser(user): AuthUser,
    ValidJson(payload): ValidJson<ProductPayload>,
) -> Result<Json<Product>, AppError> {
    require_store(&state, store_id, &user).await?;
    let refs = resolve_refs(&payload)?;

    let products = ProductRepository::new(state.pool());
    if products.find_by_name(&payload.name).await?.is_some() {
        return Err(AppError::Conflict(
            "Product with this name already exists".to_string(),
        ));
    }

    let product = products
        .create(
            store_id,
            refs.category_id,
            refs.size_id,
            refs.color_id,
            &payload.name,
            refs.price,
            &image_urls(&payload),
            payload.is_featured,
            payload.is_archived,
        )
        .await?;
    Ok(Json(product))
}

#[instrument(skip_all, fields(%store_id, %product_id, user = %user))]
async fn update_product(
    State(state): State<AppState>,
    Path((store_id, product_id)): Path<(StoreId, ProductId)>,
    AuthUser(user): AuthUser,
    ValidJson(payload): ValidJson<ProductPayload>,
) -> Result<Json<Product>, AppError> {
    require_store(&state, store_id, &user).await?;
    let refs = resolve_refs(&payload)?;

    let product = ProductRepository::new(state.pool())
        .update(
            product_id,
            refs.category_id,
            refs.size_id,
            refs.color_id,
            &payload.name,
            refs.price,
            &image_urls(&payload),
            payload.is_featured,
            payload.is_archived,
        )
        .await
        .map_err(|e| conflict_on_not_found(e, "Product with this id does not exist"))?;

    Ok(Json(product))
}

#[instrument(skip_all, fields(%store_id, %product_id, user = %user))]
async fn delete_product(
    State(state): State<AppState>,
    Path((store_id, product_id)): Path<(StoreId, ProductId)>,
    AuthUser(user): AuthUser,
) -> Result<Json<Product>, AppError> {
    require_store(&state, store_id, &user).await?;

    let product = ProductRepository::new(state.pool())
        .delete(product_id)
        .await
        .map_err(|e| conflict_on_not_found(e, "Product with this id does not exist"))?;

    Ok(Json(product))
}
