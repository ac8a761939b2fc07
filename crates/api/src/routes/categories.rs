//! Category CRUD.

use axum::extract::{Path, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use tracing::instrument;

use marquee_core::{BillboardId, CategoryId, StoreId};

use super::{conflict_on_not_found, require_store};
use crate::db::CategoryRepository;
use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::Category;
use crate::payloads::{CategoryPayload, ValidJson};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/stores/{store_id}/categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/api/stores/{store_id}/categories/{category_id}",
            patch(update_category).delete(delete_category),
        )
}

fn parse_billboard_id(raw: &str) -> Result<BillboardId, AppError> {
    raw.parse()
        .map_err(|_| AppError::Validation("billboardId must be a valid id".to_string()))
}

#[instrument(skip_all, fields(%store_id))]
async fn list_categories(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = CategoryRepository::new(state.pool()).list(store_id).await?;
    Ok(Json(categories))
}

#[instrument(skip_all, fields(%store_id, user = %user))]
async fn create_category(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
    AuthUser(user): AuthUser,
    ValidJson(payload): ValidJson<CategoryPayload>,
) -> Result<Json<Category>, AppError> {
    require_store(&state, store_id, &user).await?;
    let billboard_id = parse_billboard_id(&payload.billboard_id)?;

    let categories = CategoryRepository::new(state.pool());
    if categories.find_by_name(&payload.name).await?.is_some() {
        return Err(AppError::Conflict(
            "Category with this name already exists".to_string(),
        ));
    }

    let category = categories
        .create(store_id, billboard_id, &payload.name)
        .await?;
    Ok(Json(category))
}

#[instrument(skip_all, fields(%store_id, %category_id, user = %user))]
async fn update_category(
    State(state): State<AppState>,
    Path((store_id, category_id)): Path<(StoreId, CategoryId)>,
    AuthUser(user): AuthUser,
    ValidJson(payload): ValidJson<CategoryPayload>,
) -> Result<Json<Category>, AppError> {
    require_store(&state, store_id, &user).await?;
    let billboard_id = parse_billboard_id(&payload.billboard_id)?;

    let category = CategoryRepository::new(state.pool())
        .update(category_id, billboard_id, &payload.name)
        .await
        .map_err(|e| conflict_on_not_found(e, "Category with this id does not exist"))?;

    Ok(Json(category))
}

#[instrument(skip_all, fields(%store_id, %category_id, user = %user))]
async fn delete_category(
    State(state): State<AppState>,
    Path((store_id, category_id)): Path<(StoreId, CategoryId)>,
    AuthUser(user): AuthUser,
) -> Result<Json<Category>, AppError> {
    require_store(&state, store_id, &user).await?;

    let category = CategoryRepository::new(state.pool())
        .delete(category_id)
        .await
        .map_err(|e| conflict_on_not_found(e, "Category with this id does not exist"))?;

    Ok(Json(category))
}
