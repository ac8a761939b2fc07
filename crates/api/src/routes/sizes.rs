//! Size CRUD.

use axum::extract::{Path, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use tracing::instrument;

use marquee_core::{SizeId, StoreId};

use super::{conflict_on_not_found, require_store};
use crate::db::SizeRepository;
use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::Size;
use crate::payloads::{AttributePayload, ValidJson};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/stores/{store_id}/sizes",
            get(list_sizes).post(create_size),
        )
        .route(
            "/api/stores/{store_id}/sizes/{size_id}",
            patch(update_size).delete(delete_size),
        )
}

#[instrument(skip_all, fields(%store_id))]
async fn list_sizes(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Vec<Size>>, AppError> {
    let sizes = SizeRepository::new(state.pool()).list(store_id).await?;
    Ok(Json(sizes))
}

#[instrument(skip_all, fields(%store_id, user = %user))]
async fn create_size(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
    AuthUser(user): AuthUser,
    ValidJson(payload): ValidJson<AttributePayload>,
) -> Result<Json<Size>, AppError> {
    require_store(&state, store_id, &user).await?;

    let size = SizeRepository::new(state.pool())
        .create(store_id, &payload.name, &payload.value)
        .await?;
    Ok(Json(size))
}

#[instrument(skip_all, fields(%store_id, %size_id, user = %user))]
async fn update_size(
    State(state): State<AppState>,
    Path((store_id, size_id)): Path<(StoreId, SizeId)>,
    AuthUser(user): AuthUser,
    ValidJson(payload): ValidJson<AttributePayload>,
) -> Result<Json<Size>, AppError> {
    require_store(&state, store_id, &user).await?;

    let size = SizeRepository::new(state.pool())
        .update(size_id, &payload.name, &payload.value)
        .await
        .map_err(|e| conflict_on_not_found(e, "Size with this id does not exist"))?;

    Ok(Json(size))
}

#[instrument(skip_all, fields(%store_id, %size_id, user = %user))]
async fn delete_size(
    State(state): State<AppState>,
    Path((store_id, size_id)): Path<(StoreId, SizeId)>,
    AuthUser(user): AuthUser,
) -> Result<Json<Size>, AppError> {
    require_store(&state, store_id, &user).await?;

    let size = SizeRepository::new(state.pool())
        .delete(size_id)
        .await
        .map_err(|e| conflict_on_not_found(e, "Size with this id does not exist"))?;

    Ok(Json(size))
}
