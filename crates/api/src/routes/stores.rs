//! Store CRUD.

use axum::extract::{Path, State};
use axum::routing::{patch, post};
use axum::{Json, Router};
use tracing::instrument;

use marquee_core::StoreId;

use super::conflict_on_not_found;
use crate::db::StoreRepository;
use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::Store;
use crate::payloads::{StorePayload, ValidJson};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/stores", post(create_store))
        .route(
            "/api/stores/{store_id}",
            patch(update_store).delete(delete_store),
        )
}

#[instrument(skip_all, fields(user = %user))]
async fn create_store(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidJson(payload): ValidJson<StorePayload>,
) -> Result<Json<Store>, AppError> {
    let stores = StoreRepository::new(state.pool());

    if stores.find_by_name(&payload.name).await?.is_some() {
        return Err(AppError::Conflict(
            "Store with this name already exists".to_string(),
        ));
    }

    let store = stores.create(&payload.name, &user).await?;
    Ok(Json(store))
}

#[instrument(skip_all, fields(%store_id, user = %user))]
async fn update_store(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
    AuthUser(user): AuthUser,
    ValidJson(payload): ValidJson<StorePayload>,
) -> Result<Json<Store>, AppError> {
    let store = StoreRepository::new(state.pool())
        .rename(store_id, &user, &payload.name)
        .await
        .map_err(|e| conflict_on_not_found(e, "Store with this id does not exist"))?;

    Ok(Json(store))
}

#[instrument(skip_all, fields(%store_id, user = %user))]
async fn delete_store(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
    AuthUser(user): AuthUser,
) -> Result<Json<Store>, AppError> {
    let store = StoreRepository::new(state.pool())
        .delete(store_id, &user)
        .await
        .map_err(|e| conflict_on_not_found(e, "Store with this id does not exist"))?;

    Ok(Json(store))
}
