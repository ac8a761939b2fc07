//! Billboard CRUD.

use axum::extract::{Path, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use tracing::instrument;

use marquee_core::{BillboardId, StoreId};

use super::{conflict_on_not_found, require_store};
use crate::db::BillboardRepository;
use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::Billboard;
use crate::payloads::{BillboardPayload, ValidJson};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/stores/{store_id}/billboards",
            get(list_billboards).post(create_billboard),
        )
        .route(
            "/api/stores/{store_id}/billboards/{billboard_id}",
            patch(update_billboard).delete(delete_billboard),
        )
}

#[instrument(skip_all, fields(%store_id))]
async fn list_billboards(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Vec<Billboard>>, AppError> {
    let billboards = BillboardRepository::new(state.pool()).list(store_id).await?;
    Ok(Json(billboards))
}

#[instrument(skip_all, fields(%store_id, user = %user))]
async fn create_billboard(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
    AuthUser(user): AuthUser,
    ValidJson(payload): ValidJson<BillboardPayload>,
) -> Result<Json<Billboard>, AppError> {
    require_store(&state, store_id, &user).await?;

    let billboards = BillboardRepository::new(state.pool());
    if billboards.find_by_label(&payload.label).await?.is_some() {
        return Err(AppError::Conflict(
            "Billboard with this name already exists".to_string(),
        ));
    }

    let billboard = billboards
        .create(store_id, &payload.label, &payload.image_url)
        .await?;
    Ok(Json(billboard))
}

#[instrument(skip_all, fields(%store_id, %billboard_id, user = %user))]
async fn update_billboard(
    State(state): State<AppState>,
    Path((store_id, billboard_id)): Path<(StoreId, BillboardId)>,
    AuthUser(user): AuthUser,
    ValidJson(payload): ValidJson<BillboardPayload>,
) -> Result<Json<Billboard>, AppError> {
    require_store(&state, store_id, &user).await?;

    let billboard = BillboardRepository::new(state.pool())
        .update(billboard_id, &payload.label, &payload.image_url)
        .await
        .map_err(|e| conflict_on_not_found(e, "Billboard with this id does not exist"))?;

    Ok(Json(billboard))
}

#[instrument(skip_all, fields(%store_id, %billboard_id, user = %user))]
async fn delete_billboard(
    State(state): State<AppState>,
    Path((store_id, billboard_id)): Path<(StoreId, BillboardId)>,
    AuthUser(user): AuthUser,
) -> Result<Json<Billboard>, AppError> {
    require_store(&state, store_id, &user).await?;

    let billboard = BillboardRepository::new(state.pool())
        .delete(billboard_id)
        .await
        .map_err(|e| conflict_on_not_found(e, "Billboard with this id does not exist"))?;

    Ok(Json(billboard))
}
