//! Color CRUD.

use axum::extract::{Path, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use tracing::instrument;

use marquee_core::{ColorId, StoreId};

use super::{conflict_on_not_found, require_store};
use crate::db::ColorRepository;
use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::Color;
use crate::payloads::{AttributePayload, ValidJson};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/stores/{store_id}/colors",
            get(list_colors).post(create_color),
        )
        .route(
            "/api/stores/{store_id}/colors/{color_id}",
            patch(update_color).delete(delete_color),
        )
}

#[instrument(skip_all, fields(%store_id))]
async fn list_colors(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
) -> Result<Json<Vec<Color>>, AppError> {
    let colors = ColorRepository::new(state.pool()).list(store_id).await?;
    Ok(Json(colors))
}

#[instrument(skip_all, fields(%store_id, user = %user))]
async fn create_color(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
    AuthUser(user): AuthUser,
    ValidJson(payload): ValidJson<AttributePayload>,
) -> Result<Json<Color>, AppError> {
    require_store(&state, store_id, &user).await?;

    let color = ColorRepository::new(state.pool())
        .create(store_id, &payload.name, &payload.value)
        .await?;
    Ok(Json(color))
}

#[instrument(skip_all, fields(%store_id, %color_id, user = %user))]
async fn update_color(
    State(state): State<AppState>,
    Path((store_id, color_id)): Path<(StoreId, ColorId)>,
    AuthUser(user): AuthUser,
    ValidJson(payload): ValidJson<AttributePayload>,
) -> Result<Json<Color>, AppError> {
    require_store(&state, store_id, &user).await?;

    let color = ColorRepository::new(state.pool())
        .update(color_id, &payload.name, &payload.value)
        .await
        .map_err(|e| conflict_on_not_found(e, "Color with this id does not exist"))?;

    Ok(Json(color))
}

#[instrument(skip_all, fields(%store_id, %color_id, user = %user))]
async fn delete_color(
    State(state): State<AppState>,
    Path((store_id, color_id)): Path<(StoreId, ColorId)>,
    AuthUser(user): AuthUser,
) -> Result<Json<Color>, AppError> {
    require_store(&state, store_id, &user).await?;

    let color = ColorRepository::new(state.pool())
        .delete(color_id)
        .await
        .map_err(|e| conflict_on_not_found(e, "Color with this id does not exist"))?;

    Ok(Json(color))
}
