//! Order listing for the dashboard. Orders are created by checkout and
//! mutated only by the payment webhook, so there are no write routes here.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::instrument;

use marquee_core::StoreId;

use super::require_store;
use crate::db::OrderRepository;
use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::OrderWithItems;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/stores/{store_id}/orders", get(list_orders))
}

#[instrument(skip_all, fields(%store_id, user = %user))]
async fn list_orders(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<OrderWithItems>>, AppError> {
    require_store(&state, store_id, &user).await?;

    let orders = OrderRepository::new(state.pool())
        .list_with_items(store_id)
        .await?;
    Ok(Json(orders))
}
