//! Storefront checkout endpoint.
//!
//! Called cross-origin by the storefront, so this router answers preflights
//! and stamps permissive CORS headers on every response, error bodies
//! included.

use axum::extract::{Path, State};
use axum::http::{HeaderValue, Method, header};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::instrument;

use marquee_core::{ProductId, StoreId};

use crate::error::AppError;
use crate::payloads::{CheckoutPayload, ValidJson};
use crate::services::CheckoutService;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // The storefront expects the method/header allowances on actual
    // responses too, not just on the preflight.
    let response_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, DELETE, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type, Authorization"),
        ));

    Router::new()
        .route("/api/stores/{store_id}/checkout", post(create_session))
        .layer(response_headers)
        .layer(cors)
}

#[derive(Debug, Serialize)]
struct CheckoutResponse {
    url: String,
}

#[instrument(skip_all, fields(%store_id))]
async fn create_session(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
    ValidJson(payload): ValidJson<CheckoutPayload>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let product_ids = payload
        .product_ids
        .iter()
        .map(|raw| {
            raw.parse::<ProductId>()
                .map_err(|_| AppError::Validation("productIds must contain valid ids".to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let url = CheckoutService::new(&state)
        .create_session(store_id, &product_ids)
        .await?;

    Ok(Json(CheckoutResponse { url }))
}
