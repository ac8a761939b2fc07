//! Stripe webhook endpoint.
//!
//! Verification needs the raw body bytes exactly as sent, so this handler
//! takes `String` rather than a JSON extractor. Response bodies here use the
//! `error`/`success` keys the gateway tooling expects, not the API's usual
//! `message` envelope.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use secrecy::ExposeSecret;
use serde_json::json;
use tracing::instrument;

use crate::error::{AppError, GENERIC_FAILURE};
use crate::services::CheckoutService;
use crate::state::AppState;
use crate::stripe::webhook::{self, SIGNATURE_HEADER};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/webhooks/stripe", post(handle_webhook))
}

fn webhook_error(reason: &impl std::fmt::Display) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": format!("Webhook error: {reason}") })),
    )
        .into_response()
}

/// A reconciliation failure is a server-side error, but it still answers in
/// this endpoint's `error` envelope rather than the API's `message` one.
fn reconciliation_failure(err: &AppError) -> Response {
    let event_id = sentry::capture_error(err);
    tracing::error!(
        error = %err,
        sentry_event_id = %event_id,
        "webhook reconciliation failed"
    );
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": GENERIC_FAILURE })),
    )
        .into_response()
}

#[instrument(skip_all)]
async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let Some(signature) = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
    else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Signature is not present" })),
        )
            .into_response();
    };

    let secret = state.config().stripe.webhook_secret.expose_secret();
    if let Err(reason) = webhook::verify_signature(signature, &body, secret, Utc::now()) {
        return webhook_error(&reason);
    }

    let event = match webhook::parse_event(&body) {
        Ok(event) => event,
        Err(err) => return webhook_error(&err),
    };

    if let Err(err) = CheckoutService::new(&state).handle_event(&event).await {
        return reconciliation_failure(&err);
    }

    (StatusCode::OK, Json(json!({ "success": true }))).into_response()
}
