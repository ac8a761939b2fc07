//! Unified error handling for the API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::stripe::StripeError;

/// Generic message for failures whose detail must not reach clients.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try later";

/// Application-level error type for request handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Payment gateway operation failed.
    #[error("Stripe error: {0}")]
    Stripe(#[from] StripeError),

    /// Request payload failed schema validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Caller identity is missing.
    #[error("Unauthorized")]
    Unauthorized,

    /// Referenced entity is absent or a unique field is taken.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Server-side failures go to Sentry; client errors do not.
        if matches!(
            self,
            Self::Database(_) | Self::Internal(_) | Self::Stripe(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "API request error"
            );
        }

        let status = match &self {
            Self::Database(_) | Self::Internal(_) | Self::Stripe(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Conflict(_) => StatusCode::CONFLICT,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Internal(_) | Self::Stripe(_) => GENERIC_FAILURE.to_string(),
            Self::Validation(message) | Self::Conflict(message) => message.clone(),
            Self::Unauthorized => "Unauthorized".to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Conflict("Store with this id does not exist".to_string());
        assert_eq!(
            err.to_string(),
            "Conflict: Store with this id does not exist"
        );

        let err = AppError::Validation("productIds must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: productIds must not be empty"
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::Validation("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(get_status(AppError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            get_status(AppError::Conflict("test".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
