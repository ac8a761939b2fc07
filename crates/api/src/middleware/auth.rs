//! Caller identity extraction.
//!
//! The API runs behind an authenticating reverse proxy which validates the
//! session and forwards the caller's subject in `X-Auth-Request-User`.
//! Handlers that mutate store-owned data take [`AuthUser`] as an argument;
//! requests without the header are rejected with 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use marquee_core::UserId;

use crate::error::AppError;

/// Header populated by the fronting auth proxy.
pub const AUTH_USER_HEADER: &str = "x-auth-request-user";

/// The authenticated caller's subject.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserId);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let subject = parts
            .headers
            .get(AUTH_USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(AppError::Unauthorized)?;

        Ok(Self(UserId::new(subject.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn extract(request: Request<()>) -> Result<AuthUser, AppError> {
        let (mut parts, ()) = request.into_parts();
        AuthUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_header_present_yields_user() {
        let request = Request::builder()
            .header(AUTH_USER_HEADER, "user_2abc")
            .body(())
            .expect("request");

        let user = extract(request).await.expect("authenticated");
        assert_eq!(user.0.as_str(), "user_2abc");
    }

    #[tokio::test]
    async fn test_missing_header_rejected() {
        let request = Request::builder().body(()).expect("request");
        assert!(matches!(
            extract(request).await,
            Err(AppError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_blank_header_rejected() {
        let request = Request::builder()
            .header(AUTH_USER_HEADER, "   ")
            .body(())
            .expect("request");

        assert!(matches!(
            extract(request).await,
            Err(AppError::Unauthorized)
        ));
    }
}
