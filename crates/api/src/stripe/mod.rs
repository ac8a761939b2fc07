//! Minimal Stripe integration.
//!
//! Covers exactly the two surfaces the API needs: creating Checkout Sessions
//! over the REST API and authenticating incoming webhook events. The REST
//! base URL is configurable so integration tests can point at a stub server.

pub mod client;
pub mod types;
pub mod webhook;

use thiserror::Error;

pub use client::{LineItem, StripeClient};
pub use types::{CheckoutSession, Event, EventType};

/// Errors from talking to the payment gateway.
#[derive(Debug, Error)]
pub enum StripeError {
    /// Transport-level failure reaching the gateway.
    #[error("request to payment gateway failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Gateway rejected the request.
    #[error("payment gateway returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Gateway response did not parse.
    #[error("could not parse gateway response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Session was created but carries no redirect URL.
    #[error("checkout session has no redirect url")]
    MissingRedirectUrl,
}
