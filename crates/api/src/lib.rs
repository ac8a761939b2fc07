//! Marquee API - multi-tenant e-commerce administration backend.
//!
//! Store owners manage billboards, categories, products, sizes, colors, and
//! orders through REST routes backed by `PostgreSQL`; checkout is delegated
//! to Stripe's hosted payment pages and reconciled by webhook.
//!
//! # Architecture
//!
//! - [`routes`] - Axum handlers, one module per entity
//! - [`payloads`] - Request schemas with trim + non-empty validation
//! - [`db`] - Repositories over sqlx, one per table
//! - [`services`] - The checkout/webhook reconciliation flow
//! - [`stripe`] - Gateway client and webhook signature verification
//! - [`middleware`] - Proxy-delegated caller identity

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod payloads;
pub mod routes;
pub mod services;
pub mod state;
pub mod stripe;

pub use config::ApiConfig;
pub use error::AppError;
pub use state::AppState;
