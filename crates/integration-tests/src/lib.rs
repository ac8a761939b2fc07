//! Integration tests for Marquee.
//!
//! # Running Tests
//!
//! Server-dependent tests are `#[ignore]`d by default. To run them, start
//! `PostgreSQL`, apply migrations, and launch the API:
//!
//! ```bash
//! cargo run -p marquee-cli -- migrate
//! cargo run -p marquee-api &
//! cargo test -p marquee-integration-tests -- --ignored
//! ```
//!
//! The base URL defaults to `http://localhost:3001` and can be overridden
//! with `MARQUEE_API_URL`.

use reqwest::Client;

/// Shared setup for tests that talk to a running API instance.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    #[must_use]
    pub fn new() -> Self {
        let base_url = std::env::var("MARQUEE_API_URL")
            .unwrap_or_else(|_| "http://localhost:3001".to_string());

        Self {
            client: Client::new(),
            base_url,
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Header the fronting auth proxy injects; tests set it directly.
pub const AUTH_HEADER: &str = "X-Auth-Request-User";
