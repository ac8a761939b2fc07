//! HTTP client for the Stripe REST API.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use marquee_core::OrderId;

use super::StripeError;
use super::types::CheckoutSession;
use crate::config::StripeConfig;

/// One line item on a checkout session. Quantity covers duplicate cart
/// entries of the same product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub name: String,
    /// Unit price in minor units (cents).
    pub unit_amount: i64,
    pub quantity: u32,
}

/// Client for the slice of the Stripe API the checkout flow needs.
#[derive(Debug, Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    secret_key: SecretString,
    api_base: String,
    success_url: String,
    cancel_url: String,
}

impl StripeClient {
    /// Build a client from the gateway configuration.
    #[must_use]
    pub fn new(config: &StripeConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            http,
            secret_key: config.secret_key.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            success_url: config.success_url.clone(),
            cancel_url: config.cancel_url.clone(),
        }
    }

    /// Create a hosted Checkout Session for the given line items, tagging it
    /// with the order ID so the completion webhook can find the order.
    ///
    /// # Errors
    ///
    /// Returns [`StripeError`] if the request fails, the gateway rejects it,
    /// or the response cannot be parsed.
    pub async fn create_checkout_session(
        &self,
        order_id: OrderId,
        line_items: &[LineItem],
    ) -> Result<CheckoutSession, StripeError> {
        let mut form: Vec<(String, String)> = vec![
            ("mode".into(), "payment".into()),
            ("success_url".into(), self.success_url.clone()),
            ("cancel_url".into(), self.cancel_url.clone()),
            ("billing_address_collection".into(), "required".into()),
            ("phone_number_collection[enabled]".into(), "true".into()),
            ("metadata[orderId]".into(), order_id.to_string()),
        ];

        for (index, item) in line_items.iter().enumerate() {
            form.push((
                format!("line_items[{index}][quantity]"),
                item.quantity.to_string(),
            ));
            form.push((
                format!("line_items[{index}][price_data][currency]"),
                "usd".into(),
            ));
            form.push((
                format!("line_items[{index}][price_data][unit_amount]"),
                item.unit_amount.to_string(),
            ));
            form.push((
                format!("line_items[{index}][price_data][product_data][name]"),
                item.name.clone(),
            ));
        }

        let response = self
            .http
            .post(format!("{}/v1/checkout/sessions", self.api_base))
            .bearer_auth(self.secret_key.expose_secret())
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(StripeError::Api { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_trailing_slash_trimmed() {
        let config = StripeConfig {
            secret_key: SecretString::from("sk_test_key"),
            webhook_secret: SecretString::from("whsec_test"),
            api_base: "http://localhost:12111/".to_string(),
            success_url: "https://shop.example.com/cart?success=1".to_string(),
            cancel_url: "https://shop.example.com/cart?canceled=1".to_string(),
        };

        let client = StripeClient::new(&config);
        assert_eq!(client.api_base, "http://localhost:12111");
    }
}
