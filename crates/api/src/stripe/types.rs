//! Wire types for the slice of the Stripe API this service touches.

use serde::Deserialize;

use marquee_core::Address;

/// A Checkout Session as returned by `POST /v1/checkout/sessions`.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    /// Hosted payment page the buyer is redirected to.
    pub url: Option<String>,
}

/// A webhook event envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub data: EventData,
}

/// Event types the service reacts to. Everything else folds into `Other`
/// and is acknowledged without side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum EventType {
    #[serde(rename = "checkout.session.completed")]
    CheckoutSessionCompleted,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventData {
    pub object: SessionObject,
}

/// The session object inside a checkout event.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionObject {
    pub id: String,
    #[serde(default)]
    pub metadata: SessionMetadata,
    pub customer_details: Option<CustomerDetails>,
}

/// Metadata we attached when creating the session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionMetadata {
    #[serde(rename = "orderId")]
    pub order_id: Option<String>,
}

/// Buyer details collected by the hosted payment page.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerDetails {
    pub address: Option<SessionAddress>,
    pub phone: Option<String>,
}

/// Postal address in Stripe's shape; every component is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionAddress {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl From<SessionAddress> for Address {
    fn from(addr: SessionAddress) -> Self {
        Self {
            line1: addr.line1,
            line2: addr.line2,
            city: addr.city,
            state: addr.state,
            postal_code: addr.postal_code,
            country: addr.country,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_parses_completed() {
        let event: Event = serde_json::from_str(
            r#"{
                "id": "evt_1",
                "type": "checkout.session.completed",
                "data": {
                    "object": {
                        "id": "cs_1",
                        "metadata": {"orderId": "7e6f7f3a-0a68-4b77-bb8e-7fb52a6e9ad8"},
                        "customer_details": {
                            "address": {"city": "Lisbon", "country": "PT"},
                            "phone": "+351000000000"
                        }
                    }
                }
            }"#,
        )
        .expect("event parses");

        assert_eq!(event.event_type, EventType::CheckoutSessionCompleted);
        let details = event.data.object.customer_details.expect("details");
        assert_eq!(details.phone.as_deref(), Some("+351000000000"));
        let address: Address = details.address.expect("address").into();
        assert_eq!(address.to_display_string(), "Lisbon, PT");
    }

    #[test]
    fn test_unknown_event_type_folds_to_other() {
        let event: Event = serde_json::from_str(
            r#"{
                "id": "evt_2",
                "type": "invoice.paid",
                "data": {"object": {"id": "in_1", "customer_details": null}}
            }"#,
        )
        .expect("event parses");

        assert_eq!(event.event_type, EventType::Other);
        assert!(event.data.object.metadata.order_id.is_none());
    }
}
