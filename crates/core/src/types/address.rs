//! Structured shipping/billing address with display formatting.

use serde::{Deserialize, Serialize};

/// A postal address as reported by the payment gateway at checkout.
///
/// Every component is optional; gateways omit whatever the buyer did not
/// provide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// Render the address as a single display string.
    ///
    /// Present, non-empty components are joined with `", "` in the fixed
    /// order line1, line2, city, state, postal code, country. An address
    /// with no components renders as the empty string.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        [
            self.line1.as_deref(),
            self.line2.as_deref(),
            self.city.as_deref(),
            self.state.as_deref(),
            self.postal_code.as_deref(),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|component| !component.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_address() {
        let address = Address {
            line1: Some("1 Pine St".to_string()),
            line2: Some("Apt 4".to_string()),
            city: Some("Portland".to_string()),
            state: Some("OR".to_string()),
            postal_code: Some("97201".to_string()),
            country: Some("US".to_string()),
        };
        assert_eq!(
            address.to_display_string(),
            "1 Pine St, Apt 4, Portland, OR, 97201, US"
        );
    }

    #[test]
    fn test_partial_address_no_dangling_separators() {
        let address = Address {
            city: Some("Lisbon".to_string()),
            country: Some("PT".to_string()),
            ..Address::default()
        };
        assert_eq!(address.to_display_string(), "Lisbon, PT");
    }

    #[test]
    fn test_empty_address() {
        assert_eq!(Address::default().to_display_string(), "");
    }

    #[test]
    fn test_empty_components_are_skipped() {
        let address = Address {
            line1: Some(String::new()),
            city: Some("Oslo".to_string()),
            country: Some("NO".to_string()),
            ..Address::default()
        };
        assert_eq!(address.to_display_string(), "Oslo, NO");
    }
}
