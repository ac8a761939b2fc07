//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors constructing or converting a [`Price`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// Prices cannot be negative.
    #[error("price must not be negative: {0}")]
    Negative(Decimal),

    /// The amount does not fit in an `i64` of minor units.
    #[error("price out of range: {0}")]
    OutOfRange(Decimal),
}

/// A non-negative monetary amount in the store currency's standard unit
/// (e.g. dollars, not cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a price, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Convert to minor currency units (cents) as required by payment
    /// gateways. Sub-cent fractions round half-to-even.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::OutOfRange`] if the amount does not fit in `i64`.
    pub fn minor_units(&self) -> Result<i64, PriceError> {
        let cents = (self.0 * Decimal::from(100)).round();
        cents.to_i64().ok_or(PriceError::OutOfRange(self.0))
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(
        value: sqlx::postgres::PgValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::new(amount)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_rejects_negative() {
        let result = Price::new(Decimal::new(-1, 2));
        assert_eq!(result, Err(PriceError::Negative(Decimal::new(-1, 2))));
    }

    #[test]
    fn test_zero_is_valid() {
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_minor_units() {
        let price = Price::new(Decimal::new(1999, 2)).expect("19.99 is valid");
        assert_eq!(price.minor_units(), Ok(1999));
    }

    #[test]
    fn test_minor_units_whole_amount() {
        let price = Price::new(Decimal::from(45)).expect("45 is valid");
        assert_eq!(price.minor_units(), Ok(4500));
    }

    #[test]
    fn test_display_two_decimal_places() {
        let price = Price::new(Decimal::new(5, 1)).expect("0.5 is valid");
        assert_eq!(price.to_string(), "0.50");
    }
}
