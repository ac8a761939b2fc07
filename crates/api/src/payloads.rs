//! Request payload schemas and validation.
//!
//! Each entity has one payload struct mirroring the dashboard's form shape.
//! Payloads are normalized (string trimming) and then validated before a
//! handler sees them; failures surface as 400 with the first field message.

use axum::Json;
use axum::extract::{FromRequest, Request};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A request payload that can normalize and validate itself.
pub trait Payload: DeserializeOwned {
    /// Apply lossless cleanup (trimming) before validation.
    #[must_use]
    fn normalize(self) -> Self {
        self
    }

    /// Check field constraints, returning the first violation message.
    ///
    /// # Errors
    ///
    /// Returns the message surfaced to the client as a 400.
    fn validate(&self) -> Result<(), String>;
}

/// Extractor that deserializes, normalizes, and validates a [`Payload`].
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: Payload,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        let payload = payload.normalize();
        payload.validate().map_err(AppError::Validation)?;

        Ok(Self(payload))
    }
}

fn require_non_empty(value: &str, field: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    Ok(())
}

/// `{ name }` for creating or renaming a store.
#[derive(Debug, Clone, Deserialize)]
pub struct StorePayload {
    pub name: String,
}

impl Payload for StorePayload {
    fn validate(&self) -> Result<(), String> {
        require_non_empty(&self.name, "name")
    }
}

/// `{ label, imageUrl }` for billboards.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillboardPayload {
    pub label: String,
    pub image_url: String,
}

impl Payload for BillboardPayload {
    fn normalize(mut self) -> Self {
        self.label = self.label.trim().to_string();
        self
    }

    fn validate(&self) -> Result<(), String> {
        require_non_empty(&self.label, "label")?;
        require_non_empty(&self.image_url, "imageUrl")
    }
}

/// `{ name, billboardId }` for categories.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    pub name: String,
    pub billboard_id: String,
}

impl Payload for CategoryPayload {
    fn normalize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self
    }

    fn validate(&self) -> Result<(), String> {
        require_non_empty(&self.name, "name")?;
        require_non_empty(&self.billboard_id, "billboardId")
    }
}

/// `{ name, value }` shared by sizes and colors.
#[derive(Debug, Clone, Deserialize)]
pub struct AttributePayload {
    pub name: String,
    pub value: String,
}

impl Payload for AttributePayload {
    fn normalize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.value = self.value.trim().to_string();
        self
    }

    fn validate(&self) -> Result<(), String> {
        require_non_empty(&self.name, "name")?;
        require_non_empty(&self.value, "value")
    }
}

/// One image URL inside a product payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagePayload {
    pub url: String,
}

/// Full product shape; `isFeatured`/`isArchived` default to false.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub images: Vec<ImagePayload>,
    pub price: Decimal,
    pub category_id: String,
    pub size_id: String,
    pub color_id: String,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_archived: bool,
}

impl Payload for ProductPayload {
    fn normalize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self
    }

    fn validate(&self) -> Result<(), String> {
        require_non_empty(&self.name, "name")?;
        for image in &self.images {
            require_non_empty(&image.url, "images.url")?;
        }
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err("price must not be negative".to_string());
        }
        require_non_empty(&self.category_id, "categoryId")?;
        require_non_empty(&self.size_id, "sizeId")?;
        require_non_empty(&self.color_id, "colorId")
    }
}

/// `{ productIds }` from the storefront cart.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    pub product_ids: Vec<String>,
}

impl Payload for CheckoutPayload {
    fn normalize(mut self) -> Self {
        for id in &mut self.product_ids {
            *id = id.trim().to_string();
        }
        self
    }

    fn validate(&self) -> Result<(), String> {
        // An empty cart has nothing to check out.
        if self.product_ids.is_empty() {
            return Err("productIds must not be empty".to_string());
        }
        for id in &self.product_ids {
            require_non_empty(id, "productIds")?;
        }
        Ok(())
    }
}
