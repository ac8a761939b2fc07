//! Billboard model - a labeled promotional image referenced by categories.

use chrono::{DateTime, Utc};
use serde::Serialize;

use marquee_core::{BillboardId, StoreId};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Billboard {
    pub id: BillboardId,
    pub store_id: StoreId,
    pub label: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
