//! Category model - groups products under a billboard.

use chrono::{DateTime, Utc};
use serde::Serialize;

use marquee_core::{BillboardId, CategoryId, StoreId};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub store_id: StoreId,
    pub billboard_id: BillboardId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
