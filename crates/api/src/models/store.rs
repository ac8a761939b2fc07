//! Store model - the tenant that owns every other entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

use marquee_core::{StoreId, UserId};

/// A tenant store, owned by an auth-provider subject.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    /// Auth-provider subject of the owner.
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
