//! Billboard repository.

use sqlx::PgPool;

use marquee_core::{BillboardId, StoreId};

use super::RepositoryError;
use crate::models::Billboard;

const COLUMNS: &str = "id, store_id, label, image_url, created_at, updated_at";

pub struct BillboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BillboardRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List billboards for a store, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, store_id: StoreId) -> Result<Vec<Billboard>, RepositoryError> {
        let billboards = sqlx::query_as::<_, Billboard>(&format!(
            "SELECT {COLUMNS} FROM marquee.billboard
             WHERE store_id = $1 ORDER BY created_at DESC"
        ))
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(billboards)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: BillboardId) -> Result<Option<Billboard>, RepositoryError> {
        let billboard = sqlx::query_as::<_, Billboard>(&format!(
            "SELECT {COLUMNS} FROM marquee.billboard WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(billboard)
    }

    /// Find a billboard by its label. Labels are unique.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_label(&self, label: &str) -> Result<Option<Billboard>, RepositoryError> {
        let billboard = sqlx::query_as::<_, Billboard>(&format!(
            "SELECT {COLUMNS} FROM marquee.billboard WHERE label = $1"
        ))
        .bind(label)
        .fetch_optional(self.pool)
        .await?;

        Ok(billboard)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        store_id: StoreId,
        label: &str,
        image_url: &str,
    ) -> Result<Billboard, RepositoryError> {
        let billboard = sqlx::query_as::<_, Billboard>(&format!(
            "INSERT INTO marquee.billboard (store_id, label, image_url)
             VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        ))
        .bind(store_id)
        .bind(label)
        .bind(image_url)
        .fetch_one(self.pool)
        .await?;

        Ok(billboard)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no billboard matches.
    pub async fn update(
        &self,
        id: BillboardId,
        label: &str,
        image_url: &str,
    ) -> Result<Billboard, RepositoryError> {
        let billboard = sqlx::query_as::<_, Billboard>(&format!(
            "UPDATE marquee.billboard SET label = $2, image_url = $3, updated_at = now()
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(label)
        .bind(image_url)
        .fetch_optional(self.pool)
        .await?;

        billboard.ok_or(RepositoryError::NotFound)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no billboard matches.
    pub async fn delete(&self, id: BillboardId) -> Result<Billboard, RepositoryError> {
        let billboard = sqlx::query_as::<_, Billboard>(&format!(
            "DELETE FROM marquee.billboard WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        billboard.ok_or(RepositoryError::NotFound)
    }
}
