//! Size repository.

use sqlx::PgPool;

use marquee_core::{SizeId, StoreId};

use super::RepositoryError;
use crate::models::Size;

const COLUMNS: &str = "id, store_id, name, value, created_at, updated_at";

pub struct SizeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SizeRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List sizes for a store, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, store_id: StoreId) -> Result<Vec<Size>, RepositoryError> {
        let sizes = sqlx::query_as::<_, Size>(&format!(
            "SELECT {COLUMNS} FROM marquee.size
             WHERE store_id = $1 ORDER BY created_at DESC"
        ))
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(sizes)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: SizeId) -> Result<Option<Size>, RepositoryError> {
        let size = sqlx::query_as::<_, Size>(&format!(
            "SELECT {COLUMNS} FROM marquee.size WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(size)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Size>, RepositoryError> {
        let size = sqlx::query_as::<_, Size>(&format!(
            "SELECT {COLUMNS} FROM marquee.size WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(size)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        store_id: StoreId,
        name: &str,
        value: &str,
    ) -> Result<Size, RepositoryError> {
        let size = sqlx::query_as::<_, Size>(&format!(
            "INSERT INTO marquee.size (store_id, name, value)
             VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        ))
        .bind(store_id)
        .bind(name)
        .bind(value)
        .fetch_one(self.pool)
        .await?;

        Ok(size)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no size matches.
    pub async fn update(
        &self,
        id: SizeId,
        name: &str,
        value: &str,
    ) -> Result<Size, RepositoryError> {
        let size = sqlx::query_as::<_, Size>(&format!(
            "UPDATE marquee.size SET name = $2, value = $3, updated_at = now()
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(value)
        .fetch_optional(self.pool)
        .await?;

        size.ok_or(RepositoryError::NotFound)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no size matches.
    pub async fn delete(&self, id: SizeId) -> Result<Size, RepositoryError> {
        let size = sqlx::query_as::<_, Size>(&format!(
            "DELETE FROM marquee.size WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        size.ok_or(RepositoryError::NotFound)
    }
}
