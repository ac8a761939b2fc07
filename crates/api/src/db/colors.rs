//! Color repository.

use sqlx::PgPool;

use marquee_core::{ColorId, StoreId};

use super::RepositoryError;
use crate::models::Color;

const COLUMNS: &str = "id, store_id, name, value, created_at, updated_at";

pub struct ColorRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ColorRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List colors for a store, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, store_id: StoreId) -> Result<Vec<Color>, RepositoryError> {
        let colors = sqlx::query_as::<_, Color>(&format!(
            "SELECT {COLUMNS} FROM marquee.color
             WHERE store_id = $1 ORDER BY created_at DESC"
        ))
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(colors)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: ColorId) -> Result<Option<Color>, RepositoryError> {
        let color = sqlx::query_as::<_, Color>(&format!(
            "SELECT {COLUMNS} FROM marquee.color WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(color)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Color>, RepositoryError> {
        let color = sqlx::query_as::<_, Color>(&format!(
            "SELECT {COLUMNS} FROM marquee.color WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(color)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        store_id: StoreId,
        name: &str,
        value: &str,
    ) -> Result<Color, RepositoryError> {
        let color = sqlx::query_as::<_, Color>(&format!(
            "INSERT INTO marquee.color (store_id, name, value)
             VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        ))
        .bind(store_id)
        .bind(name)
        .bind(value)
        .fetch_one(self.pool)
        .await?;

        Ok(color)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no color matches.
    pub async fn update(
        &self,
        id: ColorId,
        name: &str,
        value: &str,
    ) -> Result<Color, RepositoryError> {
        let color = sqlx::query_as::<_, Color>(&format!(
            "UPDATE marquee.color SET name = $2, value = $3, updated_at = now()
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(value)
        .fetch_optional(self.pool)
        .await?;

        color.ok_or(RepositoryError::NotFound)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no color matches.
    pub async fn delete(&self, id: ColorId) -> Result<Color, RepositoryError> {
        let color = sqlx::query_as::<_, Color>(&format!(
            "DELETE FROM marquee.color WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        color.ok_or(RepositoryError::NotFound)
    }
}
