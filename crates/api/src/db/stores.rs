//! Store repository.

use sqlx::PgPool;

use marquee_core::{StoreId, UserId};

use super::RepositoryError;
use crate::models::Store;

const COLUMNS: &str = "id, name, user_id, created_at, updated_at";

/// Repository for store (tenant) rows.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a store by ID, regardless of owner. Used by public reads.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: StoreId) -> Result<Option<Store>, RepositoryError> {
        let store = sqlx::query_as::<_, Store>(&format!(
            "SELECT {COLUMNS} FROM marquee.store WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(store)
    }

    /// Get a store by ID, scoped to its owner. Every admin mutation goes
    /// through this ownership check.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_owned(
        &self,
        id: StoreId,
        owner: &UserId,
    ) -> Result<Option<Store>, RepositoryError> {
        let store = sqlx::query_as::<_, Store>(&format!(
            "SELECT {COLUMNS} FROM marquee.store WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(self.pool)
        .await?;

        Ok(store)
    }

    /// Get a store by its (globally unique) name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Store>, RepositoryError> {
        let store = sqlx::query_as::<_, Store>(&format!(
            "SELECT {COLUMNS} FROM marquee.store WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(store)
    }

    /// Create a store owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, name: &str, owner: &UserId) -> Result<Store, RepositoryError> {
        let store = sqlx::query_as::<_, Store>(&format!(
            "INSERT INTO marquee.store (name, user_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        ))
        .bind(name)
        .bind(owner)
        .fetch_one(self.pool)
        .await?;

        Ok(store)
    }

    /// Rename a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no owned store matches.
    pub async fn rename(
        &self,
        id: StoreId,
        owner: &UserId,
        name: &str,
    ) -> Result<Store, RepositoryError> {
        let store = sqlx::query_as::<_, Store>(&format!(
            "UPDATE marquee.store SET name = $3, updated_at = now()
             WHERE id = $1 AND user_id = $2 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(owner)
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        store.ok_or(RepositoryError::NotFound)
    }

    /// Delete a store and (via cascades) everything it owns.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no owned store matches.
    pub async fn delete(&self, id: StoreId, owner: &UserId) -> Result<Store, RepositoryError> {
        let store = sqlx::query_as::<_, Store>(&format!(
            "DELETE FROM marquee.store WHERE id = $1 AND user_id = $2 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(self.pool)
        .await?;

        store.ok_or(RepositoryError::NotFound)
    }
}
