//! Product repository.
//!
//! Products carry their images plus the category, size, and color they are
//! tagged with. List and detail reads return the hydrated
//! [`ProductDetail`] shape; writes replace the image set wholesale inside a
//! transaction.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use marquee_core::{CategoryId, ColorId, Price, ProductId, SizeId, StoreId};

use super::RepositoryError;
use crate::models::{Category, Color, Product, ProductDetail, ProductImage, Size};

const COLUMNS: &str = "id, store_id, category_id, size_id, color_id, name, price, \
                       is_featured, is_archived, created_at, updated_at";

/// Optional storefront filters applied to product listings.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category_id: Option<CategoryId>,
    pub size_id: Option<SizeId>,
    pub color_id: Option<ColorId>,
    pub is_featured: Option<bool>,
    pub is_archived: Option<bool>,
}

pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products for a store with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if a related row is missing.
    pub async fn list(
        &self,
        store_id: StoreId,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductDetail>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM marquee.product
             WHERE store_id = $1
               AND ($2::uuid IS NULL OR category_id = $2)
               AND ($3::uuid IS NULL OR size_id = $3)
               AND ($4::uuid IS NULL OR color_id = $4)
               AND ($5::boolean IS NULL OR is_featured = $5)
               AND ($6::boolean IS NULL OR is_archived = $6)
             ORDER BY created_at DESC"
        ))
        .bind(store_id)
        .bind(filter.category_id)
        .bind(filter.size_id)
        .bind(filter.color_id)
        .bind(filter.is_featured)
        .bind(filter.is_archived)
        .fetch_all(self.pool)
        .await?;

        self.hydrate(products).await
    }

    /// Get a single product with its images and related entities.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if a related row is missing.
    pub async fn find_detail(
        &self,
        id: ProductId,
    ) -> Result<Option<ProductDetail>, RepositoryError> {
        let Some(product) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut details = self.hydrate(vec![product]).await?;
        Ok(details.pop())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM marquee.product WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM marquee.product WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Fetch the products matching the given IDs. Duplicate input IDs yield
    /// one row each; unknown IDs are silently absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| id.as_uuid()).collect();
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM marquee.product WHERE id = ANY($1)"
        ))
        .bind(uuids)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Create a product and its images in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        store_id: StoreId,
        category_id: CategoryId,
        size_id: SizeId,
        color_id: ColorId,
        name: &str,
        price: Price,
        image_urls: &[String],
        is_featured: bool,
        is_archived: bool,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO marquee.product
                 (store_id, category_id, size_id, color_id, name, price,
                  is_featured, is_archived)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {COLUMNS}"
        ))
        .bind(store_id)
        .bind(category_id)
        .bind(size_id)
        .bind(color_id)
        .bind(name)
        .bind(price)
        .bind(is_featured)
        .bind(is_archived)
        .fetch_one(&mut *tx)
        .await?;

        insert_images(&mut tx, product.id, image_urls).await?;

        tx.commit().await?;
        Ok(product)
    }

    /// Update a product, replacing its image set.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product matches.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: ProductId,
        category_id: CategoryId,
        size_id: SizeId,
        color_id: ColorId,
        name: &str,
        price: Price,
        image_urls: &[String],
        is_featured: bool,
        is_archived: bool,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE marquee.product
             SET category_id = $2, size_id = $3, color_id = $4, name = $5,
                 price = $6, is_featured = $7, is_archived = $8, updated_at = now()
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(category_id)
        .bind(size_id)
        .bind(color_id)
        .bind(name)
        .bind(price)
        .bind(is_featured)
        .bind(is_archived)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        sqlx::query("DELETE FROM marquee.product_image WHERE product_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_images(&mut tx, id, image_urls).await?;

        tx.commit().await?;
        Ok(product)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product matches.
    pub async fn delete(&self, id: ProductId) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "DELETE FROM marquee.product WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        product.ok_or(RepositoryError::NotFound)
    }

    /// Mark the given products as archived. Called after a successful sale.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn archive_all(&self, ids: &[ProductId]) -> Result<u64, RepositoryError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| id.as_uuid()).collect();
        let result = sqlx::query(
            "UPDATE marquee.product SET is_archived = true, updated_at = now()
             WHERE id = ANY($1)",
        )
        .bind(uuids)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Attach images and related entities to bare product rows.
    async fn hydrate(
        &self,
        products: Vec<Product>,
    ) -> Result<Vec<ProductDetail>, RepositoryError> {
        if products.is_empty() {
            return Ok(Vec::new());
        }

        let product_ids: Vec<Uuid> = products.iter().map(|p| p.id.as_uuid()).collect();
        let images = sqlx::query_as::<_, ProductImage>(
            "SELECT id, product_id, url, created_at FROM marquee.product_image
             WHERE product_id = ANY($1) ORDER BY created_at",
        )
        .bind(product_ids)
        .fetch_all(self.pool)
        .await?;

        let mut images_by_product: HashMap<ProductId, Vec<ProductImage>> = HashMap::new();
        for image in images {
            images_by_product
                .entry(image.product_id)
                .or_default()
                .push(image);
        }

        let category_ids: Vec<Uuid> = products.iter().map(|p| p.category_id.as_uuid()).collect();
        let size_ids: Vec<Uuid> = products.iter().map(|p| p.size_id.as_uuid()).collect();
        let color_ids: Vec<Uuid> = products.iter().map(|p| p.color_id.as_uuid()).collect();

        let categories: HashMap<CategoryId, Category> = sqlx::query_as::<_, Category>(
            "SELECT id, store_id, billboard_id, name, created_at, updated_at
             FROM marquee.category WHERE id = ANY($1)",
        )
        .bind(category_ids)
        .fetch_all(self.pool)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

        let sizes: HashMap<SizeId, Size> = sqlx::query_as::<_, Size>(
            "SELECT id, store_id, name, value, created_at, updated_at
             FROM marquee.size WHERE id = ANY($1)",
        )
        .bind(size_ids)
        .fetch_all(self.pool)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

        let colors: HashMap<ColorId, Color> = sqlx::query_as::<_, Color>(
            "SELECT id, store_id, name, value, created_at, updated_at
             FROM marquee.color WHERE id = ANY($1)",
        )
        .bind(color_ids)
        .fetch_all(self.pool)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

        products
            .into_iter()
            .map(|product| {
                let category = categories.get(&product.category_id).cloned().ok_or_else(|| {
                    RepositoryError::DataCorruption(format!(
                        "product {} references missing category {}",
                        product.id, product.category_id
                    ))
                })?;
                let size = sizes.get(&product.size_id).cloned().ok_or_else(|| {
                    RepositoryError::DataCorruption(format!(
                        "product {} references missing size {}",
                        product.id, product.size_id
                    ))
                })?;
                let color = colors.get(&product.color_id).cloned().ok_or_else(|| {
                    RepositoryError::DataCorruption(format!(
                        "product {} references missing color {}",
                        product.id, product.color_id
                    ))
                })?;
                let images = images_by_product.remove(&product.id).unwrap_or_default();

                Ok(ProductDetail {
                    product,
                    images,
                    category,
                    size,
                    color,
                })
            })
            .collect()
    }
}

async fn insert_images(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    product_id: ProductId,
    urls: &[String],
) -> Result<(), RepositoryError> {
    if urls.is_empty() {
        return Ok(());
    }

    sqlx::query(
        "INSERT INTO marquee.product_image (product_id, url)
         SELECT $1, unnest($2::text[])",
    )
    .bind(product_id)
    .bind(urls)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
