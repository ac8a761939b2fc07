//! Seed the database with a demo store and a small catalog.
//!
//! Intended for local development; running it twice creates a second store
//! only if the name is free, otherwise the unique constraint stops it.

use rust_decimal::Decimal;

use marquee_core::{BillboardId, CategoryId, ColorId, ProductId, SizeId, StoreId};

use super::CommandError;

/// Insert a demo store owned by `owner` with one billboard, one category,
/// two sizes, two colors, and two products with images.
///
/// # Errors
///
/// Returns `CommandError` if any insert fails.
pub async fn run(owner: &str) -> Result<(), CommandError> {
    let pool = super::connect().await?;
    let mut tx = pool.begin().await?;

    let store_id: StoreId = sqlx::query_scalar(
        "INSERT INTO marquee.store (name, user_id) VALUES ($1, $2) RETURNING id",
    )
    .bind("Demo Store")
    .bind(owner)
    .fetch_one(&mut *tx)
    .await?;

    let billboard_id: BillboardId = sqlx::query_scalar(
        "INSERT INTO marquee.billboard (store_id, label, image_url)
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(store_id)
    .bind("Summer Collection")
    .bind("https://images.example.com/billboards/summer.jpg")
    .fetch_one(&mut *tx)
    .await?;

    let category_id: CategoryId = sqlx::query_scalar(
        "INSERT INTO marquee.category (store_id, billboard_id, name)
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(store_id)
    .bind(billboard_id)
    .bind("T-Shirts")
    .fetch_one(&mut *tx)
    .await?;

    let size_medium = insert_size(&mut tx, store_id, "Medium", "M").await?;
    let size_large = insert_size(&mut tx, store_id, "Large", "L").await?;
    let color_black = insert_color(&mut tx, store_id, "Black", "#000000").await?;
    let color_white = insert_color(&mut tx, store_id, "White", "#FFFFFF").await?;

    let products = [
        ("Classic Tee", Decimal::new(1999, 2), size_medium, color_black, true),
        ("Heavyweight Tee", Decimal::new(2950, 2), size_large, color_white, false),
    ];

    for (name, price, size_id, color_id, is_featured) in products {
        let product_id: ProductId = sqlx::query_scalar(
            "INSERT INTO marquee.product
                 (store_id, category_id, size_id, color_id, name, price, is_featured)
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
        )
        .bind(store_id)
        .bind(category_id)
        .bind(size_id)
        .bind(color_id)
        .bind(name)
        .bind(price)
        .bind(is_featured)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO marquee.product_image (product_id, url) VALUES ($1, $2)",
        )
        .bind(product_id)
        .bind(format!(
            "https://images.example.com/products/{}.jpg",
            name.to_lowercase().replace(' ', "-")
        ))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    tracing::info!(store_id = %store_id, "Demo store seeded");
    Ok(())
}

async fn insert_size(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    store_id: StoreId,
    name: &str,
    value: &str,
) -> Result<SizeId, CommandError> {
    let id = sqlx::query_scalar(
        "INSERT INTO marquee.size (store_id, name, value)
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(store_id)
    .bind(name)
    .bind(value)
    .fetch_one(&mut **tx)
    .await?;
    Ok(id)
}

async fn insert_color(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    store_id: StoreId,
    name: &str,
    value: &str,
) -> Result<ColorId, CommandError> {
    let id = sqlx::query_scalar(
        "INSERT INTO marquee.color (store_id, name, value)
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(store_id)
    .bind(name)
    .bind(value)
    .fetch_one(&mut **tx)
    .await?;
    Ok(id)
}
