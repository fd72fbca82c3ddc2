//! Products and product categories.

use super::{Result, StoreError};
use crate::types::Money;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

/// A product row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProductRow {
    /// Primary key.
    pub id: i64,
    /// Owning category, if any.
    pub category_id: Option<i64>,
    /// Creating user, if any.
    pub created_by: Option<i64>,
    /// Display name.
    pub name: String,
    /// Long description.
    pub description: String,
    /// Unit price in cents.
    pub price_cents: Money,
    /// Relative media path.
    pub image: String,
    /// Active flag.
    pub status: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A product category row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProductCategoryRow {
    /// Primary key.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Active flag.
    pub status: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a product.
#[derive(Debug)]
pub struct NewProduct<'a> {
    /// Owning category, if any.
    pub category_id: Option<i64>,
    /// Creating user, if any.
    pub created_by: Option<i64>,
    /// Display name.
    pub name: &'a str,
    /// Long description.
    pub description: &'a str,
    /// Unit price in cents.
    pub price_cents: Money,
    /// Relative media path.
    pub image: &'a str,
}

/// Optional fields for a partial update.
#[derive(Debug, Default)]
pub struct ProductPatch {
    /// Replacement category.
    pub category_id: Option<i64>,
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement price in cents.
    pub price_cents: Option<Money>,
    /// Replacement media path.
    pub image: Option<String>,
}

/// List all products, newest first.
///
/// # Errors
///
/// Database failures only.
pub async fn list(pool: &PgPool) -> Result<Vec<ProductRow>> {
    let rows = sqlx::query_as::<_, ProductRow>(
        "SELECT * FROM products ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Fetch a product by id.
///
/// # Errors
///
/// [`StoreError::NotFound`] on a miss.
pub async fn fetch(pool: &PgPool, id: i64) -> Result<ProductRow> {
    sqlx::query_as::<_, ProductRow>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "Product",
            id,
        })
}

/// Insert a product.
///
/// # Errors
///
/// Database failures only.
pub async fn create(pool: &PgPool, product: NewProduct<'_>) -> Result<ProductRow> {
    let row = sqlx::query_as::<_, ProductRow>(
        "INSERT INTO products (category_id, created_by, name, description, price_cents, image)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(product.category_id)
    .bind(product.created_by)
    .bind(product.name)
    .bind(product.description)
    .bind(product.price_cents)
    .bind(product.image)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Apply a partial update; absent fields keep their stored values.
///
/// # Errors
///
/// [`StoreError::NotFound`] on a miss.
pub async fn update(pool: &PgPool, id: i64, patch: ProductPatch) -> Result<ProductRow> {
    sqlx::query_as::<_, ProductRow>(
        "UPDATE products
         SET category_id = COALESCE($2, category_id),
             name        = COALESCE($3, name),
             description = COALESCE($4, description),
             price_cents = COALESCE($5, price_cents),
             image       = COALESCE($6, image)
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(patch.category_id)
    .bind(patch.name)
    .bind(patch.description)
    .bind(patch.price_cents)
    .bind(patch.image)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::NotFound {
        entity: "Product",
        id,
    })
}

/// Flip a product's active flag.
///
/// # Errors
///
/// [`StoreError::NotFound`] on a miss.
pub async fn set_status(pool: &PgPool, id: i64, status: bool) -> Result<()> {
    let result = sqlx::query("UPDATE products SET status = $2 WHERE id = $1")
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound {
            entity: "Product",
            id,
        });
    }
    Ok(())
}

/// The unit price of a product, for cart total computation.
///
/// # Errors
///
/// [`StoreError::NotFound`] on a miss.
pub async fn unit_price(pool: &PgPool, id: i64) -> Result<Money> {
    let row: Option<(Money,)> = sqlx::query_as("SELECT price_cents FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(|(price,)| price).ok_or(StoreError::NotFound {
        entity: "Product",
        id,
    })
}

/// List all product categories.
///
/// # Errors
///
/// Database failures only.
pub async fn list_categories(pool: &PgPool) -> Result<Vec<ProductCategoryRow>> {
    let rows = sqlx::query_as::<_, ProductCategoryRow>(
        "SELECT * FROM product_categories ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Whether a category with this name already exists, ignoring case.
///
/// # Errors
///
/// Database failures only.
pub async fn category_name_exists(pool: &PgPool, name: &str) -> Result<bool> {
    let (exists,): (bool,) = sqlx::query_as(
        "SELECT EXISTS (SELECT 1 FROM product_categories WHERE lower(name) = lower($1))",
    )
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

/// Insert a product category.
///
/// # Errors
///
/// Database failures only.
pub async fn create_category(pool: &PgPool, name: &str) -> Result<ProductCategoryRow> {
    let row = sqlx::query_as::<_, ProductCategoryRow>(
        "INSERT INTO product_categories (name) VALUES ($1) RETURNING *",
    )
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Flip a category's active flag.
///
/// # Errors
///
/// [`StoreError::NotFound`] on a miss.
pub async fn set_category_status(pool: &PgPool, id: i64, status: bool) -> Result<()> {
    let result = sqlx::query("UPDATE product_categories SET status = $2 WHERE id = $1")
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound {
            entity: "Category",
            id,
        });
    }
    Ok(())
}
