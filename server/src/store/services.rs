//! Services, service tags, and service categories.

use super::{Result, StoreError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

/// A service row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ServiceRow {
    /// Primary key.
    pub id: i64,
    /// Creating user, if any.
    pub created_by: Option<i64>,
    /// Display name.
    pub name: String,
    /// Long description.
    pub description: String,
    /// Relative media path.
    pub image: String,
    /// Display price, free-form (e.g. "$99/mo").
    pub price: String,
    /// Active flag.
    pub status: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A service tag row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ServiceTagRow {
    /// Primary key.
    pub id: i64,
    /// Tagged service.
    pub service_id: i64,
    /// Tag label.
    pub tag: String,
}

/// A service category row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ServiceCategoryRow {
    /// Primary key.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Active flag.
    pub status: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// List all services, newest first.
///
/// # Errors
///
/// Database failures only.
pub async fn list(pool: &PgPool) -> Result<Vec<ServiceRow>> {
    let rows = sqlx::query_as::<_, ServiceRow>("SELECT * FROM services ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Fetch a service by id.
///
/// # Errors
///
/// [`StoreError::NotFound`] on a miss.
pub async fn fetch(pool: &PgPool, id: i64) -> Result<ServiceRow> {
    sqlx::query_as::<_, ServiceRow>("SELECT * FROM services WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "Service",
            id,
        })
}

/// Insert a service.
///
/// # Errors
///
/// Database failures only.
pub async fn create(
    pool: &PgPool,
    created_by: Option<i64>,
    name: &str,
    description: &str,
    image: &str,
    price: &str,
) -> Result<ServiceRow> {
    let row = sqlx::query_as::<_, ServiceRow>(
        "INSERT INTO services (created_by, name, description, image, price)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *",
    )
    .bind(created_by)
    .bind(name)
    .bind(description)
    .bind(image)
    .bind(price)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Apply a partial update; absent fields keep their stored values.
///
/// # Errors
///
/// [`StoreError::NotFound`] on a miss.
pub async fn update(
    pool: &PgPool,
    id: i64,
    name: Option<String>,
    description: Option<String>,
    image: Option<String>,
    price: Option<String>,
) -> Result<ServiceRow> {
    sqlx::query_as::<_, ServiceRow>(
        "UPDATE services
         SET name        = COALESCE($2, name),
             description = COALESCE($3, description),
             image       = COALESCE($4, image),
             price       = COALESCE($5, price)
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(image)
    .bind(price)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::NotFound {
        entity: "Service",
        id,
    })
}

/// Flip a service's active flag.
///
/// # Errors
///
/// [`StoreError::NotFound`] on a miss.
pub async fn set_status(pool: &PgPool, id: i64, status: bool) -> Result<()> {
    let result = sqlx::query("UPDATE services SET status = $2 WHERE id = $1")
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound {
            entity: "Service",
            id,
        });
    }
    Ok(())
}

/// List all service tags.
///
/// # Errors
///
/// Database failures only.
pub async fn list_tags(pool: &PgPool) -> Result<Vec<ServiceTagRow>> {
    let rows = sqlx::query_as::<_, ServiceTagRow>("SELECT * FROM service_tags ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Insert a service tag.
///
/// # Errors
///
/// Database failures only.
pub async fn create_tag(pool: &PgPool, service_id: i64, tag: &str) -> Result<ServiceTagRow> {
    let row = sqlx::query_as::<_, ServiceTagRow>(
        "INSERT INTO service_tags (service_id, tag) VALUES ($1, $2) RETURNING *",
    )
    .bind(service_id)
    .bind(tag)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// List all service categories.
///
/// # Errors
///
/// Database failures only.
pub async fn list_categories(pool: &PgPool) -> Result<Vec<ServiceCategoryRow>> {
    let rows = sqlx::query_as::<_, ServiceCategoryRow>(
        "SELECT * FROM service_categories ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Insert a service category.
///
/// # Errors
///
/// Database failures only.
pub async fn create_category(pool: &PgPool, name: &str) -> Result<ServiceCategoryRow> {
    let row = sqlx::query_as::<_, ServiceCategoryRow>(
        "INSERT INTO service_categories (name) VALUES ($1) RETURNING *",
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
    let result = sqlx::query("UPDATE service_categories SET status = $2 WHERE id = $1")
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
