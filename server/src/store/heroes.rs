//! Hero banners for the landing page.

use super::{Result, StoreError};
use serde::Serialize;
use sqlx::PgPool;

/// A hero banner row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct HeroRow {
    /// Primary key.
    pub id: i64,
    /// Relative media path.
    pub image: String,
    /// Headline.
    pub title: String,
    /// Secondary line.
    pub subtitle: String,
    /// Call-to-action label.
    pub button: String,
    /// Active flag.
    pub status: bool,
}

/// List all banners.
///
/// # Errors
///
/// Database failures only.
pub async fn list(pool: &PgPool) -> Result<Vec<HeroRow>> {
    let rows = sqlx::query_as::<_, HeroRow>("SELECT * FROM heroes ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Fetch a banner by id.
///
/// # Errors
///
/// [`StoreError::NotFound`] on a miss.
pub async fn fetch(pool: &PgPool, id: i64) -> Result<HeroRow> {
    sqlx::query_as::<_, HeroRow>("SELECT * FROM heroes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound { entity: "Hero", id })
}

/// Insert a banner.
///
/// # Errors
///
/// Database failures only.
pub async fn create(
    pool: &PgPool,
    image: &str,
    title: &str,
    subtitle: &str,
    button: &str,
) -> Result<HeroRow> {
    let row = sqlx::query_as::<_, HeroRow>(
        "INSERT INTO heroes (image, title, subtitle, button) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(image)
    .bind(title)
    .bind(subtitle)
    .bind(button)
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
    image: Option<String>,
    title: Option<String>,
    subtitle: Option<String>,
    button: Option<String>,
) -> Result<HeroRow> {
    sqlx::query_as::<_, HeroRow>(
        "UPDATE heroes
         SET image    = COALESCE($2, image),
             title    = COALESCE($3, title),
             subtitle = COALESCE($4, subtitle),
             button   = COALESCE($5, button)
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(image)
    .bind(title)
    .bind(subtitle)
    .bind(button)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::NotFound { entity: "Hero", id })
}

/// Flip a banner's active flag.
///
/// # Errors
///
/// [`StoreError::NotFound`] on a miss.
pub async fn set_status(pool: &PgPool, id: i64, status: bool) -> Result<()> {
    let result = sqlx::query("UPDATE heroes SET status = $2 WHERE id = $1")
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound { entity: "Hero", id });
    }
    Ok(())
}
