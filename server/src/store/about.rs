//! About-page records.

use super::Result;
use serde::Serialize;
use sqlx::PgPool;

/// An about-page row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AboutRow {
    /// Primary key.
    pub id: i64,
    /// Section title.
    pub title: String,
    /// Section body.
    pub content: String,
}

/// List about-page records.
///
/// # Errors
///
/// Database failures only.
pub async fn list(pool: &PgPool) -> Result<Vec<AboutRow>> {
    let rows = sqlx::query_as::<_, AboutRow>("SELECT * FROM about_us ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Insert an about-page record.
///
/// # Errors
///
/// Database failures only.
pub async fn create(pool: &PgPool, title: &str, content: &str) -> Result<AboutRow> {
    let row = sqlx::query_as::<_, AboutRow>(
        "INSERT INTO about_us (title, content) VALUES ($1, $2) RETURNING *",
    )
    .bind(title)
    .bind(content)
    .fetch_one(pool)
    .await?;
    Ok(row)
}
