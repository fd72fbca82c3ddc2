//! Industries and industry tags.

use super::Result;
use serde::Serialize;
use sqlx::PgPool;

/// An industry row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct IndustryRow {
    /// Primary key.
    pub id: i64,
    /// Display name.
    pub name: String,
}

/// An industry tag row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct IndustryTagRow {
    /// Primary key.
    pub id: i64,
    /// Tagged industry.
    pub industry_id: i64,
    /// Tag label.
    pub tag: String,
}

/// List all industries.
///
/// # Errors
///
/// Database failures only.
pub async fn list(pool: &PgPool) -> Result<Vec<IndustryRow>> {
    let rows = sqlx::query_as::<_, IndustryRow>("SELECT * FROM industries ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Insert an industry.
///
/// # Errors
///
/// Database failures only.
pub async fn create(pool: &PgPool, name: &str) -> Result<IndustryRow> {
    let row =
        sqlx::query_as::<_, IndustryRow>("INSERT INTO industries (name) VALUES ($1) RETURNING *")
            .bind(name)
            .fetch_one(pool)
            .await?;
    Ok(row)
}

/// List all industry tags.
///
/// # Errors
///
/// Database failures only.
pub async fn list_tags(pool: &PgPool) -> Result<Vec<IndustryTagRow>> {
    let rows = sqlx::query_as::<_, IndustryTagRow>("SELECT * FROM industry_tags ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Insert an industry tag.
///
/// # Errors
///
/// Database failures only.
pub async fn create_tag(pool: &PgPool, industry_id: i64, tag: &str) -> Result<IndustryTagRow> {
    let row = sqlx::query_as::<_, IndustryTagRow>(
        "INSERT INTO industry_tags (industry_id, tag) VALUES ($1, $2) RETURNING *",
    )
    .bind(industry_id)
    .bind(tag)
    .fetch_one(pool)
    .await?;
    Ok(row)
}
