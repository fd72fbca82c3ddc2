//! Case studies, categories, and comments.

use super::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

/// A case study row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CaseStudyRow {
    /// Primary key.
    pub id: i64,
    /// Owning category.
    pub category_id: i64,
    /// Title.
    pub title: String,
    /// Body.
    pub content: String,
}

/// A case study category row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CaseStudyCategoryRow {
    /// Primary key.
    pub id: i64,
    /// Display name.
    pub name: String,
}

/// A case study comment row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CaseStudyCommentRow {
    /// Primary key.
    pub id: i64,
    /// Commented case study.
    pub case_study_id: i64,
    /// Comment body.
    pub comment: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// List all case studies.
///
/// # Errors
///
/// Database failures only.
pub async fn list(pool: &PgPool) -> Result<Vec<CaseStudyRow>> {
    let rows = sqlx::query_as::<_, CaseStudyRow>("SELECT * FROM case_studies ORDER BY id DESC")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Insert a case study.
///
/// # Errors
///
/// Database failures only.
pub async fn create(
    pool: &PgPool,
    category_id: i64,
    title: &str,
    content: &str,
) -> Result<CaseStudyRow> {
    let row = sqlx::query_as::<_, CaseStudyRow>(
        "INSERT INTO case_studies (category_id, title, content) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(category_id)
    .bind(title)
    .bind(content)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// List all case study categories.
///
/// # Errors
///
/// Database failures only.
pub async fn list_categories(pool: &PgPool) -> Result<Vec<CaseStudyCategoryRow>> {
    let rows = sqlx::query_as::<_, CaseStudyCategoryRow>(
        "SELECT * FROM case_study_categories ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Insert a case study category.
///
/// # Errors
///
/// Database failures only.
pub async fn create_category(pool: &PgPool, name: &str) -> Result<CaseStudyCategoryRow> {
    let row = sqlx::query_as::<_, CaseStudyCategoryRow>(
        "INSERT INTO case_study_categories (name) VALUES ($1) RETURNING *",
    )
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// List all case study comments.
///
/// # Errors
///
/// Database failures only.
pub async fn list_comments(pool: &PgPool) -> Result<Vec<CaseStudyCommentRow>> {
    let rows = sqlx::query_as::<_, CaseStudyCommentRow>(
        "SELECT * FROM case_study_comments ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Insert a case study comment.
///
/// # Errors
///
/// Database failures only.
pub async fn create_comment(
    pool: &PgPool,
    case_study_id: i64,
    comment: &str,
) -> Result<CaseStudyCommentRow> {
    let row = sqlx::query_as::<_, CaseStudyCommentRow>(
        "INSERT INTO case_study_comments (case_study_id, comment) VALUES ($1, $2) RETURNING *",
    )
    .bind(case_study_id)
    .bind(comment)
    .fetch_one(pool)
    .await?;
    Ok(row)
}
