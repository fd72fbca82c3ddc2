//! Blog posts, categories, and comments.

use super::{Result, StoreError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

/// A blog post row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BlogRow {
    /// Primary key.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Body.
    pub content: String,
    /// Relative media path.
    pub image: String,
    /// Active flag.
    pub status: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A blog category row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BlogCategoryRow {
    /// Primary key.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Active flag.
    pub status: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A blog comment row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BlogCommentRow {
    /// Primary key.
    pub id: i64,
    /// Commented post.
    pub blog_id: i64,
    /// Comment body.
    pub comment: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// List all posts, newest first.
///
/// # Errors
///
/// Database failures only.
pub async fn list(pool: &PgPool) -> Result<Vec<BlogRow>> {
    let rows = sqlx::query_as::<_, BlogRow>("SELECT * FROM blogs ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Fetch a post by id.
///
/// # Errors
///
/// [`StoreError::NotFound`] on a miss.
pub async fn fetch(pool: &PgPool, id: i64) -> Result<BlogRow> {
    sqlx::query_as::<_, BlogRow>("SELECT * FROM blogs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound { entity: "Blog", id })
}

/// Insert a post.
///
/// # Errors
///
/// Database failures only.
pub async fn create(pool: &PgPool, title: &str, content: &str, image: &str) -> Result<BlogRow> {
    let row = sqlx::query_as::<_, BlogRow>(
        "INSERT INTO blogs (title, content, image) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(title)
    .bind(content)
    .bind(image)
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
    title: Option<String>,
    content: Option<String>,
    image: Option<String>,
) -> Result<BlogRow> {
    sqlx::query_as::<_, BlogRow>(
        "UPDATE blogs
         SET title   = COALESCE($2, title),
             content = COALESCE($3, content),
             image   = COALESCE($4, image)
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(title)
    .bind(content)
    .bind(image)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::NotFound { entity: "Blog", id })
}

/// Flip a post's active flag.
///
/// # Errors
///
/// [`StoreError::NotFound`] on a miss.
pub async fn set_status(pool: &PgPool, id: i64, status: bool) -> Result<()> {
    let result = sqlx::query("UPDATE blogs SET status = $2 WHERE id = $1")
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound { entity: "Blog", id });
    }
    Ok(())
}

/// List all blog categories.
///
/// # Errors
///
/// Database failures only.
pub async fn list_categories(pool: &PgPool) -> Result<Vec<BlogCategoryRow>> {
    let rows = sqlx::query_as::<_, BlogCategoryRow>(
        "SELECT * FROM blog_categories ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Insert a blog category.
///
/// # Errors
///
/// Database failures only.
pub async fn create_category(pool: &PgPool, name: &str) -> Result<BlogCategoryRow> {
    let row = sqlx::query_as::<_, BlogCategoryRow>(
        "INSERT INTO blog_categories (name) VALUES ($1) RETURNING *",
    )
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// List comments for one post, oldest first.
///
/// # Errors
///
/// Database failures only.
pub async fn list_comments(pool: &PgPool, blog_id: i64) -> Result<Vec<BlogCommentRow>> {
    let rows = sqlx::query_as::<_, BlogCommentRow>(
        "SELECT * FROM blog_comments WHERE blog_id = $1 ORDER BY created_at",
    )
    .bind(blog_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Insert a comment on a post.
///
/// # Errors
///
/// Database failures only.
pub async fn create_comment(pool: &PgPool, blog_id: i64, comment: &str) -> Result<BlogCommentRow> {
    let row = sqlx::query_as::<_, BlogCommentRow>(
        "INSERT INTO blog_comments (blog_id, comment) VALUES ($1, $2) RETURNING *",
    )
    .bind(blog_id)
    .bind(comment)
    .fetch_one(pool)
    .await?;
    Ok(row)
}
