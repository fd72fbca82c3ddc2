//! News articles, categories, comments, and newsletter subscriptions.

use super::{on_unique_violation, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

/// A news article row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct NewsRow {
    /// Primary key.
    pub id: i64,
    /// Owning category.
    pub category_id: i64,
    /// Headline.
    pub title: String,
    /// Body.
    pub content: String,
}

/// A news category row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct NewsCategoryRow {
    /// Primary key.
    pub id: i64,
    /// Display name.
    pub name: String,
}

/// A news comment row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct NewsCommentRow {
    /// Primary key.
    pub id: i64,
    /// Commented article.
    pub news_id: i64,
    /// Comment body.
    pub comment: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A newsletter subscriber row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct NewsletterSubscriberRow {
    /// Primary key.
    pub id: i64,
    /// Subscriber e-mail, unique.
    pub email: String,
    /// Subscription timestamp.
    pub subscribed_at: DateTime<Utc>,
}

/// List all articles.
///
/// # Errors
///
/// Database failures only.
pub async fn list(pool: &PgPool) -> Result<Vec<NewsRow>> {
    let rows = sqlx::query_as::<_, NewsRow>("SELECT * FROM news ORDER BY id DESC")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Insert an article.
///
/// # Errors
///
/// Database failures only.
pub async fn create(pool: &PgPool, category_id: i64, title: &str, content: &str) -> Result<NewsRow> {
    let row = sqlx::query_as::<_, NewsRow>(
        "INSERT INTO news (category_id, title, content) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(category_id)
    .bind(title)
    .bind(content)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// List all news categories.
///
/// # Errors
///
/// Database failures only.
pub async fn list_categories(pool: &PgPool) -> Result<Vec<NewsCategoryRow>> {
    let rows = sqlx::query_as::<_, NewsCategoryRow>("SELECT * FROM news_categories ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Insert a news category.
///
/// # Errors
///
/// Database failures only.
pub async fn create_category(pool: &PgPool, name: &str) -> Result<NewsCategoryRow> {
    let row = sqlx::query_as::<_, NewsCategoryRow>(
        "INSERT INTO news_categories (name) VALUES ($1) RETURNING *",
    )
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// List all news comments.
///
/// # Errors
///
/// Database failures only.
pub async fn list_comments(pool: &PgPool) -> Result<Vec<NewsCommentRow>> {
    let rows =
        sqlx::query_as::<_, NewsCommentRow>("SELECT * FROM news_comments ORDER BY created_at")
            .fetch_all(pool)
            .await?;
    Ok(rows)
}

/// Insert a news comment.
///
/// # Errors
///
/// Database failures only.
pub async fn create_comment(pool: &PgPool, news_id: i64, comment: &str) -> Result<NewsCommentRow> {
    let row = sqlx::query_as::<_, NewsCommentRow>(
        "INSERT INTO news_comments (news_id, comment) VALUES ($1, $2) RETURNING *",
    )
    .bind(news_id)
    .bind(comment)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// List newsletter subscribers.
///
/// # Errors
///
/// Database failures only.
pub async fn list_subscribers(pool: &PgPool) -> Result<Vec<NewsletterSubscriberRow>> {
    let rows = sqlx::query_as::<_, NewsletterSubscriberRow>(
        "SELECT * FROM newsletter_subscribers ORDER BY subscribed_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Subscribe an e-mail address.
///
/// # Errors
///
/// [`super::StoreError::Duplicate`] when the address is already subscribed.
pub async fn create_subscriber(pool: &PgPool, email: &str) -> Result<NewsletterSubscriberRow> {
    sqlx::query_as::<_, NewsletterSubscriberRow>(
        "INSERT INTO newsletter_subscribers (email) VALUES ($1) RETURNING *",
    )
    .bind(email)
    .fetch_one(pool)
    .await
    .map_err(|e| on_unique_violation(e, "Newsletter subscription", "email"))
}
