//! Events, event categories, and event comments.

use super::{Result, StoreError};
use crate::types::Money;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

/// An event row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct EventRow {
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
    /// Display date, free-form.
    pub date: String,
    /// Display time, free-form.
    pub time: String,
    /// Venue.
    pub location: String,
    /// Ticket price in cents.
    pub price_cents: Money,
    /// Relative media path.
    pub image: String,
    /// Display duration, free-form.
    pub duration: String,
    /// Organizer contact name.
    pub contact_name: String,
    /// Organizer contact number.
    pub contact_number: String,
    /// Active flag.
    pub status: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// An event category row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct EventCategoryRow {
    /// Primary key.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Active flag.
    pub status: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// An event comment row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct EventCommentRow {
    /// Primary key.
    pub id: i64,
    /// Commented event.
    pub event_id: i64,
    /// Comment body.
    pub comment: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Fields for creating an event.
#[derive(Debug)]
pub struct NewEvent {
    /// Owning category, if any.
    pub category_id: Option<i64>,
    /// Creating user, if any.
    pub created_by: Option<i64>,
    /// Display name.
    pub name: String,
    /// Long description.
    pub description: String,
    /// Display date, free-form.
    pub date: String,
    /// Display time, free-form.
    pub time: String,
    /// Venue.
    pub location: String,
    /// Ticket price in cents.
    pub price_cents: Money,
    /// Relative media path.
    pub image: String,
    /// Display duration, free-form.
    pub duration: String,
    /// Organizer contact name.
    pub contact_name: String,
    /// Organizer contact number.
    pub contact_number: String,
}

/// Optional fields for a partial update.
#[derive(Debug, Default)]
pub struct EventPatch {
    /// Replacement category.
    pub category_id: Option<i64>,
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement date.
    pub date: Option<String>,
    /// Replacement time.
    pub time: Option<String>,
    /// Replacement venue.
    pub location: Option<String>,
    /// Replacement price in cents.
    pub price_cents: Option<Money>,
    /// Replacement media path.
    pub image: Option<String>,
    /// Replacement duration.
    pub duration: Option<String>,
    /// Replacement contact name.
    pub contact_name: Option<String>,
    /// Replacement contact number.
    pub contact_number: Option<String>,
}

/// List all events, newest first.
///
/// # Errors
///
/// Database failures only.
pub async fn list(pool: &PgPool) -> Result<Vec<EventRow>> {
    let rows = sqlx::query_as::<_, EventRow>("SELECT * FROM events ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Fetch an event by id.
///
/// # Errors
///
/// [`StoreError::NotFound`] on a miss.
pub async fn fetch(pool: &PgPool, id: i64) -> Result<EventRow> {
    sqlx::query_as::<_, EventRow>("SELECT * FROM events WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound { entity: "Event", id })
}

/// Insert an event.
///
/// # Errors
///
/// Database failures only.
pub async fn create(pool: &PgPool, event: NewEvent) -> Result<EventRow> {
    let row = sqlx::query_as::<_, EventRow>(
        "INSERT INTO events (category_id, created_by, name, description, date, time, location,
                             price_cents, image, duration, contact_name, contact_number)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
         RETURNING *",
    )
    .bind(event.category_id)
    .bind(event.created_by)
    .bind(event.name)
    .bind(event.description)
    .bind(event.date)
    .bind(event.time)
    .bind(event.location)
    .bind(event.price_cents)
    .bind(event.image)
    .bind(event.duration)
    .bind(event.contact_name)
    .bind(event.contact_number)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Apply a partial update; absent fields keep their stored values.
///
/// # Errors
///
/// [`StoreError::NotFound`] on a miss.
pub async fn update(pool: &PgPool, id: i64, patch: EventPatch) -> Result<EventRow> {
    sqlx::query_as::<_, EventRow>(
        "UPDATE events
         SET category_id    = COALESCE($2, category_id),
             name           = COALESCE($3, name),
             description    = COALESCE($4, description),
             date           = COALESCE($5, date),
             time           = COALESCE($6, time),
             location       = COALESCE($7, location),
             price_cents    = COALESCE($8, price_cents),
             image          = COALESCE($9, image),
             duration       = COALESCE($10, duration),
             contact_name   = COALESCE($11, contact_name),
             contact_number = COALESCE($12, contact_number)
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(patch.category_id)
    .bind(patch.name)
    .bind(patch.description)
    .bind(patch.date)
    .bind(patch.time)
    .bind(patch.location)
    .bind(patch.price_cents)
    .bind(patch.image)
    .bind(patch.duration)
    .bind(patch.contact_name)
    .bind(patch.contact_number)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::NotFound { entity: "Event", id })
}

/// Flip an event's active flag.
///
/// # Errors
///
/// [`StoreError::NotFound`] on a miss.
pub async fn set_status(pool: &PgPool, id: i64, status: bool) -> Result<()> {
    let result = sqlx::query("UPDATE events SET status = $2 WHERE id = $1")
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound { entity: "Event", id });
    }
    Ok(())
}

/// The ticket price of an event, for cart total computation.
///
/// # Errors
///
/// [`StoreError::NotFound`] on a miss.
pub async fn unit_price(pool: &PgPool, id: i64) -> Result<Money> {
    let row: Option<(Money,)> = sqlx::query_as("SELECT price_cents FROM events WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(|(price,)| price).ok_or(StoreError::NotFound { entity: "Event", id })
}

/// List all event categories.
///
/// # Errors
///
/// Database failures only.
pub async fn list_categories(pool: &PgPool) -> Result<Vec<EventCategoryRow>> {
    let rows = sqlx::query_as::<_, EventCategoryRow>(
        "SELECT * FROM event_categories ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Insert an event category.
///
/// # Errors
///
/// Database failures only.
pub async fn create_category(pool: &PgPool, name: &str) -> Result<EventCategoryRow> {
    let row = sqlx::query_as::<_, EventCategoryRow>(
        "INSERT INTO event_categories (name) VALUES ($1) RETURNING *",
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
    let result = sqlx::query("UPDATE event_categories SET status = $2 WHERE id = $1")
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

/// List comments for one event, oldest first.
///
/// # Errors
///
/// Database failures only.
pub async fn list_comments(pool: &PgPool, event_id: i64) -> Result<Vec<EventCommentRow>> {
    let rows = sqlx::query_as::<_, EventCommentRow>(
        "SELECT * FROM event_comments WHERE event_id = $1 ORDER BY created_at",
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Insert a comment on an event.
///
/// # Errors
///
/// Database failures only.
pub async fn create_comment(pool: &PgPool, event_id: i64, comment: &str) -> Result<EventCommentRow> {
    let row = sqlx::query_as::<_, EventCommentRow>(
        "INSERT INTO event_comments (event_id, comment) VALUES ($1, $2) RETURNING *",
    )
    .bind(event_id)
    .bind(comment)
    .fetch_one(pool)
    .await?;
    Ok(row)
}
