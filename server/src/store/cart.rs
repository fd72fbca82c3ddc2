//! Shopping cart rows.
//!
//! A cart row is a soft-stated line item: `active = TRUE` while it is
//! pending purchase, flipped to `FALSE` by removal or checkout. Rows are
//! never deleted, which leaves an incidental purchase history behind.

use super::{Result, StoreError};
use crate::types::{CartItemKind, Money};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

/// A cart row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CartItemRow {
    /// Primary key.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// "product" or "event".
    pub kind: String,
    /// Referenced product, when kind = "product".
    pub product_id: Option<i64>,
    /// Referenced event, when kind = "event".
    pub event_id: Option<i64>,
    /// Units of the referent.
    pub quantity: i32,
    /// Row total (unit price x quantity) in cents.
    pub total_amount_cents: Money,
    /// Live flag; FALSE once removed or purchased.
    pub active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// List every active cart row (the public cart read).
///
/// # Errors
///
/// Database failures only.
pub async fn list_active(pool: &PgPool) -> Result<Vec<CartItemRow>> {
    let rows = sqlx::query_as::<_, CartItemRow>(
        "SELECT * FROM cart_items WHERE active = TRUE ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// List one user's active cart rows.
///
/// # Errors
///
/// Database failures only.
pub async fn list_active_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<CartItemRow>> {
    let rows = sqlx::query_as::<_, CartItemRow>(
        "SELECT * FROM cart_items
         WHERE user_id = $1 AND active = TRUE
         ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Insert a cart row. The caller has already validated the referent and
/// computed the row total.
///
/// # Errors
///
/// Database failures only.
pub async fn insert(
    pool: &PgPool,
    user_id: i64,
    kind: CartItemKind,
    product_id: Option<i64>,
    event_id: Option<i64>,
    quantity: i32,
    total_amount_cents: Money,
) -> Result<CartItemRow> {
    let row = sqlx::query_as::<_, CartItemRow>(
        "INSERT INTO cart_items (user_id, kind, product_id, event_id, quantity, total_amount_cents)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(user_id)
    .bind(kind.as_str())
    .bind(product_id)
    .bind(event_id)
    .bind(quantity)
    .bind(total_amount_cents)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Fetch one of the caller's cart rows.
///
/// # Errors
///
/// [`StoreError::NotFound`] when the row does not exist or belongs to
/// someone else.
pub async fn fetch_for_user(pool: &PgPool, id: i64, user_id: i64) -> Result<CartItemRow> {
    sqlx::query_as::<_, CartItemRow>("SELECT * FROM cart_items WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "Cart item",
            id,
        })
}

/// Update the quantity (and recomputed total) of the caller's cart row.
///
/// # Errors
///
/// [`StoreError::NotFound`] when the row does not exist or belongs to
/// someone else.
pub async fn update_quantity(
    pool: &PgPool,
    id: i64,
    user_id: i64,
    quantity: i32,
    total_amount_cents: Money,
) -> Result<CartItemRow> {
    sqlx::query_as::<_, CartItemRow>(
        "UPDATE cart_items
         SET quantity = $3, total_amount_cents = $4
         WHERE id = $1 AND user_id = $2
         RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(quantity)
    .bind(total_amount_cents)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::NotFound {
        entity: "Cart item",
        id,
    })
}

/// Deactivate the caller's cart row.
///
/// Removal is idempotent: a row that is already inactive (or gone) affects
/// nothing and the call still succeeds.
///
/// # Errors
///
/// Database failures only.
pub async fn deactivate(pool: &PgPool, id: i64, user_id: i64) -> Result<()> {
    sqlx::query("UPDATE cart_items SET active = FALSE WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}
