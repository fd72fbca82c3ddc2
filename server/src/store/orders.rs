//! Orders, order items, and the checkout transaction.

use super::{Result, StoreError};
use crate::types::{mint_order_ref, mint_payment_ref, Money, OrderLineRef};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

/// An order row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderRow {
    /// Primary key.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Immutable aggregate total in cents.
    pub total_amount_cents: Money,
    /// Payment status; checkout writes "paid".
    pub payment_status: String,
    /// Fulfilment status; "processing" at creation.
    pub status: String,
    /// Externally-visible order reference.
    pub order_ref: String,
    /// Externally-visible payment reference.
    pub payment_ref: String,
    /// Checkout timestamp.
    pub created_at: DateTime<Utc>,
}

/// An order line row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderItemRow {
    /// Primary key.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Parent order.
    pub order_id: i64,
    /// Referenced product or event id.
    pub item_id: i64,
    /// Kind discriminant: 1 = product, 2 = event.
    pub kind: i16,
    /// Units purchased.
    pub quantity: i32,
}

impl OrderItemRow {
    /// The typed reference this row encodes, if the discriminant is valid.
    #[must_use]
    pub const fn line_ref(&self) -> Option<OrderLineRef> {
        OrderLineRef::from_parts(self.kind, self.item_id)
    }
}

/// What checkout hands back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSummary {
    /// Internal id of the new order.
    pub order_id: i64,
    /// Externally-visible order reference.
    pub order_ref: String,
    /// Externally-visible payment reference.
    pub payment_ref: String,
    /// Aggregate total in cents.
    pub total_amount_cents: Money,
}

/// The slice of a cart row checkout needs.
#[derive(Debug, sqlx::FromRow)]
struct CartLine {
    id: i64,
    product_id: Option<i64>,
    event_id: Option<i64>,
    quantity: i32,
    total_amount_cents: Money,
}

impl CartLine {
    const fn line_ref(&self) -> Option<OrderLineRef> {
        match (self.product_id, self.event_id) {
            (Some(product_id), None) => Some(OrderLineRef::Product(product_id)),
            (None, Some(event_id)) => Some(OrderLineRef::Event(event_id)),
            _ => None,
        }
    }
}

/// Convert the caller's active cart into an order, atomically.
///
/// Inside one transaction: lock and read the active cart rows
/// (`FOR UPDATE`, which serializes concurrent checkouts by the same user),
/// sum the stored row totals, insert the order with freshly minted
/// references and a "paid" payment status, bulk-insert one order item per
/// cart row, and deactivate the cart rows. Any failure rolls the whole
/// thing back.
///
/// # Errors
///
/// [`StoreError::EmptyCart`] when no active rows exist — including when a
/// concurrent checkout consumed them first; database failures otherwise.
pub async fn checkout(pool: &PgPool, user_id: i64) -> Result<CheckoutSummary> {
    let mut tx = pool.begin().await?;

    let lines: Vec<CartLine> = sqlx::query_as(
        "SELECT id, product_id, event_id, quantity, total_amount_cents
         FROM cart_items
         WHERE user_id = $1 AND active = TRUE
         FOR UPDATE",
    )
    .bind(user_id)
    .fetch_all(&mut *tx)
    .await?;

    if lines.is_empty() {
        // Dropping the transaction rolls it back.
        return Err(StoreError::EmptyCart);
    }

    let total: Money = lines.iter().map(|l| l.total_amount_cents).sum();
    let order_ref = mint_order_ref();
    let payment_ref = mint_payment_ref();

    let (order_id,): (i64,) = sqlx::query_as(
        "INSERT INTO orders (user_id, total_amount_cents, payment_status, order_ref, payment_ref)
         VALUES ($1, $2, 'paid', $3, $4)
         RETURNING id",
    )
    .bind(user_id)
    .bind(total)
    .bind(&order_ref)
    .bind(&payment_ref)
    .fetch_one(&mut *tx)
    .await?;

    let mut item_ids = Vec::with_capacity(lines.len());
    let mut kinds = Vec::with_capacity(lines.len());
    let mut quantities = Vec::with_capacity(lines.len());
    for line in &lines {
        let line_ref = line
            .line_ref()
            .ok_or(StoreError::CorruptCartRow { id: line.id })?;
        item_ids.push(line_ref.item_id());
        kinds.push(line_ref.kind_code());
        quantities.push(line.quantity);
    }

    sqlx::query(
        "INSERT INTO order_items (user_id, order_id, item_id, kind, quantity)
         SELECT $1, $2, item_id, kind, quantity
         FROM UNNEST($3::bigint[], $4::smallint[], $5::int[]) AS t(item_id, kind, quantity)",
    )
    .bind(user_id)
    .bind(order_id)
    .bind(&item_ids)
    .bind(&kinds)
    .bind(&quantities)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE cart_items SET active = FALSE WHERE user_id = $1 AND active = TRUE")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(CheckoutSummary {
        order_id,
        order_ref,
        payment_ref,
        total_amount_cents: total,
    })
}

/// List every order, newest first (admin surface).
///
/// # Errors
///
/// Database failures only.
pub async fn list_all(pool: &PgPool) -> Result<Vec<OrderRow>> {
    let rows = sqlx::query_as::<_, OrderRow>("SELECT * FROM orders ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Fetch an order together with its lines.
///
/// # Errors
///
/// [`StoreError::NotFound`] on a miss.
pub async fn fetch_with_items(pool: &PgPool, id: i64) -> Result<(OrderRow, Vec<OrderItemRow>)> {
    let order = sqlx::query_as::<_, OrderRow>("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound { entity: "Order", id })?;

    let items = sqlx::query_as::<_, OrderItemRow>(
        "SELECT * FROM order_items WHERE order_id = $1 ORDER BY id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok((order, items))
}

/// Update an order's fulfilment status.
///
/// # Errors
///
/// [`StoreError::NotFound`] on a miss.
pub async fn update_status(pool: &PgPool, id: i64, status: &str) -> Result<OrderRow> {
    sqlx::query_as::<_, OrderRow>(
        "UPDATE orders SET status = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::NotFound { entity: "Order", id })
}

/// Order count and total revenue (dashboard statistics).
///
/// # Errors
///
/// Database failures only.
pub async fn count_and_revenue(pool: &PgPool) -> Result<(i64, Money)> {
    let (count, revenue): (i64, Money) = sqlx::query_as(
        "SELECT COUNT(*), COALESCE(SUM(total_amount_cents), 0)::bigint FROM orders",
    )
    .fetch_one(pool)
    .await?;
    Ok((count, revenue))
}
