//! Checkout and the admin order surface.
//!
//! - `POST  /api/orders/checkout/` — convert the caller's active cart into
//!   an order (see [`crate::store::orders::checkout`])
//! - `GET   /api/orders/admin/orders/` — list all orders (staff)
//! - `GET   /api/orders/admin/orders/:id/` — order detail with hydrated
//!   lines (staff)
//! - `GET   /api/orders/admin/stats/` — dashboard statistics (staff)
//! - `PATCH /api/orders/admin/orders/:id/update-status/` — fulfilment
//!   status update (staff)

use crate::auth::{AdminUser, AuthUser};
use crate::server::state::AppState;
use crate::store::{contact, events, orders, products, users, StoreError};
use crate::types::{Money, OrderLineRef};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use storefront_web::{AppError, WebResult};

/// One hydrated order line.
#[derive(Debug, Serialize)]
pub struct OrderItemResponse {
    /// Line id.
    pub id: i64,
    /// Referenced product or event id.
    pub item: i64,
    /// Kind discriminant: 1 = product, 2 = event.
    pub kind: i16,
    /// Units purchased.
    pub quantity: i32,
    /// The product, when the line references one that still exists.
    pub product: Option<products::ProductRow>,
    /// The event, when the line references one that still exists.
    pub event: Option<events::EventRow>,
}

/// Order detail with lines.
#[derive(Debug, Serialize)]
pub struct OrderDetailResponse {
    /// The order.
    #[serde(flatten)]
    pub order: orders::OrderRow,
    /// Its lines, hydrated.
    pub items: Vec<OrderItemResponse>,
}

/// Dashboard statistics.
#[derive(Debug, Serialize)]
pub struct DashboardStatsResponse {
    /// Total number of orders.
    pub order_count: i64,
    /// Revenue across all orders, in cents.
    pub revenue_cents: Money,
    /// Total number of users.
    pub user_count: i64,
    /// Contact forms still open.
    pub open_contact_forms: i64,
}

/// Payload for a fulfilment-status update.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    /// New status, e.g. "processing", "shipped", "delivered".
    pub status: String,
}

/// Convert the caller's active cart into an order.
///
/// Empty cart (including losing a concurrent-checkout race) returns 400
/// `CART_EMPTY` and changes nothing.
pub async fn checkout(
    user: AuthUser,
    State(state): State<AppState>,
) -> WebResult<Json<orders::CheckoutSummary>> {
    let summary = orders::checkout(&state.pool, user.id).await?;

    tracing::info!(
        user_id = user.id,
        order_id = summary.order_id,
        order_ref = %summary.order_ref,
        total_cents = summary.total_amount_cents.cents(),
        "checkout completed"
    );

    Ok(Json(summary))
}

/// List all orders, newest first. Staff only.
pub async fn list_all(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> WebResult<Json<Vec<orders::OrderRow>>> {
    Ok(Json(orders::list_all(&state.pool).await?))
}

/// Fetch one order with hydrated lines. Staff only.
///
/// A line whose referent was deleted keeps its id/kind pair but hydrates
/// to neither product nor event.
pub async fn detail(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<OrderDetailResponse>> {
    let (order, items) = orders::fetch_with_items(&state.pool, id).await?;

    let mut hydrated = Vec::with_capacity(items.len());
    for item in items {
        let (product, event) = match item.line_ref() {
            Some(OrderLineRef::Product(product_id)) => {
                (not_found_as_none(products::fetch(&state.pool, product_id).await)?, None)
            }
            Some(OrderLineRef::Event(event_id)) => {
                (None, not_found_as_none(events::fetch(&state.pool, event_id).await)?)
            }
            None => (None, None),
        };
        hydrated.push(OrderItemResponse {
            id: item.id,
            item: item.item_id,
            kind: item.kind,
            quantity: item.quantity,
            product,
            event,
        });
    }

    Ok(Json(OrderDetailResponse {
        order,
        items: hydrated,
    }))
}

/// Dashboard statistics. Staff only.
pub async fn stats(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> WebResult<Json<DashboardStatsResponse>> {
    let (order_count, revenue_cents) = orders::count_and_revenue(&state.pool).await?;
    let user_count = users::count(&state.pool).await?;
    let open_contact_forms = contact::count_open_forms(&state.pool).await?;

    Ok(Json(DashboardStatsResponse {
        order_count,
        revenue_cents,
        user_count,
        open_contact_forms,
    }))
}

/// Update an order's fulfilment status. Staff only.
pub async fn update_status(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateOrderStatusRequest>,
) -> WebResult<Json<orders::OrderRow>> {
    let status = request.status.trim().to_lowercase();
    if status.is_empty() {
        return Err(AppError::validation("Status is required"));
    }

    Ok(Json(orders::update_status(&state.pool, id, &status).await?))
}

/// Treat a not-found hydration target as absent instead of failing the
/// whole order detail.
fn not_found_as_none<T>(result: Result<T, StoreError>) -> Result<Option<T>, AppError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(StoreError::NotFound { .. }) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
