//! Cart endpoints.
//!
//! - `GET    /api/cart/` — list active cart rows (public)
//! - `POST   /api/cart/add/` — add a product or event to the caller's cart
//! - `PATCH  /api/cart/update/:id/` — change a row's quantity
//! - `DELETE /api/cart/remove/:id/` — deactivate a row (idempotent)
//!
//! A row references exactly one product or one event, matching its `kind`;
//! that shape is validated here before anything is written, so checkout
//! never sees a malformed row. Row totals are computed server-side from the
//! referent's current price.

use crate::auth::AuthUser;
use crate::server::state::AppState;
use crate::store::{cart, events, products};
use crate::types::{CartItemKind, Money};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use storefront_web::{AppError, WebResult};

/// Payload for adding a cart row.
#[derive(Debug, Deserialize)]
pub struct AddCartItemRequest {
    /// "product" or "event".
    pub kind: CartItemKind,
    /// Product to add, when kind = "product".
    pub product_id: Option<i64>,
    /// Event to add, when kind = "event".
    pub event_id: Option<i64>,
    /// Units; must be positive.
    pub quantity: i32,
}

/// Payload for a quantity update.
#[derive(Debug, Deserialize)]
pub struct UpdateCartItemRequest {
    /// New unit count; must be positive.
    pub quantity: i32,
}

/// List active cart rows. Public.
pub async fn list(State(state): State<AppState>) -> WebResult<Json<Vec<cart::CartItemRow>>> {
    Ok(Json(cart::list_active(&state.pool).await?))
}

/// Add a row to the caller's cart.
pub async fn add(
    user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<AddCartItemRequest>,
) -> WebResult<(StatusCode, Json<cart::CartItemRow>)> {
    if request.quantity <= 0 {
        return Err(AppError::validation("Quantity must be positive"));
    }

    let unit_price = match (request.kind, request.product_id, request.event_id) {
        (CartItemKind::Product, Some(product_id), None) => {
            products::unit_price(&state.pool, product_id).await?
        }
        (CartItemKind::Event, None, Some(event_id)) => {
            events::unit_price(&state.pool, event_id).await?
        }
        _ => {
            return Err(AppError::validation(
                "Exactly one of product_id or event_id must be set, matching kind",
            ));
        }
    };

    let total = unit_price.times(i64::from(request.quantity));
    let row = cart::insert(
        &state.pool,
        user.id,
        request.kind,
        request.product_id,
        request.event_id,
        request.quantity,
        total,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// Change the quantity of one of the caller's rows; the total is
/// recomputed from the referent's current price.
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateCartItemRequest>,
) -> WebResult<Json<cart::CartItemRow>> {
    if request.quantity <= 0 {
        return Err(AppError::validation("Quantity must be positive"));
    }

    let existing = cart::fetch_for_user(&state.pool, id, user.id).await?;
    let unit_price: Money = match (existing.product_id, existing.event_id) {
        (Some(product_id), _) => products::unit_price(&state.pool, product_id).await?,
        (None, Some(event_id)) => events::unit_price(&state.pool, event_id).await?,
        (None, None) => return Err(AppError::internal("Cart row has no item reference")),
    };

    let total = unit_price.times(i64::from(request.quantity));
    let row = cart::update_quantity(&state.pool, id, user.id, request.quantity, total).await?;
    Ok(Json(row))
}

/// Deactivate one of the caller's rows. A second call (or a call against
/// an already-inactive row) is a no-op, not an error.
pub async fn remove(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<StatusCode> {
    cart::deactivate(&state.pool, id, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
