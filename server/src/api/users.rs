//! User endpoints.
//!
//! - `GET /api/user/` — the caller's own profile
//! - `GET /api/user/all-user/` — list users
//! - `GET /api/user/:id/` — fetch one user
//! - `PATCH /api/user/:id/activate` / `…/deactivate` — account toggles

use super::Message;
use crate::auth::AuthUser;
use crate::server::state::AppState;
use crate::store::users;
use axum::{
    extract::{Path, State},
    Json,
};
use storefront_web::WebResult;

/// The caller's own profile.
pub async fn me(user: AuthUser, State(state): State<AppState>) -> WebResult<Json<users::UserRow>> {
    Ok(Json(users::fetch(&state.pool, user.id).await?))
}

/// List all users.
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
) -> WebResult<Json<Vec<users::UserRow>>> {
    Ok(Json(users::list(&state.pool).await?))
}

/// Fetch one user.
pub async fn get(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<users::UserRow>> {
    Ok(Json(users::fetch(&state.pool, id).await?))
}

/// Reactivate an account.
pub async fn activate(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Message>> {
    users::set_active(&state.pool, id, true).await?;
    Ok(Json(Message::new("User activated successfully!")))
}

/// Deactivate an account.
pub async fn deactivate(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Message>> {
    users::set_active(&state.pool, id, false).await?;
    Ok(Json(Message::new("User deactivated successfully!")))
}
