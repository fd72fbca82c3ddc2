//! About-page endpoints.

use crate::auth::AuthUser;
use crate::server::state::AppState;
use crate::store::about;
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use storefront_web::{AppError, WebResult};

/// Payload for creating an about-page record.
#[derive(Debug, Deserialize)]
pub struct CreateAboutRequest {
    /// Section title.
    pub title: String,
    /// Section body.
    pub content: String,
}

/// List about-page records.
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
) -> WebResult<Json<Vec<about::AboutRow>>> {
    Ok(Json(about::list(&state.pool).await?))
}

/// Create an about-page record.
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateAboutRequest>,
) -> WebResult<(StatusCode, Json<about::AboutRow>)> {
    if request.title.trim().is_empty() {
        return Err(AppError::validation("Title is required"));
    }
    let row = about::create(&state.pool, request.title.trim(), &request.content).await?;
    Ok((StatusCode::CREATED, Json(row)))
}
