//! Hero banner endpoints.
//!
//! The banner listing is public; everything else requires a token.

use super::Message;
use crate::auth::AuthUser;
use crate::server::state::AppState;
use crate::store::heroes;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use storefront_web::{AppError, WebResult};

/// Payload for creating a banner.
#[derive(Debug, Deserialize)]
pub struct CreateHeroRequest {
    /// Relative media path.
    #[serde(default)]
    pub image: String,
    /// Headline.
    pub title: String,
    /// Secondary line.
    #[serde(default)]
    pub subtitle: String,
    /// Call-to-action label.
    #[serde(default)]
    pub button: String,
}

/// Payload for a partial update.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateHeroRequest {
    /// Replacement media path.
    pub image: Option<String>,
    /// Replacement headline.
    pub title: Option<String>,
    /// Replacement secondary line.
    pub subtitle: Option<String>,
    /// Replacement call-to-action label.
    pub button: Option<String>,
}

/// List all banners. Public.
pub async fn list(State(state): State<AppState>) -> WebResult<Json<Vec<heroes::HeroRow>>> {
    Ok(Json(heroes::list(&state.pool).await?))
}

/// Fetch one banner.
pub async fn get(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<heroes::HeroRow>> {
    Ok(Json(heroes::fetch(&state.pool, id).await?))
}

/// Create a banner.
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateHeroRequest>,
) -> WebResult<(StatusCode, Json<heroes::HeroRow>)> {
    if request.title.trim().is_empty() {
        return Err(AppError::validation("Title is required"));
    }
    let row = heroes::create(
        &state.pool,
        &request.image,
        request.title.trim(),
        &request.subtitle,
        &request.button,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Partially update a banner.
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateHeroRequest>,
) -> WebResult<Json<heroes::HeroRow>> {
    let row = heroes::update(
        &state.pool,
        id,
        request.image,
        request.title,
        request.subtitle,
        request.button,
    )
    .await?;
    Ok(Json(row))
}

/// Activate a banner.
pub async fn activate(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Message>> {
    heroes::set_status(&state.pool, id, true).await?;
    Ok(Json(Message::new("Hero activated successfully!")))
}

/// Deactivate a banner.
pub async fn deactivate(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Message>> {
    heroes::set_status(&state.pool, id, false).await?;
    Ok(Json(Message::new("Hero deactivated successfully!")))
}
