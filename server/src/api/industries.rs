//! Industry endpoints.

use crate::auth::AuthUser;
use crate::server::state::AppState;
use crate::store::industries;
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use storefront_web::{AppError, WebResult};

/// Payload for creating an industry.
#[derive(Debug, Deserialize)]
pub struct CreateIndustryRequest {
    /// Display name.
    pub name: String,
}

/// Payload for creating a tag.
#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    /// Tagged industry.
    pub industry_id: i64,
    /// Tag label.
    pub tag: String,
}

/// List all industries.
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
) -> WebResult<Json<Vec<industries::IndustryRow>>> {
    Ok(Json(industries::list(&state.pool).await?))
}

/// Create an industry.
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateIndustryRequest>,
) -> WebResult<(StatusCode, Json<industries::IndustryRow>)> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    let row = industries::create(&state.pool, name).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// List all tags.
pub async fn list_tags(
    _user: AuthUser,
    State(state): State<AppState>,
) -> WebResult<Json<Vec<industries::IndustryTagRow>>> {
    Ok(Json(industries::list_tags(&state.pool).await?))
}

/// Tag an industry.
pub async fn create_tag(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateTagRequest>,
) -> WebResult<(StatusCode, Json<industries::IndustryTagRow>)> {
    if request.tag.trim().is_empty() {
        return Err(AppError::validation("Tag is required"));
    }
    let row = industries::create_tag(&state.pool, request.industry_id, request.tag.trim()).await?;
    Ok((StatusCode::CREATED, Json(row)))
}
