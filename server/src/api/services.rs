//! Service endpoints.

use super::Message;
use crate::auth::AuthUser;
use crate::server::state::AppState;
use crate::store::services;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use storefront_web::{AppError, WebResult};

/// Payload for creating a service.
#[derive(Debug, Deserialize)]
pub struct CreateServiceRequest {
    /// Display name.
    pub name: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Relative media path.
    #[serde(default)]
    pub image: String,
    /// Display price, free-form.
    #[serde(default)]
    pub price: String,
}

/// Payload for a partial update.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateServiceRequest {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement media path.
    pub image: Option<String>,
    /// Replacement display price.
    pub price: Option<String>,
}

/// Payload for creating a tag.
#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    /// Tagged service.
    pub service_id: i64,
    /// Tag label.
    pub tag: String,
}

/// Payload for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// Display name.
    pub name: String,
}

/// List all services. Public.
pub async fn list(State(state): State<AppState>) -> WebResult<Json<Vec<services::ServiceRow>>> {
    Ok(Json(services::list(&state.pool).await?))
}

/// Fetch one service.
pub async fn get(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<services::ServiceRow>> {
    Ok(Json(services::fetch(&state.pool, id).await?))
}

/// Create a service; the caller becomes `created_by`.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateServiceRequest>,
) -> WebResult<(StatusCode, Json<services::ServiceRow>)> {
    if request.name.trim().is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    let row = services::create(
        &state.pool,
        Some(user.id),
        request.name.trim(),
        &request.description,
        &request.image,
        &request.price,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Partially update a service.
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateServiceRequest>,
) -> WebResult<Json<services::ServiceRow>> {
    let row = services::update(
        &state.pool,
        id,
        request.name,
        request.description,
        request.image,
        request.price,
    )
    .await?;
    Ok(Json(row))
}

/// Activate a service.
pub async fn activate(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Message>> {
    services::set_status(&state.pool, id, true).await?;
    Ok(Json(Message::new("Service activated successfully!")))
}

/// Deactivate a service.
pub async fn deactivate(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Message>> {
    services::set_status(&state.pool, id, false).await?;
    Ok(Json(Message::new("Service deactivated successfully!")))
}

/// List all tags.
pub async fn list_tags(
    _user: AuthUser,
    State(state): State<AppState>,
) -> WebResult<Json<Vec<services::ServiceTagRow>>> {
    Ok(Json(services::list_tags(&state.pool).await?))
}

/// Tag a service.
pub async fn create_tag(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateTagRequest>,
) -> WebResult<(StatusCode, Json<services::ServiceTagRow>)> {
    if request.tag.trim().is_empty() {
        return Err(AppError::validation("Tag is required"));
    }
    let row = services::create_tag(&state.pool, request.service_id, request.tag.trim()).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// List service categories.
pub async fn list_categories(
    _user: AuthUser,
    State(state): State<AppState>,
) -> WebResult<Json<Vec<services::ServiceCategoryRow>>> {
    Ok(Json(services::list_categories(&state.pool).await?))
}

/// Create a service category.
pub async fn create_category(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> WebResult<(StatusCode, Json<services::ServiceCategoryRow>)> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    let row = services::create_category(&state.pool, name).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Activate a category.
pub async fn activate_category(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Message>> {
    services::set_category_status(&state.pool, id, true).await?;
    Ok(Json(Message::new("Category activated successfully!")))
}

/// Deactivate a category.
pub async fn deactivate_category(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Message>> {
    services::set_category_status(&state.pool, id, false).await?;
    Ok(Json(Message::new("Category deactivated successfully!")))
}
