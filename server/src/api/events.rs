//! Event endpoints.
//!
//! - `GET  /api/events/` — list events (public)
//! - `POST /api/events/` — create an event
//! - `PATCH /api/events/:id/` — partial update
//! - `GET  /api/events/:id/` — fetch one event
//! - `PATCH /api/events/:id/activate/` / `…/deactivate/` — status toggles
//! - `GET/POST /api/events/category/` — categories (+ status toggles)
//! - `GET/POST /api/events/:id/comments/` — comments

use super::Message;
use crate::auth::AuthUser;
use crate::server::state::AppState;
use crate::store::events::{self, EventPatch, NewEvent};
use crate::types::Money;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use storefront_web::{AppError, WebResult};

/// Payload for creating an event.
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    /// Owning category, if any.
    pub category_id: Option<i64>,
    /// Display name.
    pub name: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Display date, free-form.
    #[serde(default)]
    pub date: String,
    /// Display time, free-form.
    #[serde(default)]
    pub time: String,
    /// Venue.
    #[serde(default)]
    pub location: String,
    /// Ticket price in cents.
    pub price_cents: i64,
    /// Relative media path.
    #[serde(default)]
    pub image: String,
    /// Display duration.
    #[serde(default)]
    pub duration: String,
    /// Organizer contact name.
    #[serde(default)]
    pub contact_name: String,
    /// Organizer contact number.
    #[serde(default)]
    pub contact_number: String,
}

/// Payload for a partial event update.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEventRequest {
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
    pub price_cents: Option<i64>,
    /// Replacement media path.
    pub image: Option<String>,
    /// Replacement duration.
    pub duration: Option<String>,
    /// Replacement contact name.
    pub contact_name: Option<String>,
    /// Replacement contact number.
    pub contact_number: Option<String>,
}

/// Payload for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// Display name.
    pub name: String,
}

/// Payload for creating a comment.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    /// Comment body.
    pub comment: String,
}

/// List all events. Public.
pub async fn list(State(state): State<AppState>) -> WebResult<Json<Vec<events::EventRow>>> {
    Ok(Json(events::list(&state.pool).await?))
}

/// Fetch one event.
pub async fn get(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<events::EventRow>> {
    Ok(Json(events::fetch(&state.pool, id).await?))
}

/// Create an event; the caller becomes `created_by`.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> WebResult<(StatusCode, Json<events::EventRow>)> {
    if request.name.trim().is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    if request.price_cents < 0 {
        return Err(AppError::validation("Price must not be negative"));
    }

    let row = events::create(
        &state.pool,
        NewEvent {
            category_id: request.category_id,
            created_by: Some(user.id),
            name: request.name.trim().to_string(),
            description: request.description,
            date: request.date,
            time: request.time,
            location: request.location,
            price_cents: Money::from_cents(request.price_cents),
            image: request.image,
            duration: request.duration,
            contact_name: request.contact_name,
            contact_number: request.contact_number,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// Partially update an event.
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateEventRequest>,
) -> WebResult<Json<events::EventRow>> {
    if matches!(request.price_cents, Some(p) if p < 0) {
        return Err(AppError::validation("Price must not be negative"));
    }

    let row = events::update(
        &state.pool,
        id,
        EventPatch {
            category_id: request.category_id,
            name: request.name,
            description: request.description,
            date: request.date,
            time: request.time,
            location: request.location,
            price_cents: request.price_cents.map(Money::from_cents),
            image: request.image,
            duration: request.duration,
            contact_name: request.contact_name,
            contact_number: request.contact_number,
        },
    )
    .await?;

    Ok(Json(row))
}

/// Activate an event.
pub async fn activate(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Message>> {
    events::set_status(&state.pool, id, true).await?;
    Ok(Json(Message::new("Event activated successfully!")))
}

/// Deactivate an event.
pub async fn deactivate(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Message>> {
    events::set_status(&state.pool, id, false).await?;
    Ok(Json(Message::new("Event deactivated successfully!")))
}

/// List event categories.
pub async fn list_categories(
    _user: AuthUser,
    State(state): State<AppState>,
) -> WebResult<Json<Vec<events::EventCategoryRow>>> {
    Ok(Json(events::list_categories(&state.pool).await?))
}

/// Create an event category.
pub async fn create_category(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> WebResult<(StatusCode, Json<events::EventCategoryRow>)> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    let row = events::create_category(&state.pool, name).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Activate a category.
pub async fn activate_category(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Message>> {
    events::set_category_status(&state.pool, id, true).await?;
    Ok(Json(Message::new("Category activated successfully!")))
}

/// Deactivate a category.
pub async fn deactivate_category(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Message>> {
    events::set_category_status(&state.pool, id, false).await?;
    Ok(Json(Message::new("Category deactivated successfully!")))
}

/// List comments for an event. Requires the event to exist.
pub async fn list_comments(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Vec<events::EventCommentRow>>> {
    // 404 for comments on a missing event rather than an empty list.
    events::fetch(&state.pool, id).await?;
    Ok(Json(events::list_comments(&state.pool, id).await?))
}

/// Comment on an event.
pub async fn create_comment(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CreateCommentRequest>,
) -> WebResult<(StatusCode, Json<events::EventCommentRow>)> {
    if request.comment.trim().is_empty() {
        return Err(AppError::validation("Comment is required"));
    }
    events::fetch(&state.pool, id).await?;
    let row = events::create_comment(&state.pool, id, request.comment.trim()).await?;
    Ok((StatusCode::CREATED, Json(row)))
}
