//! Blog endpoints.

use super::Message;
use crate::auth::AuthUser;
use crate::server::state::AppState;
use crate::store::blogs;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use storefront_web::{AppError, WebResult};

/// Payload for creating a post.
#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    /// Title.
    pub title: String,
    /// Body.
    pub content: String,
    /// Relative media path.
    #[serde(default)]
    pub image: String,
}

/// Payload for a partial update.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBlogRequest {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement body.
    pub content: Option<String>,
    /// Replacement media path.
    pub image: Option<String>,
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

/// List all posts.
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
) -> WebResult<Json<Vec<blogs::BlogRow>>> {
    Ok(Json(blogs::list(&state.pool).await?))
}

/// Fetch one post.
pub async fn get(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<blogs::BlogRow>> {
    Ok(Json(blogs::fetch(&state.pool, id).await?))
}

/// Create a post.
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateBlogRequest>,
) -> WebResult<(StatusCode, Json<blogs::BlogRow>)> {
    if request.title.trim().is_empty() {
        return Err(AppError::validation("Title is required"));
    }
    let row = blogs::create(&state.pool, request.title.trim(), &request.content, &request.image)
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Partially update a post.
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateBlogRequest>,
) -> WebResult<Json<blogs::BlogRow>> {
    let row = blogs::update(&state.pool, id, request.title, request.content, request.image).await?;
    Ok(Json(row))
}

/// Activate a post.
pub async fn activate(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Message>> {
    blogs::set_status(&state.pool, id, true).await?;
    Ok(Json(Message::new("Blog activated successfully!")))
}

/// Deactivate a post.
pub async fn deactivate(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Message>> {
    blogs::set_status(&state.pool, id, false).await?;
    Ok(Json(Message::new("Blog deactivated successfully!")))
}

/// List blog categories.
pub async fn list_categories(
    _user: AuthUser,
    State(state): State<AppState>,
) -> WebResult<Json<Vec<blogs::BlogCategoryRow>>> {
    Ok(Json(blogs::list_categories(&state.pool).await?))
}

/// Create a blog category.
pub async fn create_category(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> WebResult<(StatusCode, Json<blogs::BlogCategoryRow>)> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    let row = blogs::create_category(&state.pool, name).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// List comments for a post.
pub async fn list_comments(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Vec<blogs::BlogCommentRow>>> {
    blogs::fetch(&state.pool, id).await?;
    Ok(Json(blogs::list_comments(&state.pool, id).await?))
}

/// Comment on a post.
pub async fn create_comment(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CreateCommentRequest>,
) -> WebResult<(StatusCode, Json<blogs::BlogCommentRow>)> {
    if request.comment.trim().is_empty() {
        return Err(AppError::validation("Comment is required"));
    }
    blogs::fetch(&state.pool, id).await?;
    let row = blogs::create_comment(&state.pool, id, request.comment.trim()).await?;
    Ok((StatusCode::CREATED, Json(row)))
}
