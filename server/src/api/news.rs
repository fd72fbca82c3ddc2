//! News endpoints: articles, categories, comments, newsletter.

use crate::auth::AuthUser;
use crate::server::state::AppState;
use crate::store::news;
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use storefront_web::{AppError, WebResult};

/// Payload for creating an article.
#[derive(Debug, Deserialize)]
pub struct CreateNewsRequest {
    /// Owning category.
    pub category_id: i64,
    /// Headline.
    pub title: String,
    /// Body.
    pub content: String,
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
    /// Commented article.
    pub news_id: i64,
    /// Comment body.
    pub comment: String,
}

/// Payload for a newsletter subscription.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    /// Subscriber e-mail.
    pub email: String,
}

/// List all articles.
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
) -> WebResult<Json<Vec<news::NewsRow>>> {
    Ok(Json(news::list(&state.pool).await?))
}

/// Create an article.
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateNewsRequest>,
) -> WebResult<(StatusCode, Json<news::NewsRow>)> {
    if request.title.trim().is_empty() {
        return Err(AppError::validation("Title is required"));
    }
    let row = news::create(&state.pool, request.category_id, request.title.trim(), &request.content)
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// List categories.
pub async fn list_categories(
    _user: AuthUser,
    State(state): State<AppState>,
) -> WebResult<Json<Vec<news::NewsCategoryRow>>> {
    Ok(Json(news::list_categories(&state.pool).await?))
}

/// Create a category.
pub async fn create_category(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> WebResult<(StatusCode, Json<news::NewsCategoryRow>)> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    let row = news::create_category(&state.pool, name).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// List all comments.
pub async fn list_comments(
    _user: AuthUser,
    State(state): State<AppState>,
) -> WebResult<Json<Vec<news::NewsCommentRow>>> {
    Ok(Json(news::list_comments(&state.pool).await?))
}

/// Create a comment.
pub async fn create_comment(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateCommentRequest>,
) -> WebResult<(StatusCode, Json<news::NewsCommentRow>)> {
    if request.comment.trim().is_empty() {
        return Err(AppError::validation("Comment is required"));
    }
    let row = news::create_comment(&state.pool, request.news_id, request.comment.trim()).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// List newsletter subscribers.
pub async fn list_subscribers(
    _user: AuthUser,
    State(state): State<AppState>,
) -> WebResult<Json<Vec<news::NewsletterSubscriberRow>>> {
    Ok(Json(news::list_subscribers(&state.pool).await?))
}

/// Subscribe an e-mail address. Duplicate addresses are rejected.
pub async fn subscribe(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<SubscribeRequest>,
) -> WebResult<(StatusCode, Json<news::NewsletterSubscriberRow>)> {
    let email = request.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation("A valid email is required"));
    }
    let row = news::create_subscriber(&state.pool, email).await?;
    Ok((StatusCode::CREATED, Json(row)))
}
