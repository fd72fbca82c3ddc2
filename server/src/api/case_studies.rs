//! Case study endpoints.

use crate::auth::AuthUser;
use crate::server::state::AppState;
use crate::store::case_studies;
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use storefront_web::{AppError, WebResult};

/// Payload for creating a case study.
#[derive(Debug, Deserialize)]
pub struct CreateCaseStudyRequest {
    /// Owning category.
    pub category_id: i64,
    /// Title.
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
    /// Commented case study.
    pub case_study_id: i64,
    /// Comment body.
    pub comment: String,
}

/// List all case studies.
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
) -> WebResult<Json<Vec<case_studies::CaseStudyRow>>> {
    Ok(Json(case_studies::list(&state.pool).await?))
}

/// Create a case study.
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateCaseStudyRequest>,
) -> WebResult<(StatusCode, Json<case_studies::CaseStudyRow>)> {
    if request.title.trim().is_empty() {
        return Err(AppError::validation("Title is required"));
    }
    let row = case_studies::create(
        &state.pool,
        request.category_id,
        request.title.trim(),
        &request.content,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// List categories.
pub async fn list_categories(
    _user: AuthUser,
    State(state): State<AppState>,
) -> WebResult<Json<Vec<case_studies::CaseStudyCategoryRow>>> {
    Ok(Json(case_studies::list_categories(&state.pool).await?))
}

/// Create a category.
pub async fn create_category(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> WebResult<(StatusCode, Json<case_studies::CaseStudyCategoryRow>)> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    let row = case_studies::create_category(&state.pool, name).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// List all comments.
pub async fn list_comments(
    _user: AuthUser,
    State(state): State<AppState>,
) -> WebResult<Json<Vec<case_studies::CaseStudyCommentRow>>> {
    Ok(Json(case_studies::list_comments(&state.pool).await?))
}

/// Create a comment.
pub async fn create_comment(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateCommentRequest>,
) -> WebResult<(StatusCode, Json<case_studies::CaseStudyCommentRow>)> {
    if request.comment.trim().is_empty() {
        return Err(AppError::validation("Comment is required"));
    }
    let row =
        case_studies::create_comment(&state.pool, request.case_study_id, request.comment.trim())
            .await?;
    Ok((StatusCode::CREATED, Json(row)))
}
