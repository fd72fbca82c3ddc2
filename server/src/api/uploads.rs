//! Media upload endpoint.
//!
//! `POST /api/uploads/` accepts one multipart file field, writes it under
//! the configured upload directory with a random filename (original
//! extension preserved), and returns the relative path. Entity create and
//! update endpoints reference that path as a plain string field; the
//! directory itself is served under `/media/`.

use crate::auth::AuthUser;
use crate::server::state::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use storefront_web::{AppError, WebResult};
use uuid::Uuid;

/// Where an upload landed.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Path relative to the media root, e.g. "3f2a….png".
    pub path: String,
}

/// Accept a single file and persist it under the upload directory.
pub async fn upload(
    _user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> WebResult<(StatusCode, Json<UploadResponse>)> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("Malformed multipart body: {e}")))?
        .ok_or_else(|| AppError::validation("A file field is required"))?;

    let extension = field
        .file_name()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()) && !ext.is_empty());

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::bad_request(format!("Failed to read upload: {e}")))?;
    if data.is_empty() {
        return Err(AppError::validation("Uploaded file is empty"));
    }

    let filename = match extension {
        Some(ext) => format!("{}.{ext}", Uuid::new_v4().simple()),
        None => Uuid::new_v4().simple().to_string(),
    };

    let dir = std::path::Path::new(&state.config.uploads.dir);
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::internal("Upload directory unavailable").with_source(e.into()))?;
    tokio::fs::write(dir.join(&filename), &data)
        .await
        .map_err(|e| AppError::internal("Failed to store upload").with_source(e.into()))?;

    Ok((StatusCode::CREATED, Json(UploadResponse { path: filename })))
}
