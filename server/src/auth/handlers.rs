//! Registration and token endpoints.
//!
//! - `POST /api/user/register/` — create an account
//! - `POST /api/token/` — exchange credentials for an access/refresh pair
//! - `POST /api/token/refresh/` — rotate the access token

use super::password;
use crate::server::state::AppState;
use crate::store::{sessions, users};
use axum::{extract::State, http::StatusCode, Json};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use storefront_web::{AppError, ClientIp, UserAgent, WebResult};
use uuid::Uuid;

/// Registration payload.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Unique login name.
    pub username: String,
    /// Contact e-mail.
    #[serde(default)]
    pub email: String,
    /// Plaintext password, digested before storage.
    pub password: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
}

/// Credential payload for token issuance.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    /// Login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// The issued token pair.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// Bearer access token.
    pub access: String,
    /// Refresh token.
    pub refresh: String,
}

/// Refresh payload.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token from a previous issuance.
    pub refresh: String,
}

/// A rotated access token.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// New bearer access token.
    pub access: String,
}

/// Create an account.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> WebResult<(StatusCode, Json<users::UserRow>)> {
    let username = request.username.trim();
    if username.is_empty() {
        return Err(AppError::validation("Username is required"));
    }
    if request.password.len() < 8 {
        return Err(AppError::validation(
            "Password must be at least 8 characters",
        ));
    }

    let digest = password::hash_password(&request.password, state.config.auth.hash_iterations);
    let user = users::create(
        &state.pool,
        username,
        &request.email,
        &digest,
        &request.first_name,
        &request.last_name,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Exchange credentials for a token pair.
pub async fn obtain_token(
    State(state): State<AppState>,
    client_ip: ClientIp,
    user_agent: UserAgent,
    Json(request): Json<TokenRequest>,
) -> WebResult<Json<TokenResponse>> {
    let credentials = users::fetch_credentials(&state.pool, &request.username)
        .await?
        .filter(|c| password::verify_password(&request.password, &c.password_hash))
        .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

    if !credentials.is_active {
        return Err(AppError::unauthorized("Account is deactivated"));
    }

    let access = opaque_token();
    let refresh = opaque_token();
    let expires_at = Utc::now() + Duration::seconds(state.config.auth.access_token_ttl);

    sessions::create(
        &state.pool,
        credentials.id,
        &access,
        &refresh,
        expires_at,
        &client_ip.0.to_string(),
        &user_agent.0,
    )
    .await?;
    users::touch_last_login(&state.pool, credentials.id).await?;

    tracing::info!(
        user_id = credentials.id,
        client_ip = %client_ip.0,
        user_agent = %user_agent.0,
        "token issued"
    );

    Ok(Json(TokenResponse { access, refresh }))
}

/// Rotate the access token of an existing session.
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> WebResult<Json<RefreshResponse>> {
    let access = opaque_token();
    let expires_at = Utc::now() + Duration::seconds(state.config.auth.access_token_ttl);

    let session = sessions::rotate_access_token(&state.pool, &request.refresh, &access, expires_at)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid refresh token"))?;

    Ok(Json(RefreshResponse {
        access: session.access_token,
    }))
}

fn opaque_token() -> String {
    format!(
        "{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_tokens_are_long_and_unique() {
        let a = opaque_token();
        let b = opaque_token();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }
}
