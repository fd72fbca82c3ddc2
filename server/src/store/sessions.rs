//! Bearer-token sessions.
//!
//! Access and refresh tokens are opaque random strings; the access token is
//! what `Authorization: Bearer` carries. Refresh rotates the access token in
//! place.

use super::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// A stored session.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionRow {
    /// Primary key.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Bearer access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access-token expiry.
    pub expires_at: DateTime<Utc>,
}

/// Session joined with the owning user, for request authentication.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionUserRow {
    /// The authenticated user id.
    pub user_id: i64,
    /// Login name.
    pub username: String,
    /// Staff flag.
    pub is_staff: bool,
    /// Deactivated users fail authentication.
    pub is_active: bool,
    /// Access-token expiry.
    pub expires_at: DateTime<Utc>,
}

/// Persist a new session.
///
/// # Errors
///
/// Database failures only.
pub async fn create(
    pool: &PgPool,
    user_id: i64,
    access_token: &str,
    refresh_token: &str,
    expires_at: DateTime<Utc>,
    ip_address: &str,
    user_agent: &str,
) -> Result<SessionRow> {
    let row = sqlx::query_as::<_, SessionRow>(
        "INSERT INTO sessions (user_id, access_token, refresh_token, expires_at, ip_address, user_agent)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id, user_id, access_token, refresh_token, expires_at",
    )
    .bind(user_id)
    .bind(access_token)
    .bind(refresh_token)
    .bind(expires_at)
    .bind(ip_address)
    .bind(user_agent)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Look up a session (joined with its user) by access token.
///
/// # Errors
///
/// Database failures only.
pub async fn fetch_by_access_token(
    pool: &PgPool,
    access_token: &str,
) -> Result<Option<SessionUserRow>> {
    let row = sqlx::query_as::<_, SessionUserRow>(
        "SELECT s.user_id, u.username, u.is_staff, u.is_active, s.expires_at
         FROM sessions s
         JOIN users u ON u.id = s.user_id
         WHERE s.access_token = $1",
    )
    .bind(access_token)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Rotate the access token for the session owning `refresh_token`.
///
/// Returns the updated session, or `None` when the refresh token is unknown.
///
/// # Errors
///
/// Database failures only.
pub async fn rotate_access_token(
    pool: &PgPool,
    refresh_token: &str,
    new_access_token: &str,
    new_expires_at: DateTime<Utc>,
) -> Result<Option<SessionRow>> {
    let row = sqlx::query_as::<_, SessionRow>(
        "UPDATE sessions
         SET access_token = $2, expires_at = $3
         WHERE refresh_token = $1
         RETURNING id, user_id, access_token, refresh_token, expires_at",
    )
    .bind(refresh_token)
    .bind(new_access_token)
    .bind(new_expires_at)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
