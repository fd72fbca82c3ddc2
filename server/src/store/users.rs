//! User accounts.

use super::{on_unique_violation, Result, StoreError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

/// A user row as exposed over the API (no credential material).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserRow {
    /// Primary key.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Contact e-mail.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Staff (admin) flag.
    pub is_staff: bool,
    /// Soft-delete flag.
    pub is_active: bool,
    /// Last successful token issuance.
    pub last_login: Option<DateTime<Utc>>,
    /// Registration timestamp.
    pub date_joined: DateTime<Utc>,
}

/// Credential material for password verification.
#[derive(Debug, sqlx::FromRow)]
pub struct CredentialRow {
    /// Primary key.
    pub id: i64,
    /// Stored password digest.
    pub password_hash: String,
    /// Deactivated users cannot log in.
    pub is_active: bool,
}

const USER_COLUMNS: &str =
    "id, username, email, first_name, last_name, is_staff, is_active, last_login, date_joined";

/// Insert a new user.
///
/// # Errors
///
/// [`StoreError::Duplicate`] when the username is taken.
pub async fn create(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
    first_name: &str,
    last_name: &str,
) -> Result<UserRow> {
    sqlx::query_as::<_, UserRow>(&format!(
        "INSERT INTO users (username, email, password_hash, first_name, last_name)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {USER_COLUMNS}"
    ))
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(first_name)
    .bind(last_name)
    .fetch_one(pool)
    .await
    .map_err(|e| on_unique_violation(e, "User", "username"))
}

/// Fetch a user by id.
///
/// # Errors
///
/// [`StoreError::NotFound`] on a miss.
pub async fn fetch(pool: &PgPool, id: i64) -> Result<UserRow> {
    sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound { entity: "User", id })
}

/// List every user, newest first.
///
/// # Errors
///
/// Database failures only.
pub async fn list(pool: &PgPool) -> Result<Vec<UserRow>> {
    let rows = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY date_joined DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Fetch credential material by username, if the user exists.
///
/// # Errors
///
/// Database failures only.
pub async fn fetch_credentials(pool: &PgPool, username: &str) -> Result<Option<CredentialRow>> {
    let row = sqlx::query_as::<_, CredentialRow>(
        "SELECT id, password_hash, is_active FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Flip the active flag.
///
/// # Errors
///
/// [`StoreError::NotFound`] when no such user exists.
pub async fn set_active(pool: &PgPool, id: i64, active: bool) -> Result<()> {
    let result = sqlx::query("UPDATE users SET is_active = $2 WHERE id = $1")
        .bind(id)
        .bind(active)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound { entity: "User", id });
    }
    Ok(())
}

/// Record a successful login.
///
/// # Errors
///
/// Database failures only.
pub async fn touch_last_login(pool: &PgPool, id: i64) -> Result<()> {
    sqlx::query("UPDATE users SET last_login = now() WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Count all users (dashboard statistics).
///
/// # Errors
///
/// Database failures only.
pub async fn count(pool: &PgPool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
