//! Request authentication extractors.
//!
//! - [`BearerToken`]: the raw `Authorization: Bearer <token>` value
//! - [`AuthUser`]: a validated session — use as a handler parameter to
//!   require authentication
//! - [`AdminUser`]: an [`AuthUser`] that also carries the staff flag
//!
//! # Usage
//!
//! ```rust,ignore
//! async fn whoami(user: AuthUser) -> Result<Json<MeResponse>, AppError> {
//!     // user.id is a live, non-expired, active account
//!     Ok(Json(MeResponse { id: user.id, username: user.username }))
//! }
//! ```

use crate::server::state::AppState;
use crate::store::sessions;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use chrono::Utc;
use storefront_web::AppError;

/// Bearer token extracted from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized("Invalid authorization format. Expected 'Bearer <token>'")
        })?;

        if token.is_empty() {
            return Err(AppError::unauthorized("Empty bearer token"));
        }

        Ok(Self(token.to_string()))
    }
}

/// An authenticated user.
///
/// Extraction validates the bearer token against the sessions table and
/// rejects expired sessions and deactivated accounts.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The authenticated user id.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Staff flag.
    pub is_staff: bool,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = BearerToken::from_request_parts(parts, state).await?;

        let session = sessions::fetch_by_access_token(&state.pool, &bearer.0)
            .await
            .map_err(|e| {
                AppError::internal("Session lookup failed").with_source(anyhow::Error::new(e))
            })?
            .ok_or_else(|| AppError::unauthorized("Invalid token"))?;

        if session.expires_at <= Utc::now() {
            return Err(AppError::unauthorized("Token expired"));
        }
        if !session.is_active {
            return Err(AppError::unauthorized("Account is deactivated"));
        }

        Ok(Self {
            id: session.user_id,
            username: session.username,
            is_staff: session.is_staff,
        })
    }
}

/// An authenticated staff user.
///
/// Rejects non-staff callers with 403.
#[derive(Debug, Clone)]
pub struct AdminUser {
    /// The authenticated staff user id.
    pub id: i64,
    /// Login name.
    pub username: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_staff {
            return Err(AppError::forbidden("Staff access required"));
        }
        Ok(Self {
            id: user.id,
            username: user.username,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn bearer_token_is_extracted() {
        let req = Request::builder()
            .header("authorization", "Bearer abc123")
            .body(())
            .unwrap();
        let (mut parts, ()) = req.into_parts();

        let token = BearerToken::from_request_parts(&mut parts, &())
            .await
            .expect("token extracted");
        assert_eq!(token.0, "abc123");
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let req = Request::builder().body(()).unwrap();
        let (mut parts, ()) = req.into_parts();

        let err = BearerToken::from_request_parts(&mut parts, &())
            .await
            .expect_err("rejected");
        assert_eq!(err.code(), "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn wrong_scheme_is_unauthorized() {
        let req = Request::builder()
            .header("authorization", "Basic dXNlcjpwYXNz")
            .body(())
            .unwrap();
        let (mut parts, ()) = req.into_parts();

        assert!(BearerToken::from_request_parts(&mut parts, &())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn empty_token_is_unauthorized() {
        let req = Request::builder()
            .header("authorization", "Bearer ")
            .body(())
            .unwrap();
        let (mut parts, ()) = req.into_parts();

        assert!(BearerToken::from_request_parts(&mut parts, &())
            .await
            .is_err());
    }
}
