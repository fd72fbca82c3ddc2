//! Axum integration layer for the Storefront backend.
//!
//! This crate holds the framework-side plumbing shared by every HTTP
//! endpoint in the application:
//!
//! - [`AppError`]: one error type that every handler returns, carrying an
//!   HTTP status, a machine-readable code, and a user-facing message.
//! - Extractors for request metadata ([`ClientIp`], [`UserAgent`]).
//! - A request-ID middleware layer that mints or propagates an
//!   `X-Request-ID` header and wraps each request in a tracing span.
//!
//! # Request Flow
//!
//! 1. **HTTP request** arrives at an Axum handler
//! 2. **Extract data** from the request (JSON body, path, headers)
//! 3. **Validate and persist** through the application's store layer
//! 4. **Map the result** to a response, or an [`AppError`] to a status +
//!    JSON error body
//!
//! # Example
//!
//! ```ignore
//! use storefront_web::{AppError, WebResult};
//! use axum::{extract::{Path, State}, Json};
//!
//! async fn get_product(
//!     State(state): State<AppState>,
//!     Path(id): Path<i64>,
//! ) -> WebResult<Json<ProductResponse>> {
//!     let product = store::products::fetch(&state.pool, id)
//!         .await
//!         .map_err(|_| AppError::not_found("Product", id))?;
//!     Ok(Json(product.into()))
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod middleware;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{ClientIp, UserAgent};
pub use middleware::{request_id_layer, REQUEST_ID_HEADER};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
