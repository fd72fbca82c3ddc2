//! HTTP resource handlers.
//!
//! One module per resource area. Handlers convert wire payloads into store
//! calls and store rows back into JSON; every fallible path funnels through
//! [`AppError`].

pub mod about;
pub mod adoptions;
pub mod blogs;
pub mod cart;
pub mod case_studies;
pub mod contact;
pub mod events;
pub mod heroes;
pub mod industries;
pub mod news;
pub mod orders;
pub mod products;
pub mod services;
pub mod uploads;
pub mod users;

use crate::store::StoreError;
use serde::Serialize;
use storefront_web::AppError;

/// Plain `{"message": ...}` body used by the status-toggle endpoints.
#[derive(Debug, Serialize)]
pub struct Message {
    /// Human-readable outcome.
    pub message: String,
}

impl Message {
    /// Wrap a message string.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Map store failures onto HTTP errors.
///
/// Not-found keeps its entity/id message with 404; uniqueness and the empty
/// cart are 400-class with stable codes; everything the database rejected
/// becomes a generic 500 whose cause goes to the log, not the client.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => Self::not_found(entity, id),
            StoreError::Duplicate { entity, field } => {
                Self::validation(format!("{entity} {field} already exists"))
            }
            StoreError::EmptyCart => {
                Self::bad_request("Nothing to purchase").with_code("CART_EMPTY")
            }
            StoreError::CorruptCartRow { .. } => {
                Self::internal("Checkout failed").with_source(anyhow::Error::new(err))
            }
            StoreError::Database(_) => {
                Self::internal("Storage failure").with_source(anyhow::Error::new(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn not_found_maps_to_404_with_entity_message() {
        let err: AppError = StoreError::NotFound {
            entity: "Cart item",
            id: 3,
        }
        .into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "[NOT_FOUND] Cart item with id 3 not found");
    }

    #[test]
    fn empty_cart_maps_to_400_cart_empty() {
        let err: AppError = StoreError::EmptyCart.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "CART_EMPTY");
    }

    #[test]
    fn duplicate_maps_to_validation() {
        let err: AppError = StoreError::Duplicate {
            entity: "User",
            field: "username",
        }
        .into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }
}
