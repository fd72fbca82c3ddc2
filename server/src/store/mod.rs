//! Persistence layer.
//!
//! One module per entity family; every database statement in the
//! application lives here. Handlers never touch SQL directly.
//!
//! Functions take a [`sqlx::PgPool`] and return [`Result`]. Row structs
//! derive [`sqlx::FromRow`] and `Serialize`, so list/detail endpoints can
//! render them one-to-one, mirroring the stored shape on the wire.

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
pub mod sessions;
pub mod users;

/// Errors surfaced by the store layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A lookup by primary key missed.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Entity name, as shown to clients.
        entity: &'static str,
        /// The id that missed.
        id: i64,
    },

    /// A uniqueness constraint rejected the write.
    #[error("{entity} {field} already exists")]
    Duplicate {
        /// Entity name, as shown to clients.
        entity: &'static str,
        /// The offending field.
        field: &'static str,
    },

    /// Checkout found no active cart rows for the caller.
    #[error("nothing to purchase")]
    EmptyCart,

    /// A cart row broke the one-referent invariant. The schema CHECK makes
    /// this unreachable through the API; surfaced as a server error.
    #[error("cart row {id} has no valid item reference")]
    CorruptCartRow {
        /// The offending row.
        id: i64,
    },

    /// Anything the database itself rejected.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Result alias for store functions.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Map a unique-violation database error onto [`StoreError::Duplicate`].
///
/// Any other error passes through unchanged.
pub(crate) fn on_unique_violation(
    err: sqlx::Error,
    entity: &'static str,
    field: &'static str,
) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return StoreError::Duplicate { entity, field };
        }
    }
    StoreError::Database(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = StoreError::NotFound {
            entity: "Product",
            id: 12,
        };
        assert_eq!(err.to_string(), "Product with id 12 not found");
    }

    #[test]
    fn empty_cart_message_matches_the_api_wording() {
        assert_eq!(StoreError::EmptyCart.to_string(), "nothing to purchase");
    }
}
