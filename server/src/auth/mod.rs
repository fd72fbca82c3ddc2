//! Authentication: password digests, bearer sessions, and extractors.
//!
//! Deliberately thin. Tokens are opaque random strings persisted in the
//! sessions table; there is no claims format to parse and nothing to
//! verify besides a lookup, an expiry, and the user's active flag.

pub mod handlers;
pub mod middleware;
pub mod password;

pub use middleware::{AdminUser, AuthUser, BearerToken};
