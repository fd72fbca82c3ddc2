//! Storefront — an e-commerce and content backend.
//!
//! REST CRUD endpoints for a set of content types (blog posts, case
//! studies, events, news, services, industries, hero banners, contact
//! forms, adoption listings) plus a shopping cart and an order checkout
//! flow.
//!
//! # Architecture
//!
//! ```text
//! HTTP request
//!     │
//!     ▼
//! api::*          handlers: extract, validate, map errors
//!     │
//!     ▼
//! store::*        every SQL statement in the application
//!     │
//!     ▼
//! PostgreSQL      one table per entity; cart rows soft-stated
//! ```
//!
//! Almost every resource is the same flat shape: list, create, partial
//! update, status toggles. The one multi-table flow is checkout
//! ([`store::orders::checkout`]), which converts the caller's active cart
//! rows into an order and its lines inside a single transaction:
//!
//! ```text
//! lock active cart rows (FOR UPDATE, serializes per-user checkouts)
//!   → sum stored row totals
//!   → insert order ("paid", minted ORD-/PAY- references)
//!   → bulk-insert order items (tagged product/event lines)
//!   → deactivate cart rows
//! commit — or roll back with nothing visible
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod auth;
pub mod config;
pub mod server;
pub mod store;
pub mod types;

pub use config::Config;
pub use server::{build_router, AppState};
