//! Router configuration.
//!
//! Builds the complete Axum router: health probes, the `/api` resource
//! surface, and static media serving. Public endpoints (catalog reads,
//! hero listing, cart read, registration, token issuance) take no
//! extractor-enforced authentication; everything else requires a bearer
//! token through [`crate::auth::AuthUser`] / [`crate::auth::AdminUser`] on
//! the handler itself.

use super::health::{health_check, readiness_check};
use super::state::AppState;
use crate::api::{
    about, adoptions, blogs, cart, case_studies, contact, events, heroes, industries, news,
    orders, products, services, uploads, users,
};
use crate::auth::handlers as auth_handlers;
use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Build the complete router.
#[must_use]
#[allow(clippy::too_many_lines)] // Route tables are naturally long but flat
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Registration and tokens
        .route("/user/register/", post(auth_handlers::register))
        .route("/token/", post(auth_handlers::obtain_token))
        .route("/token/refresh/", post(auth_handlers::refresh_token))
        // Users
        .route("/user/", get(users::me))
        .route("/user/all-user/", get(users::list))
        .route("/user/:id/", get(users::get))
        .route("/user/:id/activate", patch(users::activate))
        .route("/user/:id/deactivate", patch(users::deactivate))
        // Products
        .route("/product/", get(products::list).post(products::create))
        .route("/product/:id/", get(products::get).patch(products::update))
        .route("/product/:id/activate/", patch(products::activate))
        .route("/product/:id/deactivate/", patch(products::deactivate))
        .route(
            "/product/category/",
            get(products::list_categories).post(products::create_category),
        )
        .route(
            "/product/category/:id/activate/",
            patch(products::activate_category),
        )
        .route(
            "/product/category/:id/deactivate/",
            patch(products::deactivate_category),
        )
        // Events
        .route("/events/", get(events::list).post(events::create))
        .route("/events/:id/", get(events::get).patch(events::update))
        .route("/events/:id/activate/", patch(events::activate))
        .route("/events/:id/deactivate/", patch(events::deactivate))
        .route(
            "/events/category/",
            get(events::list_categories).post(events::create_category),
        )
        .route(
            "/events/category/:id/activate/",
            patch(events::activate_category),
        )
        .route(
            "/events/category/:id/deactivate/",
            patch(events::deactivate_category),
        )
        .route(
            "/events/:id/comments/",
            get(events::list_comments).post(events::create_comment),
        )
        // Cart
        .route("/cart/", get(cart::list))
        .route("/cart/add/", post(cart::add))
        .route("/cart/update/:id/", patch(cart::update))
        .route("/cart/remove/:id/", delete(cart::remove))
        // Orders
        .route("/orders/checkout/", post(orders::checkout))
        .route("/orders/admin/orders/", get(orders::list_all))
        .route("/orders/admin/orders/:id/", get(orders::detail))
        .route("/orders/admin/stats/", get(orders::stats))
        .route(
            "/orders/admin/orders/:id/update-status/",
            patch(orders::update_status),
        )
        // Blog
        .route("/blog/", get(blogs::list).post(blogs::create))
        .route("/blog/:id/", get(blogs::get).patch(blogs::update))
        .route("/blog/:id/activate/", patch(blogs::activate))
        .route("/blog/:id/deactivate/", patch(blogs::deactivate))
        .route(
            "/blog/categories/",
            get(blogs::list_categories).post(blogs::create_category),
        )
        .route(
            "/blog/:id/comments/",
            get(blogs::list_comments).post(blogs::create_comment),
        )
        // News
        .route("/news/", get(news::list).post(news::create))
        .route(
            "/news/category/",
            get(news::list_categories).post(news::create_category),
        )
        .route(
            "/news/comment/",
            get(news::list_comments).post(news::create_comment),
        )
        .route(
            "/news/letter/",
            get(news::list_subscribers).post(news::subscribe),
        )
        // Case studies
        .route(
            "/casestudy/",
            get(case_studies::list).post(case_studies::create),
        )
        .route(
            "/casestudy/category/",
            get(case_studies::list_categories).post(case_studies::create_category),
        )
        .route(
            "/casestudy/comment/",
            get(case_studies::list_comments).post(case_studies::create_comment),
        )
        // Services
        .route("/services/", get(services::list).post(services::create))
        .route("/services/:id/", get(services::get).patch(services::update))
        .route("/services/:id/activate/", patch(services::activate))
        .route("/services/:id/deactivate/", patch(services::deactivate))
        .route(
            "/services/tags/",
            get(services::list_tags).post(services::create_tag),
        )
        .route(
            "/services/category/",
            get(services::list_categories).post(services::create_category),
        )
        .route(
            "/services/category/:id/activate/",
            patch(services::activate_category),
        )
        .route(
            "/services/category/:id/deactivate/",
            patch(services::deactivate_category),
        )
        // Industries
        .route(
            "/industry/",
            get(industries::list).post(industries::create),
        )
        .route(
            "/industry/tags/",
            get(industries::list_tags).post(industries::create_tag),
        )
        // Hero banners
        .route("/hero/", get(heroes::list).post(heroes::create))
        .route("/hero/:id/", get(heroes::get))
        .route("/hero/:id/activate", patch(heroes::activate))
        .route("/hero/:id/deactivate", patch(heroes::deactivate))
        .route("/hero/edit/:id/", patch(heroes::update))
        // Contact
        .route(
            "/contactdetail/contactdetails/",
            get(contact::list_details).post(contact::create_detail),
        )
        .route(
            "/contactdetail/contactformslist/",
            get(contact::list_forms).post(contact::create_form),
        )
        .route("/contactdetail/contactformsview/:id/", get(contact::get_form))
        // About
        .route("/about/", get(about::list).post(about::create))
        // Adoption
        .route("/adoption/", get(adoptions::list).post(adoptions::create))
        .route(
            "/adoption/:id/",
            get(adoptions::get).patch(adoptions::update),
        )
        .route("/adoption/:id/activate/", patch(adoptions::activate))
        .route("/adoption/:id/deactivate/", patch(adoptions::deactivate))
        // Media uploads
        .route("/uploads/", post(uploads::upload));

    let media_dir = state.config.uploads.dir.clone();

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .nest("/api", api_routes)
        .nest_service("/media", ServeDir::new(media_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(storefront_web::request_id_layer())
        .with_state(state)
}
