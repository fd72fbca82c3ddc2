//! Integration tests for the cart → order checkout flow.
//!
//! These run against a real `PostgreSQL` database. Set `DATABASE_URL` to
//! run them; without it every test skips cleanly so the suite stays green
//! on machines without a database.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code uses unwrap/expect

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{Duration, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use storefront::auth::password;
use storefront::store::{cart, events, orders, products, sessions, users, StoreError};
use storefront::types::{CartItemKind, Money};
use storefront::{build_router, AppState, Config};
use tower::ServiceExt;
use uuid::Uuid;

/// Connect and migrate, or `None` when `DATABASE_URL` is unset/unreachable.
async fn try_pool() -> Option<PgPool> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .ok()?;
    sqlx::migrate!("./migrations").run(&pool).await.ok()?;
    Some(pool)
}

async fn create_user(pool: &PgPool) -> i64 {
    let username = format!("buyer-{}", Uuid::new_v4().simple());
    let digest = password::hash_password("password123", 10);
    users::create(pool, &username, "buyer@example.com", &digest, "", "")
        .await
        .expect("user created")
        .id
}

async fn create_product(pool: &PgPool, price_cents: i64) -> i64 {
    products::create(
        pool,
        products::NewProduct {
            category_id: None,
            created_by: None,
            name: "Chew Toy",
            description: "",
            price_cents: Money::from_cents(price_cents),
            image: "",
        },
    )
    .await
    .expect("product created")
    .id
}

async fn create_event(pool: &PgPool, price_cents: i64) -> i64 {
    events::create(
        pool,
        events::NewEvent {
            category_id: None,
            created_by: None,
            name: "Adoption Day".to_string(),
            description: String::new(),
            date: String::new(),
            time: String::new(),
            location: String::new(),
            price_cents: Money::from_cents(price_cents),
            image: String::new(),
            duration: String::new(),
            contact_name: String::new(),
            contact_number: String::new(),
        },
    )
    .await
    .expect("event created")
    .id
}

async fn add_cart_row(
    pool: &PgPool,
    user_id: i64,
    kind: CartItemKind,
    product_id: Option<i64>,
    event_id: Option<i64>,
    quantity: i32,
    total_cents: i64,
) -> i64 {
    cart::insert(
        pool,
        user_id,
        kind,
        product_id,
        event_id,
        quantity,
        Money::from_cents(total_cents),
    )
    .await
    .expect("cart row inserted")
    .id
}

async fn orders_for_user(pool: &PgPool, user_id: i64) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .expect("count query");
    count
}

#[tokio::test]
async fn empty_cart_checkout_fails_and_writes_nothing() {
    let Some(pool) = try_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let user_id = create_user(&pool).await;

    let result = orders::checkout(&pool, user_id).await;
    assert!(matches!(result, Err(StoreError::EmptyCart)));

    assert_eq!(orders_for_user(&pool, user_id).await, 0);
    let (items,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM order_items WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .expect("count query");
    assert_eq!(items, 0);
}

#[tokio::test]
async fn mixed_cart_checkout_creates_one_order_with_all_lines() {
    let Some(pool) = try_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let user_id = create_user(&pool).await;
    let product_id = create_product(&pool, 1500).await;
    let event_id = create_event(&pool, 2500).await;

    // Two units of the product, one event ticket.
    add_cart_row(&pool, user_id, CartItemKind::Product, Some(product_id), None, 2, 3000).await;
    add_cart_row(&pool, user_id, CartItemKind::Event, None, Some(event_id), 1, 2500).await;

    let summary = orders::checkout(&pool, user_id).await.expect("checkout");
    assert_eq!(summary.total_amount_cents, Money::from_cents(5500));
    assert!(summary.order_ref.starts_with("ORD-"));
    assert!(summary.payment_ref.starts_with("PAY-"));

    let (order, items) = orders::fetch_with_items(&pool, summary.order_id)
        .await
        .expect("order fetched");
    assert_eq!(order.payment_status, "paid");
    assert_eq!(order.status, "processing");
    assert_eq!(order.total_amount_cents, Money::from_cents(5500));
    assert_eq!(items.len(), 2);

    let product_line = items.iter().find(|i| i.kind == 1).expect("product line");
    assert_eq!(product_line.item_id, product_id);
    assert_eq!(product_line.quantity, 2);

    let event_line = items.iter().find(|i| i.kind == 2).expect("event line");
    assert_eq!(event_line.item_id, event_id);
    assert_eq!(event_line.quantity, 1);

    // The source cart is fully consumed.
    let active = cart::list_active_for_user(&pool, user_id)
        .await
        .expect("cart listed");
    assert!(active.is_empty());
}

#[tokio::test]
async fn second_checkout_is_a_noop_failure_never_a_duplicate_order() {
    let Some(pool) = try_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let user_id = create_user(&pool).await;
    let product_id = create_product(&pool, 1000).await;
    add_cart_row(&pool, user_id, CartItemKind::Product, Some(product_id), None, 1, 1000).await;

    orders::checkout(&pool, user_id).await.expect("first checkout");
    let second = orders::checkout(&pool, user_id).await;
    assert!(matches!(second, Err(StoreError::EmptyCart)));

    assert_eq!(orders_for_user(&pool, user_id).await, 1);
}

#[tokio::test]
async fn forty_dollar_product_scenario() {
    let Some(pool) = try_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    // One row: quantity 2, row total $40.
    let user_id = create_user(&pool).await;
    let product_id = create_product(&pool, 2000).await;
    add_cart_row(&pool, user_id, CartItemKind::Product, Some(product_id), None, 2, 4000).await;

    let summary = orders::checkout(&pool, user_id).await.expect("checkout");
    assert_eq!(summary.total_amount_cents, Money::from_cents(4000));
    assert_eq!(summary.total_amount_cents.to_string(), "$40.00");

    let (_, items) = orders::fetch_with_items(&pool, summary.order_id)
        .await
        .expect("order fetched");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].kind, 1);
    assert_eq!(items[0].item_id, product_id);
    assert_eq!(items[0].quantity, 2);
}

// ---------------------------------------------------------------------------
// HTTP-level tests
// ---------------------------------------------------------------------------

async fn app_and_token(pool: &PgPool, user_id: i64) -> (axum::Router, String) {
    let access = format!("test-{}", Uuid::new_v4().simple());
    let refresh = format!("test-{}", Uuid::new_v4().simple());
    sessions::create(
        pool,
        user_id,
        &access,
        &refresh,
        Utc::now() + Duration::hours(1),
        "",
        "",
    )
    .await
    .expect("session created");

    let state = AppState::new(pool.clone(), Config::from_env());
    (build_router(state), access)
}

#[tokio::test]
async fn removing_a_cart_row_is_idempotent_over_http() {
    let Some(pool) = try_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let user_id = create_user(&pool).await;
    let product_id = create_product(&pool, 500).await;
    let row_id =
        add_cart_row(&pool, user_id, CartItemKind::Product, Some(product_id), None, 1, 500).await;

    let (app, token) = app_and_token(&pool, user_id).await;

    for _ in 0..2 {
        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/cart/remove/{row_id}/"))
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let active = cart::list_active_for_user(&pool, user_id)
        .await
        .expect("cart listed");
    assert!(active.is_empty());
}

#[tokio::test]
async fn cart_add_rejects_mismatched_referents() {
    let Some(pool) = try_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let user_id = create_user(&pool).await;
    let event_id = create_event(&pool, 100).await;
    let (app, token) = app_and_token(&pool, user_id).await;

    // kind says product, referent is an event
    let bad_shapes = [
        serde_json::json!({"kind": "product", "event_id": event_id, "quantity": 1}),
        serde_json::json!({"kind": "product", "quantity": 1}),
        serde_json::json!({"kind": "event", "event_id": event_id, "quantity": 0}),
    ];

    for payload in bad_shapes {
        let request = Request::builder()
            .method("POST")
            .uri("/api/cart/add/")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // Nothing was written.
    let active = cart::list_active_for_user(&pool, user_id)
        .await
        .expect("cart listed");
    assert!(active.is_empty());
}

#[tokio::test]
async fn checkout_over_http_returns_cart_empty_code() {
    let Some(pool) = try_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let user_id = create_user(&pool).await;
    let (app, token) = app_and_token(&pool, user_id).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/orders/checkout/")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], "CART_EMPTY");
    assert_eq!(json["message"], "Nothing to purchase");
}

#[tokio::test]
async fn checkout_requires_authentication() {
    let Some(pool) = try_pool().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let state = AppState::new(pool.clone(), Config::from_env());
    let app = build_router(state);

    let request = Request::builder()
        .method("POST")
        .uri("/api/orders/checkout/")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
