//! HTTP surface tests: registration/token flow, public vs authenticated
//! reads, and the uniform CRUD shape on a content resource.
//!
//! Like the checkout tests, these need `DATABASE_URL` and skip without it.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code uses unwrap/expect

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use storefront::{build_router, AppState, Config};
use tower::ServiceExt;
use uuid::Uuid;

async fn try_app() -> Option<(Router, PgPool)> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .ok()?;
    sqlx::migrate!("./migrations").run(&pool).await.ok()?;
    let state = AppState::new(pool.clone(), Config::from_env());
    Some((build_router(state), pool))
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a fresh user and log in; returns (username, access token).
async fn register_and_login(app: &Router) -> (String, String) {
    let username = format!("user-{}", Uuid::new_v4().simple());

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/user/register/",
            None,
            serde_json::json!({
                "username": username,
                "email": "someone@example.com",
                "password": "password123",
                "first_name": "Sam",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/token/",
            None,
            serde_json::json!({"username": username, "password": "password123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let tokens = body_json(response).await;
    let access = tokens["access"].as_str().unwrap().to_string();

    (username, access)
}

#[tokio::test]
async fn register_login_and_fetch_own_profile() {
    let Some((app, _pool)) = try_app().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let (username, access) = register_and_login(&app).await;

    let request = Request::builder()
        .uri("/api/user/")
        .header(header::AUTHORIZATION, format!("Bearer {access}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let profile = body_json(response).await;
    assert_eq!(profile["username"], username.as_str());
    assert_eq!(profile["is_staff"], false);
    // Credential material never leaves the server.
    assert!(profile.get("password_hash").is_none());
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let Some((app, _pool)) = try_app().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let (username, _) = register_and_login(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/token/",
            None,
            serde_json::json!({"username": username, "password": "wrong-password"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_username_fails_validation() {
    let Some((app, _pool)) = try_app().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let (username, _) = register_and_login(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/user/register/",
            None,
            serde_json::json!({"username": username, "password": "password123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn public_reads_need_no_token_while_writes_do() {
    let Some((app, _pool)) = try_app().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };

    // Public reads
    for uri in ["/api/product/", "/api/events/", "/api/services/", "/api/hero/", "/api/cart/"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "read of {uri}");
    }

    // Writes without a token are rejected
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/product/",
            None,
            serde_json::json!({"name": "Leash", "price_cents": 999}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn blog_crud_follows_the_uniform_shape() {
    let Some((app, _pool)) = try_app().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let (_, access) = register_and_login(&app).await;

    // Create
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/blog/",
            Some(&access),
            serde_json::json!({"title": "Grand opening", "content": "We are live."}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["status"], true);

    // Partial update leaves unspecified fields alone
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/blog/{id}/"),
            Some(&access),
            serde_json::json!({"title": "Grand opening, updated"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["title"], "Grand opening, updated");
    assert_eq!(updated["content"], "We are live.");

    // Deactivate then fetch: the flag flips, the row survives
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/blog/{id}/deactivate/"),
            Some(&access),
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder()
        .uri(format!("/api/blog/{id}/"))
        .header(header::AUTHORIZATION, format!("Bearer {access}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], false);

    // Missing ids are a structured 404
    let request = Request::builder()
        .uri("/api/blog/999999999/")
        .header(header::AUTHORIZATION, format!("Bearer {access}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error = body_json(response).await;
    assert_eq!(error["code"], "NOT_FOUND");
    assert_eq!(error["message"], "Blog with id 999999999 not found");
}

#[tokio::test]
async fn admin_order_surface_requires_staff() {
    let Some((app, pool)) = try_app().await else {
        eprintln!("skipping: DATABASE_URL not set");
        return;
    };
    let (username, access) = register_and_login(&app).await;

    // A regular user is forbidden
    let request = Request::builder()
        .uri("/api/orders/admin/orders/")
        .header(header::AUTHORIZATION, format!("Bearer {access}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Promote and retry
    sqlx::query("UPDATE users SET is_staff = TRUE WHERE username = $1")
        .bind(&username)
        .execute(&pool)
        .await
        .unwrap();

    let request = Request::builder()
        .uri("/api/orders/admin/stats/")
        .header(header::AUTHORIZATION, format!("Bearer {access}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stats = body_json(response).await;
    assert!(stats["order_count"].as_i64().unwrap() >= 0);
    assert!(stats["user_count"].as_i64().unwrap() >= 1);
}
