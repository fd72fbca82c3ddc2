//! Product endpoints.
//!
//! - `GET  /api/product/` — list products (public)
//! - `POST /api/product/` — create a product
//! - `PATCH /api/product/:id/` — partial update
//! - `GET  /api/product/:id/` — fetch one product
//! - `PATCH /api/product/:id/activate/` / `…/deactivate/` — status toggles
//! - `GET/POST /api/product/category/` — categories
//! - `PATCH /api/product/category/:id/activate/` / `…/deactivate/`

use super::Message;
use crate::auth::AuthUser;
use crate::server::state::AppState;
use crate::store::products::{self, NewProduct, ProductPatch};
use crate::types::Money;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use storefront_web::{AppError, WebResult};

/// Payload for creating a product.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    /// Owning category, if any.
    pub category_id: Option<i64>,
    /// Display name.
    pub name: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Unit price in cents.
    pub price_cents: i64,
    /// Relative media path from the upload endpoint.
    #[serde(default)]
    pub image: String,
}

/// Payload for a partial product update.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    /// Replacement category.
    pub category_id: Option<i64>,
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement price in cents.
    pub price_cents: Option<i64>,
    /// Replacement media path.
    pub image: Option<String>,
}

/// Payload for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// Display name.
    pub name: String,
}

/// List all products. Public.
pub async fn list(State(state): State<AppState>) -> WebResult<Json<Vec<products::ProductRow>>> {
    Ok(Json(products::list(&state.pool).await?))
}

/// Fetch one product.
pub async fn get(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<products::ProductRow>> {
    Ok(Json(products::fetch(&state.pool, id).await?))
}

/// Create a product; the caller becomes `created_by`.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> WebResult<(StatusCode, Json<products::ProductRow>)> {
    if request.name.trim().is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    if request.price_cents < 0 {
        return Err(AppError::validation("Price must not be negative"));
    }

    let row = products::create(
        &state.pool,
        NewProduct {
            category_id: request.category_id,
            created_by: Some(user.id),
            name: request.name.trim(),
            description: &request.description,
            price_cents: Money::from_cents(request.price_cents),
            image: &request.image,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// Partially update a product.
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateProductRequest>,
) -> WebResult<Json<products::ProductRow>> {
    if matches!(request.price_cents, Some(p) if p < 0) {
        return Err(AppError::validation("Price must not be negative"));
    }

    let row = products::update(
        &state.pool,
        id,
        ProductPatch {
            category_id: request.category_id,
            name: request.name,
            description: request.description,
            price_cents: request.price_cents.map(Money::from_cents),
            image: request.image,
        },
    )
    .await?;

    Ok(Json(row))
}

/// Activate a product.
pub async fn activate(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Message>> {
    products::set_status(&state.pool, id, true).await?;
    Ok(Json(Message::new("Product activated successfully!")))
}

/// Deactivate a product.
pub async fn deactivate(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Message>> {
    products::set_status(&state.pool, id, false).await?;
    Ok(Json(Message::new("Product deactivated successfully!")))
}

/// List product categories.
pub async fn list_categories(
    _user: AuthUser,
    State(state): State<AppState>,
) -> WebResult<Json<Vec<products::ProductCategoryRow>>> {
    Ok(Json(products::list_categories(&state.pool).await?))
}

/// Create a product category. Names are unique, case-insensitively.
pub async fn create_category(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> WebResult<(StatusCode, Json<products::ProductCategoryRow>)> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    if products::category_name_exists(&state.pool, name).await? {
        return Err(AppError::validation(
            "Name already exists. Please use a different name.",
        ));
    }

    let row = products::create_category(&state.pool, name).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Activate a category.
pub async fn activate_category(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Message>> {
    products::set_category_status(&state.pool, id, true).await?;
    Ok(Json(Message::new("Category activated successfully!")))
}

/// Deactivate a category.
pub async fn deactivate_category(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Message>> {
    products::set_category_status(&state.pool, id, false).await?;
    Ok(Json(Message::new("Category deactivated successfully!")))
}
