//! Company contact details and contact-form endpoints.

use crate::auth::AuthUser;
use crate::server::state::AppState;
use crate::store::contact::{self, NewContactDetail};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use storefront_web::{AppError, WebResult};

/// Payload for creating a contact-detail record.
#[derive(Debug, Deserialize)]
pub struct CreateContactDetailRequest {
    /// Company name.
    pub name: String,
    /// Company description.
    #[serde(default)]
    pub company_description: String,
    /// Postal address.
    #[serde(default)]
    pub company_address: String,
    /// Phone number.
    #[serde(default)]
    pub company_contact: String,
    /// Relative logo path.
    pub company_logo: Option<String>,
    /// City.
    #[serde(default)]
    pub city: String,
    /// State.
    #[serde(default)]
    pub state: String,
    /// Postal code.
    #[serde(default)]
    pub postal_code: String,
    /// Map embed URL.
    pub google_map_url: Option<String>,
    /// Founding year.
    pub established_year: i32,
}

/// Payload for a contact-form submission.
#[derive(Debug, Deserialize)]
pub struct CreateContactFormRequest {
    /// Reply e-mail, if given.
    pub email: Option<String>,
    /// Subject line.
    pub title: String,
    /// Message body.
    pub message: String,
}

/// List contact-detail records.
pub async fn list_details(
    _user: AuthUser,
    State(state): State<AppState>,
) -> WebResult<Json<Vec<contact::ContactDetailRow>>> {
    Ok(Json(contact::list_details(&state.pool).await?))
}

/// Create a contact-detail record.
pub async fn create_detail(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateContactDetailRequest>,
) -> WebResult<(StatusCode, Json<contact::ContactDetailRow>)> {
    if request.name.trim().is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    let row = contact::create_detail(
        &state.pool,
        NewContactDetail {
            name: request.name.trim().to_string(),
            company_description: request.company_description,
            company_address: request.company_address,
            company_contact: request.company_contact,
            company_logo: request.company_logo,
            city: request.city,
            state: request.state,
            postal_code: request.postal_code,
            google_map_url: request.google_map_url,
            established_year: request.established_year,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// List contact-form submissions.
pub async fn list_forms(
    _user: AuthUser,
    State(state): State<AppState>,
) -> WebResult<Json<Vec<contact::ContactFormRow>>> {
    Ok(Json(contact::list_forms(&state.pool).await?))
}

/// Submit a contact form; the caller is recorded as the submitter.
pub async fn create_form(
    user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateContactFormRequest>,
) -> WebResult<(StatusCode, Json<contact::ContactFormRow>)> {
    if request.title.trim().is_empty() {
        return Err(AppError::validation("Title is required"));
    }
    if request.message.trim().is_empty() {
        return Err(AppError::validation("Message is required"));
    }
    let row = contact::create_form(
        &state.pool,
        Some(user.id),
        request.email,
        request.title.trim(),
        &request.message,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Fetch one contact-form submission.
pub async fn get_form(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<contact::ContactFormRow>> {
    Ok(Json(contact::fetch_form(&state.pool, id).await?))
}
