//! Pet adoption endpoints.

use super::Message;
use crate::auth::AuthUser;
use crate::server::state::AppState;
use crate::store::adoptions::{self, AdoptionPatch, NewAdoption};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use storefront_web::{AppError, WebResult};

/// Payload for creating a listing.
#[derive(Debug, Deserialize)]
pub struct CreateAdoptionRequest {
    /// Pet name.
    pub pet_name: String,
    /// Breed.
    pub pet_breed: String,
    /// Age in years.
    pub pet_age: i32,
    /// Gender.
    #[serde(default)]
    pub pet_gender: String,
    /// Coat color.
    #[serde(default)]
    pub pet_color: String,
    /// Personality notes.
    #[serde(default)]
    pub pet_personality: String,
    /// Weight in kilograms.
    pub pet_weight: f64,
    /// Energy level.
    #[serde(default)]
    pub pet_energy_level: String,
    /// Known conditions.
    #[serde(default)]
    pub pet_disease: String,
    /// Vaccination status.
    #[serde(default)]
    pub pet_vaccinated_status: String,
    /// Relative media path.
    #[serde(default)]
    pub pet_image: String,
    /// Listing description.
    #[serde(default)]
    pub description: String,
}

/// Payload for a partial update.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAdoptionRequest {
    /// Replacement pet name.
    pub pet_name: Option<String>,
    /// Replacement breed.
    pub pet_breed: Option<String>,
    /// Replacement age.
    pub pet_age: Option<i32>,
    /// Replacement gender.
    pub pet_gender: Option<String>,
    /// Replacement color.
    pub pet_color: Option<String>,
    /// Replacement personality notes.
    pub pet_personality: Option<String>,
    /// Replacement weight.
    pub pet_weight: Option<f64>,
    /// Replacement energy level.
    pub pet_energy_level: Option<String>,
    /// Replacement condition notes.
    pub pet_disease: Option<String>,
    /// Replacement vaccination status.
    pub pet_vaccinated_status: Option<String>,
    /// Replacement media path.
    pub pet_image: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
}

/// List all listings. Public.
pub async fn list(State(state): State<AppState>) -> WebResult<Json<Vec<adoptions::AdoptionRow>>> {
    Ok(Json(adoptions::list(&state.pool).await?))
}

/// Fetch one listing.
pub async fn get(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<adoptions::AdoptionRow>> {
    Ok(Json(adoptions::fetch(&state.pool, id).await?))
}

/// Create a listing.
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<CreateAdoptionRequest>,
) -> WebResult<(StatusCode, Json<adoptions::AdoptionRow>)> {
    if request.pet_name.trim().is_empty() {
        return Err(AppError::validation("Pet name is required"));
    }
    if request.pet_age < 0 {
        return Err(AppError::validation("Pet age must not be negative"));
    }

    let row = adoptions::create(
        &state.pool,
        NewAdoption {
            pet_name: request.pet_name.trim().to_string(),
            pet_breed: request.pet_breed,
            pet_age: request.pet_age,
            pet_gender: request.pet_gender,
            pet_color: request.pet_color,
            pet_personality: request.pet_personality,
            pet_weight: request.pet_weight,
            pet_energy_level: request.pet_energy_level,
            pet_disease: request.pet_disease,
            pet_vaccinated_status: request.pet_vaccinated_status,
            pet_image: request.pet_image,
            description: request.description,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Partially update a listing.
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateAdoptionRequest>,
) -> WebResult<Json<adoptions::AdoptionRow>> {
    let row = adoptions::update(
        &state.pool,
        id,
        AdoptionPatch {
            pet_name: request.pet_name,
            pet_breed: request.pet_breed,
            pet_age: request.pet_age,
            pet_gender: request.pet_gender,
            pet_color: request.pet_color,
            pet_personality: request.pet_personality,
            pet_weight: request.pet_weight,
            pet_energy_level: request.pet_energy_level,
            pet_disease: request.pet_disease,
            pet_vaccinated_status: request.pet_vaccinated_status,
            pet_image: request.pet_image,
            description: request.description,
        },
    )
    .await?;
    Ok(Json(row))
}

/// Activate a listing.
pub async fn activate(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Message>> {
    adoptions::set_status(&state.pool, id, true).await?;
    Ok(Json(Message::new("Adoption activated successfully!")))
}

/// Deactivate a listing.
pub async fn deactivate(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> WebResult<Json<Message>> {
    adoptions::set_status(&state.pool, id, false).await?;
    Ok(Json(Message::new("Adoption deactivated successfully!")))
}
