//! Pet adoption listings.

use super::{Result, StoreError};
use serde::Serialize;
use sqlx::PgPool;

/// An adoption listing row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AdoptionRow {
    /// Primary key.
    pub id: i64,
    /// Pet name.
    pub pet_name: String,
    /// Breed.
    pub pet_breed: String,
    /// Age in years.
    pub pet_age: i32,
    /// Gender.
    pub pet_gender: String,
    /// Coat color.
    pub pet_color: String,
    /// Personality notes.
    pub pet_personality: String,
    /// Weight in kilograms.
    pub pet_weight: f64,
    /// Energy level.
    pub pet_energy_level: String,
    /// Known conditions.
    pub pet_disease: String,
    /// Vaccination status.
    pub pet_vaccinated_status: String,
    /// Relative media path.
    pub pet_image: String,
    /// Listing description.
    pub description: String,
    /// Active flag.
    pub status: bool,
}

/// Fields for creating a listing.
#[derive(Debug)]
pub struct NewAdoption {
    /// Pet name.
    pub pet_name: String,
    /// Breed.
    pub pet_breed: String,
    /// Age in years.
    pub pet_age: i32,
    /// Gender.
    pub pet_gender: String,
    /// Coat color.
    pub pet_color: String,
    /// Personality notes.
    pub pet_personality: String,
    /// Weight in kilograms.
    pub pet_weight: f64,
    /// Energy level.
    pub pet_energy_level: String,
    /// Known conditions.
    pub pet_disease: String,
    /// Vaccination status.
    pub pet_vaccinated_status: String,
    /// Relative media path.
    pub pet_image: String,
    /// Listing description.
    pub description: String,
}

/// Optional fields for a partial update.
#[derive(Debug, Default)]
pub struct AdoptionPatch {
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

/// List all adoption listings.
///
/// # Errors
///
/// Database failures only.
pub async fn list(pool: &PgPool) -> Result<Vec<AdoptionRow>> {
    let rows = sqlx::query_as::<_, AdoptionRow>("SELECT * FROM adoptions ORDER BY id DESC")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Fetch a listing by id.
///
/// # Errors
///
/// [`StoreError::NotFound`] on a miss.
pub async fn fetch(pool: &PgPool, id: i64) -> Result<AdoptionRow> {
    sqlx::query_as::<_, AdoptionRow>("SELECT * FROM adoptions WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "Adoption record",
            id,
        })
}

/// Insert a listing.
///
/// # Errors
///
/// Database failures only.
pub async fn create(pool: &PgPool, adoption: NewAdoption) -> Result<AdoptionRow> {
    let row = sqlx::query_as::<_, AdoptionRow>(
        "INSERT INTO adoptions
             (pet_name, pet_breed, pet_age, pet_gender, pet_color, pet_personality, pet_weight,
              pet_energy_level, pet_disease, pet_vaccinated_status, pet_image, description)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
         RETURNING *",
    )
    .bind(adoption.pet_name)
    .bind(adoption.pet_breed)
    .bind(adoption.pet_age)
    .bind(adoption.pet_gender)
    .bind(adoption.pet_color)
    .bind(adoption.pet_personality)
    .bind(adoption.pet_weight)
    .bind(adoption.pet_energy_level)
    .bind(adoption.pet_disease)
    .bind(adoption.pet_vaccinated_status)
    .bind(adoption.pet_image)
    .bind(adoption.description)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Apply a partial update; absent fields keep their stored values.
///
/// # Errors
///
/// [`StoreError::NotFound`] on a miss.
pub async fn update(pool: &PgPool, id: i64, patch: AdoptionPatch) -> Result<AdoptionRow> {
    sqlx::query_as::<_, AdoptionRow>(
        "UPDATE adoptions
         SET pet_name              = COALESCE($2, pet_name),
             pet_breed             = COALESCE($3, pet_breed),
             pet_age               = COALESCE($4, pet_age),
             pet_gender            = COALESCE($5, pet_gender),
             pet_color             = COALESCE($6, pet_color),
             pet_personality       = COALESCE($7, pet_personality),
             pet_weight            = COALESCE($8, pet_weight),
             pet_energy_level      = COALESCE($9, pet_energy_level),
             pet_disease           = COALESCE($10, pet_disease),
             pet_vaccinated_status = COALESCE($11, pet_vaccinated_status),
             pet_image             = COALESCE($12, pet_image),
             description           = COALESCE($13, description)
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(patch.pet_name)
    .bind(patch.pet_breed)
    .bind(patch.pet_age)
    .bind(patch.pet_gender)
    .bind(patch.pet_color)
    .bind(patch.pet_personality)
    .bind(patch.pet_weight)
    .bind(patch.pet_energy_level)
    .bind(patch.pet_disease)
    .bind(patch.pet_vaccinated_status)
    .bind(patch.pet_image)
    .bind(patch.description)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::NotFound {
        entity: "Adoption record",
        id,
    })
}

/// Flip a listing's active flag.
///
/// # Errors
///
/// [`StoreError::NotFound`] on a miss.
pub async fn set_status(pool: &PgPool, id: i64, status: bool) -> Result<()> {
    let result = sqlx::query("UPDATE adoptions SET status = $2 WHERE id = $1")
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound {
            entity: "Adoption record",
            id,
        });
    }
    Ok(())
}
