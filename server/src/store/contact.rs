//! Company contact details and contact-form submissions.

use super::{Result, StoreError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

/// A company contact-detail row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ContactDetailRow {
    /// Primary key.
    pub id: i64,
    /// Company name.
    pub name: String,
    /// Company description.
    pub company_description: String,
    /// Postal address.
    pub company_address: String,
    /// Phone number.
    pub company_contact: String,
    /// Relative logo path, if any.
    pub company_logo: Option<String>,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// Postal code.
    pub postal_code: String,
    /// Map embed URL, if any.
    pub google_map_url: Option<String>,
    /// Founding year.
    pub established_year: i32,
}

/// A contact-form submission row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ContactFormRow {
    /// Primary key.
    pub id: i64,
    /// Submitting user, if known.
    pub user_id: Option<i64>,
    /// Reply e-mail, if given.
    pub email: Option<String>,
    /// Subject line.
    pub title: String,
    /// Message body.
    pub message: String,
    /// Open flag.
    pub status: bool,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
}

/// Fields for inserting a contact-detail record.
#[derive(Debug)]
pub struct NewContactDetail {
    /// Company name.
    pub name: String,
    /// Company description.
    pub company_description: String,
    /// Postal address.
    pub company_address: String,
    /// Phone number.
    pub company_contact: String,
    /// Relative logo path, if any.
    pub company_logo: Option<String>,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// Postal code.
    pub postal_code: String,
    /// Map embed URL, if any.
    pub google_map_url: Option<String>,
    /// Founding year.
    pub established_year: i32,
}

/// List contact-detail records.
///
/// # Errors
///
/// Database failures only.
pub async fn list_details(pool: &PgPool) -> Result<Vec<ContactDetailRow>> {
    let rows = sqlx::query_as::<_, ContactDetailRow>("SELECT * FROM contact_details ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Insert a contact-detail record.
///
/// # Errors
///
/// Database failures only.
pub async fn create_detail(pool: &PgPool, detail: NewContactDetail) -> Result<ContactDetailRow> {
    let row = sqlx::query_as::<_, ContactDetailRow>(
        "INSERT INTO contact_details
             (name, company_description, company_address, company_contact, company_logo,
              city, state, postal_code, google_map_url, established_year)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING *",
    )
    .bind(detail.name)
    .bind(detail.company_description)
    .bind(detail.company_address)
    .bind(detail.company_contact)
    .bind(detail.company_logo)
    .bind(detail.city)
    .bind(detail.state)
    .bind(detail.postal_code)
    .bind(detail.google_map_url)
    .bind(detail.established_year)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// List contact-form submissions, newest first.
///
/// # Errors
///
/// Database failures only.
pub async fn list_forms(pool: &PgPool) -> Result<Vec<ContactFormRow>> {
    let rows = sqlx::query_as::<_, ContactFormRow>(
        "SELECT * FROM contact_forms ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Fetch a single submission.
///
/// # Errors
///
/// [`StoreError::NotFound`] on a miss.
pub async fn fetch_form(pool: &PgPool, id: i64) -> Result<ContactFormRow> {
    sqlx::query_as::<_, ContactFormRow>("SELECT * FROM contact_forms WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "Contact form",
            id,
        })
}

/// Insert a contact-form submission.
///
/// # Errors
///
/// Database failures only.
pub async fn create_form(
    pool: &PgPool,
    user_id: Option<i64>,
    email: Option<String>,
    title: &str,
    message: &str,
) -> Result<ContactFormRow> {
    let row = sqlx::query_as::<_, ContactFormRow>(
        "INSERT INTO contact_forms (user_id, email, title, message)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(user_id)
    .bind(email)
    .bind(title)
    .bind(message)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Count open contact forms (dashboard statistics).
///
/// # Errors
///
/// Database failures only.
pub async fn count_open_forms(pool: &PgPool) -> Result<i64> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM contact_forms WHERE status = TRUE")
            .fetch_one(pool)
            .await?;
    Ok(count)
}
