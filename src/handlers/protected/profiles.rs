use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::PgPool;

use crate::database::models::Profile;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::ProfileService;

#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    pub company_name: Option<String>,
    pub designation: Option<String>,
    pub recruiter_email: Option<String>,
}

/// GET /profiles - profiles visible to the caller, ordered by code
pub async fn list(
    State(pool): State<PgPool>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Profile>>, ApiError> {
    let profiles = ProfileService::new(pool).list_profiles(&user).await?;
    Ok(Json(profiles))
}

/// POST /create_profile - recruiter (for themselves) or admin (for a named
/// recruiter) posts a new opening
pub async fn create(
    State(pool): State<PgPool>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<Profile>), ApiError> {
    let company_name = payload.company_name.as_deref().filter(|s| !s.is_empty());
    let designation = payload.designation.as_deref().filter(|s| !s.is_empty());

    let (company_name, designation) = match (company_name, designation) {
        (Some(c), Some(d)) => (c, d),
        _ => {
            return Err(ApiError::bad_request(
                "company_name and designation are required",
            ))
        }
    };

    let profile = ProfileService::new(pool)
        .create_profile(&user, company_name, designation, payload.recruiter_email.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}
