use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::PgPool;

use crate::database::models::{Application, ApplicationView};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::ApplicationService;

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub profile_code: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    pub profile_code: Option<i32>,
    pub entry_number: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SettleRequest {
    pub profile_code: Option<i32>,
}

/// GET /applications - applications visible to the caller, with profile info
pub async fn list(
    State(pool): State<PgPool>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<ApplicationView>>, ApiError> {
    let applications = ApplicationService::new(pool).list_applications(&user).await?;
    Ok(Json(applications))
}

/// POST /apply - student applies to a profile
pub async fn apply(
    State(pool): State<PgPool>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<Application>), ApiError> {
    let profile_code = payload
        .profile_code
        .ok_or_else(|| ApiError::bad_request("profile_code is required"))?;

    let application = ApplicationService::new(pool).apply(&user, profile_code).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// POST /application/change_status - recruiter or admin sets an applicant's status
pub async fn change_status(
    State(pool): State<PgPool>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ChangeStatusRequest>,
) -> Result<Json<Application>, ApiError> {
    let (profile_code, entry_number, status) = match (
        payload.profile_code,
        payload.entry_number.as_deref(),
        payload.status.as_deref(),
    ) {
        (Some(code), Some(entry), Some(status)) if !entry.is_empty() && !status.is_empty() => {
            (code, entry, status)
        }
        _ => {
            return Err(ApiError::bad_request(
                "profile_code, entry_number, and status are required",
            ))
        }
    };

    let application = ApplicationService::new(pool)
        .change_status(&user, profile_code, entry_number, status)
        .await?;
    Ok(Json(application))
}

/// POST /application/accept - student accepts a Selected application
pub async fn accept(
    State(pool): State<PgPool>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<SettleRequest>,
) -> Result<Json<Application>, ApiError> {
    let profile_code = payload
        .profile_code
        .ok_or_else(|| ApiError::bad_request("profile_code is required"))?;

    let application = ApplicationService::new(pool).accept(&user, profile_code).await?;
    Ok(Json(application))
}

/// POST /application/reject - student turns down an application
pub async fn reject(
    State(pool): State<PgPool>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<SettleRequest>,
) -> Result<Json<Application>, ApiError> {
    let profile_code = payload
        .profile_code
        .ok_or_else(|| ApiError::bad_request("profile_code is required"))?;

    let application = ApplicationService::new(pool).reject(&user, profile_code).await?;
    Ok(Json(application))
}
