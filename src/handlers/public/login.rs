use axum::{extract::State, Json};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::ApiError;
use crate::services::{AuthService, LoginResponse};

/// Fields are optional so that missing ones produce a 400 with a clear
/// message rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub identifier: Option<String>,
    pub password_hash: Option<String>,
}

/// POST /login - verify credentials and issue a session token
pub async fn login(
    State(pool): State<PgPool>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let identifier = payload
        .identifier
        .as_deref()
        .filter(|s| !s.is_empty());
    let password_hash = payload
        .password_hash
        .as_deref()
        .filter(|s| !s.is_empty());

    let (identifier, password_hash) = match (identifier, password_hash) {
        (Some(i), Some(p)) => (i, p),
        _ => {
            return Err(ApiError::bad_request(
                "identifier and password_hash are required",
            ))
        }
    };

    let response = AuthService::new(pool).login(identifier, password_hash).await?;
    Ok(Json(response))
}
