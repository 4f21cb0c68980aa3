use axum::{
    extract::{Extension, State},
    Json,
};
use sqlx::PgPool;

use crate::database::models::UserInfo;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::UserService;

/// GET /users/me - the caller's own directory entry
pub async fn me(
    State(pool): State<PgPool>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserInfo>, ApiError> {
    let info = UserService::new(pool).get_me(&user.identifier).await?;
    Ok(Json(info))
}

/// GET /users - every account (admin only)
pub async fn list(State(pool): State<PgPool>) -> Result<Json<Vec<UserInfo>>, ApiError> {
    let users = UserService::new(pool).list_users().await?;
    Ok(Json(users))
}
