use axum::{extract::Request, middleware::Next, response::Response};

use crate::database::models::Role;
use crate::error::ApiError;

use super::auth::AuthUser;

/// Role allow-list guard, applied per route group after JWT authentication.
///
/// Runs once before the handler body; callers whose role is not in the
/// allow-list never reach the handler or the store.
pub async fn require_roles(
    allowed: &'static [Role],
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    if !allowed.contains(&user.role) {
        tracing::debug!(
            "Role {} denied for route requiring one of {:?}",
            user.role,
            allowed
        );
        return Err(ApiError::forbidden("Insufficient permissions"));
    }

    Ok(next.run(request).await)
}
