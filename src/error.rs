// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Internal(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Internal(msg) => msg,
        }
    }

    /// Convert to JSON response body. Every error body carries an `error`
    /// field; nothing else leaks to the client.
    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

// Convert service-layer error types to ApiError
impl From<crate::services::auth_service::AuthError> for ApiError {
    fn from(err: crate::services::auth_service::AuthError) -> Self {
        use crate::services::auth_service::AuthError;
        match err {
            AuthError::InvalidCredentials => ApiError::unauthorized("Invalid credentials"),
            AuthError::Storage(msg) => ApiError::internal(msg),
        }
    }
}

impl From<crate::services::application_service::WorkflowError> for ApiError {
    fn from(err: crate::services::application_service::WorkflowError) -> Self {
        use crate::services::application_service::WorkflowError;
        match err {
            WorkflowError::OfferAlreadyAccepted => {
                ApiError::forbidden("You have already accepted an offer")
            }
            WorkflowError::AlreadyApplied => {
                ApiError::bad_request("Already applied to this profile")
            }
            WorkflowError::InvalidStatus => ApiError::bad_request("Invalid status"),
            WorkflowError::NotProfileOwner => {
                ApiError::forbidden("You can only modify applications for your profiles")
            }
            WorkflowError::NotFound => ApiError::not_found("Application not found"),
            WorkflowError::NotSelectable => {
                ApiError::bad_request("Can only accept applications with Selected status")
            }
            WorkflowError::Storage(msg) => ApiError::internal(msg),
        }
    }
}

impl From<crate::services::profile_service::ProfileError> for ApiError {
    fn from(err: crate::services::profile_service::ProfileError) -> Self {
        use crate::services::profile_service::ProfileError;
        match err {
            ProfileError::MissingRecruiterEmail => {
                ApiError::bad_request("recruiter_email is required for admin")
            }
            ProfileError::NotPermitted => {
                ApiError::forbidden("Only recruiters and admins can create profiles")
            }
            ProfileError::Storage(msg) => ApiError::internal(msg),
        }
    }
}

impl From<crate::services::user_service::UserError> for ApiError {
    fn from(err: crate::services::user_service::UserError) -> Self {
        use crate::services::user_service::UserError;
        match err {
            UserError::NotFound => ApiError::not_found("User not found"),
            UserError::Storage(msg) => ApiError::internal(msg),
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status_codes() {
        assert_eq!(ApiError::bad_request("x").status_code(), 400);
        assert_eq!(ApiError::unauthorized("x").status_code(), 401);
        assert_eq!(ApiError::forbidden("x").status_code(), 403);
        assert_eq!(ApiError::not_found("x").status_code(), 404);
        assert_eq!(ApiError::internal("x").status_code(), 500);
    }

    #[test]
    fn json_body_carries_error_field() {
        let body = ApiError::forbidden("You have already accepted an offer").to_json();
        assert_eq!(body["error"], "You have already accepted an offer");
    }

    #[test]
    fn workflow_errors_map_to_http_statuses() {
        use crate::services::application_service::WorkflowError;

        let api: ApiError = WorkflowError::OfferAlreadyAccepted.into();
        assert_eq!(api.status_code(), 403);

        let api: ApiError = WorkflowError::AlreadyApplied.into();
        assert_eq!(api.status_code(), 400);

        let api: ApiError = WorkflowError::NotFound.into();
        assert_eq!(api.status_code(), 404);

        let api: ApiError = WorkflowError::Storage("Failed to apply").into();
        assert_eq!(api.status_code(), 500);
        assert_eq!(api.to_json()["error"], "Failed to apply");
    }
}
