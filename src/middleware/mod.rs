pub mod auth;
pub mod authorize;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use authorize::require_roles;
