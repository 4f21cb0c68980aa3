pub mod application_service;
pub mod auth_service;
pub mod profile_service;
pub mod user_service;

pub use application_service::{ApplicationService, WorkflowError};
pub use auth_service::{AuthService, LoginResponse};
pub use profile_service::ProfileService;
pub use user_service::UserService;
