use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A recruiter-posted job opening. `profile_code` is store-generated and the
/// owning `recruiter_email` never changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub profile_code: i32,
    pub recruiter_email: String,
    pub company_name: String,
    pub designation: String,
    pub created_at: DateTime<Utc>,
}
