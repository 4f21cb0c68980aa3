use sqlx::PgPool;
use thiserror::Error;

use crate::database::models::{Profile, Role};
use crate::middleware::AuthUser;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("recruiter_email is required for admin")]
    MissingRecruiterEmail,
    #[error("caller may not create profiles")]
    NotPermitted,
    #[error("{0}")]
    Storage(&'static str),
}

impl ProfileError {
    fn storage(message: &'static str, err: sqlx::Error) -> Self {
        tracing::error!("{}: {}", message, err);
        ProfileError::Storage(message)
    }
}

const PROFILE_COLUMNS: &str =
    "profile_code, recruiter_email, company_name, designation, created_at";

/// Profile directory: listing and creation. Profiles are never updated or
/// deleted after creation.
pub struct ProfileService {
    pool: PgPool,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List profiles ordered by code. Recruiters see only their own
    /// postings; students and admins see all.
    pub async fn list_profiles(&self, user: &AuthUser) -> Result<Vec<Profile>, ProfileError> {
        const FAILED: &str = "Failed to fetch profiles";

        let rows = match user.role {
            Role::Recruiter => {
                let sql = format!(
                    "SELECT {} FROM profile WHERE recruiter_email = $1 ORDER BY profile_code",
                    PROFILE_COLUMNS
                );
                sqlx::query_as(&sql)
                    .bind(&user.identifier)
                    .fetch_all(&self.pool)
                    .await
            }
            Role::Student | Role::Admin => {
                let sql = format!(
                    "SELECT {} FROM profile ORDER BY profile_code",
                    PROFILE_COLUMNS
                );
                sqlx::query_as(&sql).fetch_all(&self.pool).await
            }
        };

        rows.map_err(|e| ProfileError::storage(FAILED, e))
    }

    /// Create a profile. A recruiter always creates for themselves (any
    /// submitted recruiter_email is ignored); an admin must name the owning
    /// recruiter explicitly.
    pub async fn create_profile(
        &self,
        user: &AuthUser,
        company_name: &str,
        designation: &str,
        recruiter_email: Option<&str>,
    ) -> Result<Profile, ProfileError> {
        let owner = match user.role {
            Role::Recruiter => user.identifier.as_str(),
            Role::Admin => recruiter_email
                .filter(|e| !e.is_empty())
                .ok_or(ProfileError::MissingRecruiterEmail)?,
            Role::Student => return Err(ProfileError::NotPermitted),
        };

        let sql = format!(
            "INSERT INTO profile (recruiter_email, company_name, designation) \
             VALUES ($1, $2, $3) RETURNING {}",
            PROFILE_COLUMNS
        );
        sqlx::query_as(&sql)
            .bind(owner)
            .bind(company_name)
            .bind(designation)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ProfileError::storage("Failed to create profile", e))
    }
}
