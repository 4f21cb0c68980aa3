use sqlx::PgPool;
use thiserror::Error;

use crate::database::models::{
    Application, ApplicationStatus, ApplicationView, ApplicationWithProfile, Role,
};
use crate::middleware::AuthUser;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("already holds an accepted offer")]
    OfferAlreadyAccepted,
    #[error("already applied to this profile")]
    AlreadyApplied,
    #[error("invalid status")]
    InvalidStatus,
    #[error("caller does not own the target profile")]
    NotProfileOwner,
    #[error("application not found")]
    NotFound,
    #[error("application is not in Selected status")]
    NotSelectable,
    #[error("{0}")]
    Storage(&'static str),
}

impl WorkflowError {
    /// Wrap a store error, logging the real cause and keeping only the
    /// operation's generic client message.
    fn storage(message: &'static str, err: sqlx::Error) -> Self {
        tracing::error!("{}: {}", message, err);
        WorkflowError::Storage(message)
    }
}

const LIST_BASE: &str = "SELECT a.profile_code, a.entry_number, a.status, a.applied_at, \
     p.company_name, p.designation, p.recruiter_email \
     FROM application a \
     JOIN profile p ON p.profile_code = a.profile_code";

const APPLICATION_COLUMNS: &str = "profile_code, entry_number, status, applied_at";

/// The application status workflow: creation, role-scoped listing, and
/// status transitions.
///
/// Every multi-step operation here is a sequence of independent queries with
/// no wrapping transaction; row-level atomicity is the store's.
pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List applications visible to the caller, joined with profile fields.
    ///
    /// Students see their own rows; recruiters see rows on profiles they
    /// own (resolved via a pre-lookup of owned profile codes); admins see
    /// everything.
    pub async fn list_applications(
        &self,
        user: &AuthUser,
    ) -> Result<Vec<ApplicationView>, WorkflowError> {
        const FAILED: &str = "Failed to fetch applications";

        let rows: Vec<ApplicationWithProfile> = match user.role {
            Role::Student => {
                let sql = format!("{} WHERE a.entry_number = $1", LIST_BASE);
                sqlx::query_as(&sql)
                    .bind(&user.identifier)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(|e| WorkflowError::storage(FAILED, e))?
            }
            Role::Recruiter => {
                let codes: Vec<i32> =
                    sqlx::query_scalar("SELECT profile_code FROM profile WHERE recruiter_email = $1")
                        .bind(&user.identifier)
                        .fetch_all(&self.pool)
                        .await
                        .map_err(|e| WorkflowError::storage(FAILED, e))?;

                if codes.is_empty() {
                    return Ok(vec![]);
                }

                let sql = format!("{} WHERE a.profile_code = ANY($1)", LIST_BASE);
                sqlx::query_as(&sql)
                    .bind(&codes)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(|e| WorkflowError::storage(FAILED, e))?
            }
            Role::Admin => sqlx::query_as(LIST_BASE)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| WorkflowError::storage(FAILED, e))?,
        };

        Ok(rows.into_iter().map(ApplicationView::from).collect())
    }

    /// Create an application in state `Applied`.
    ///
    /// Fails if the student already holds an accepted offer anywhere, or has
    /// already applied to this profile. The existence checks and the insert
    /// are separate queries; two identical concurrent requests can race past
    /// the checks, matching the store's own uniqueness guarantees only.
    pub async fn apply(
        &self,
        user: &AuthUser,
        profile_code: i32,
    ) -> Result<Application, WorkflowError> {
        let accepted: Option<i32> = sqlx::query_scalar(
            "SELECT 1 FROM application WHERE entry_number = $1 AND status = $2 LIMIT 1",
        )
        .bind(&user.identifier)
        .bind(ApplicationStatus::Accepted.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| WorkflowError::storage("Failed to apply", e))?;

        if accepted.is_some() {
            return Err(WorkflowError::OfferAlreadyAccepted);
        }

        let existing: Option<i32> = sqlx::query_scalar(
            "SELECT 1 FROM application WHERE profile_code = $1 AND entry_number = $2",
        )
        .bind(profile_code)
        .bind(&user.identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| WorkflowError::storage("Failed to apply", e))?;

        if existing.is_some() {
            return Err(WorkflowError::AlreadyApplied);
        }

        let sql = format!(
            "INSERT INTO application (profile_code, entry_number, status) \
             VALUES ($1, $2, $3) RETURNING {}",
            APPLICATION_COLUMNS
        );
        sqlx::query_as::<_, Application>(&sql)
            .bind(profile_code)
            .bind(&user.identifier)
            .bind(ApplicationStatus::Applied.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| WorkflowError::storage("Failed to create application", e))
    }

    /// Set an application's status on behalf of a recruiter or admin.
    ///
    /// Recruiters must own the target profile; admins are unrestricted. The
    /// update is unconditional - the transition table is not consulted on
    /// this path, so any status may be set from any prior status.
    pub async fn change_status(
        &self,
        user: &AuthUser,
        profile_code: i32,
        entry_number: &str,
        status: &str,
    ) -> Result<Application, WorkflowError> {
        let status: ApplicationStatus =
            status.parse().map_err(|_| WorkflowError::InvalidStatus)?;

        if user.role == Role::Recruiter {
            let owner: Option<String> =
                sqlx::query_scalar("SELECT recruiter_email FROM profile WHERE profile_code = $1")
                    .bind(profile_code)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| WorkflowError::storage("Failed to update application status", e))?;

            match owner {
                Some(owner) if owner == user.identifier => {}
                _ => return Err(WorkflowError::NotProfileOwner),
            }
        }

        let sql = format!(
            "UPDATE application SET status = $1 \
             WHERE profile_code = $2 AND entry_number = $3 RETURNING {}",
            APPLICATION_COLUMNS
        );
        let updated: Option<Application> = sqlx::query_as(&sql)
            .bind(status.to_string())
            .bind(profile_code)
            .bind(entry_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| WorkflowError::storage("Failed to update application status", e))?;

        updated.ok_or(WorkflowError::Storage("Failed to update application status"))
    }

    /// Student accepts their own application; requires status exactly
    /// `Selected`.
    pub async fn accept(
        &self,
        user: &AuthUser,
        profile_code: i32,
    ) -> Result<Application, WorkflowError> {
        let sql = format!(
            "SELECT {} FROM application WHERE profile_code = $1 AND entry_number = $2",
            APPLICATION_COLUMNS
        );
        let application: Option<Application> = sqlx::query_as(&sql)
            .bind(profile_code)
            .bind(&user.identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| WorkflowError::storage("Failed to accept application", e))?;

        let application = application.ok_or(WorkflowError::NotFound)?;

        if !application
            .status
            .successors()
            .contains(&ApplicationStatus::Accepted)
        {
            return Err(WorkflowError::NotSelectable);
        }

        let sql = format!(
            "UPDATE application SET status = $1 \
             WHERE profile_code = $2 AND entry_number = $3 RETURNING {}",
            APPLICATION_COLUMNS
        );
        sqlx::query_as(&sql)
            .bind(ApplicationStatus::Accepted.to_string())
            .bind(profile_code)
            .bind(&user.identifier)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| WorkflowError::storage("Failed to accept application", e))
    }

    /// Student turns down their own application.
    ///
    /// The prior status is not checked - a row in any state moves to
    /// `Not Selected`, matching the recruiter path's unconditional write.
    pub async fn reject(
        &self,
        user: &AuthUser,
        profile_code: i32,
    ) -> Result<Application, WorkflowError> {
        let sql = format!(
            "UPDATE application SET status = $1 \
             WHERE profile_code = $2 AND entry_number = $3 RETURNING {}",
            APPLICATION_COLUMNS
        );
        let updated: Option<Application> = sqlx::query_as(&sql)
            .bind(ApplicationStatus::NotSelected.to_string())
            .bind(profile_code)
            .bind(&user.identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| WorkflowError::storage("Failed to reject application", e))?;

        updated.ok_or(WorkflowError::Storage("Failed to reject application"))
    }
}
