use sqlx::PgPool;
use thiserror::Error;

use crate::database::models::UserInfo;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("user not found")]
    NotFound,
    #[error("{0}")]
    Storage(&'static str),
}

impl UserError {
    fn storage(message: &'static str, err: sqlx::Error) -> Self {
        tracing::error!("{}: {}", message, err);
        UserError::Storage(message)
    }
}

/// Read-only user directory. Accounts are provisioned out-of-band; this
/// service never writes.
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The caller's own directory entry.
    pub async fn get_me(&self, identifier: &str) -> Result<UserInfo, UserError> {
        sqlx::query_as::<_, UserInfo>(
            "SELECT identifier, role FROM users WHERE identifier = $1",
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::storage("Failed to fetch user", e))?
        .ok_or(UserError::NotFound)
    }

    /// All accounts, without password hashes. Admin-only at the route layer.
    pub async fn list_users(&self) -> Result<Vec<UserInfo>, UserError> {
        sqlx::query_as::<_, UserInfo>("SELECT identifier, role FROM users ORDER BY identifier")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| UserError::storage("Failed to fetch users", e))
    }
}
