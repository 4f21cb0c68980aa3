use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;

use crate::auth::{self, Claims};
use crate::database::models::{Role, User};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("{0}")]
    Storage(&'static str),
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
    pub identifier: String,
}

/// Credential verification and token issuance. No session record is kept;
/// the signed token is the only artifact of a login.
pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Verify an identifier/password-hash pair and issue a session token.
    ///
    /// The submitted hash is compared byte-for-byte against the stored
    /// precomputed hash; no hashing happens server-side. Absent users and
    /// hash mismatches are indistinguishable to the caller.
    pub async fn login(
        &self,
        identifier: &str,
        password_hash: &str,
    ) -> Result<LoginResponse, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT identifier, password_hash, role FROM users WHERE identifier = $1",
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Credential lookup failed: {}", e);
            AuthError::Storage("Login failed")
        })?;

        let user = user.ok_or(AuthError::InvalidCredentials)?;

        if user.password_hash != password_hash {
            tracing::debug!("Password hash mismatch for {}", identifier);
            return Err(AuthError::InvalidCredentials);
        }

        let claims = Claims::new(user.identifier.clone(), user.role);
        let token = auth::generate_token(&claims).map_err(|e| {
            tracing::error!("Token issuance failed: {}", e);
            AuthError::Storage("Login failed")
        })?;

        Ok(LoginResponse {
            token,
            role: user.role,
            identifier: user.identifier,
        })
    }
}
