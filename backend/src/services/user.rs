//! User service: register, login, authenticate
//!
//! # Security notes
//!
//! - `login` returns the same `InvalidCredentials` failure whether the email
//!   is unknown or the password is wrong.
//! - `register` rejects a duplicate email before hashing the password; the
//!   skipped hash is a work-avoidance choice, not a security property.
//! - Hashing and verification run on the blocking thread pool.

use crate::auth::{PasswordService, TokenService};
use crate::error::ApiError;
use crate::repositories::{UserRecord, UserRepository};
use sqlx::PgPool;
use terralens_shared::types::{TokenResponse, UserPublic};
use terralens_shared::validation::{normalize_email, validate_name, validate_password};
use validator::ValidateEmail;

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new user and return the public projection
    pub async fn register(
        pool: &PgPool,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserPublic, ApiError> {
        let email = normalize_email(email);

        if !email.validate_email() {
            return Err(ApiError::Validation("Invalid email format".to_string()));
        }
        validate_name(name).map_err(ApiError::Validation)?;
        validate_password(password).map_err(ApiError::Validation)?;

        // Duplicate check first so we never hash a password we won't store.
        if UserRepository::email_exists(pool, &email).await? {
            return Err(ApiError::EmailTaken);
        }

        let password_hash = PasswordService::hash_async(password.to_string())
            .await
            .map_err(ApiError::Internal)?;

        let user = UserRepository::create(pool, name.trim(), &email, &password_hash).await?;

        Ok(Self::to_public(&user))
    }

    /// Authenticate credentials and issue a bearer token
    pub async fn login(
        pool: &PgPool,
        tokens: &TokenService,
        email: &str,
        password: &str,
    ) -> Result<TokenResponse, ApiError> {
        let email = normalize_email(email);

        // Unknown email and wrong password must be indistinguishable.
        let user = UserRepository::find_by_email(pool, &email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        let valid = PasswordService::verify_async(password.to_string(), user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::InvalidCredentials);
        }

        let access_token = tokens.issue(&user.email).map_err(ApiError::Internal)?;

        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
        })
    }

    /// Resolve a bearer token to a live user record
    ///
    /// A correctly signed token whose subject no longer exists fails exactly
    /// like an invalid one.
    pub async fn authenticate(
        pool: &PgPool,
        tokens: &TokenService,
        token: &str,
    ) -> Result<UserRecord, ApiError> {
        let subject = tokens.verify(token).map_err(|_| ApiError::Unauthenticated)?;

        UserRepository::find_by_email(pool, &subject)
            .await?
            .ok_or(ApiError::Unauthenticated)
    }

    /// Public projection of a user record (never includes the hash)
    pub fn to_public(user: &UserRecord) -> UserPublic {
        UserPublic {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    // Register/login/authenticate flows are covered by the DB-backed
    // integration tests in backend/tests/auth_integration_test.rs.
}
