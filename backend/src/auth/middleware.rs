//! Bearer authentication extractor
//!
//! Extracting `AuthUser` in a handler makes the route protected: the bearer
//! token must verify *and* its subject must still resolve to a live user
//! row. A validly signed token whose user has since been deleted is rejected
//! the same way as a forged one.

use crate::error::ApiError;
use crate::repositories::{UserRecord, UserRepository};
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};

/// Authenticated user resolved from the bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: UserRecord,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthenticated)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthenticated)?;

        let subject = app_state
            .tokens()
            .verify(token)
            .map_err(|_| ApiError::Unauthenticated)?;

        // The token alone is not enough; its subject must still exist.
        let user = UserRepository::find_by_email(app_state.db(), &subject)
            .await?
            .ok_or(ApiError::Unauthenticated)?;

        Ok(AuthUser { user })
    }
}
