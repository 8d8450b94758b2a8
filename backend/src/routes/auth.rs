//! Authentication routes
//!
//! Registration, credential/token exchange, and the current-user lookup.
//! Password hashing and verification run on the blocking thread pool.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use terralens_shared::types::{LoginForm, RegisterRequest, TokenResponse, UserPublic};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/token", post(token))
        .route("/users/me", get(me))
}

/// Register a new user
///
/// POST /register — 201 with the public projection; 400 when the email is
/// already taken or the input is malformed.
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserPublic>)> {
    let user = UserService::register(state.db(), &req.name, &req.email, &req.password).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Exchange credentials for a bearer token
///
/// POST /token — OAuth2 password-grant style form body; the `username`
/// field carries the email. 401 on any credential failure.
async fn token(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> ApiResult<Json<TokenResponse>> {
    let response =
        UserService::login(state.db(), state.tokens(), &form.username, &form.password).await?;
    Ok(Json(response))
}

/// Get the current authenticated user
///
/// GET /users/me — requires a valid bearer token whose subject still
/// resolves to a live user.
async fn me(auth_user: AuthUser) -> Json<UserPublic> {
    Json(UserService::to_public(&auth_user.user))
}
