//! Route definitions for the Terralens API
//!
//! Route table (protected routes require a bearer token):
//! - POST /register          create an account
//! - POST /token             exchange credentials for a bearer token
//! - GET  /users/me          current user's public projection (protected)
//! - POST /upload            relay an image pair for analysis (protected)
//! - GET  /health[/...]      probes
//! - GET  /public/*          static assets
//! - anything else           SPA fallback to public/index.html

use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::get,
    Router,
};
use std::path::Path;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod health;
mod upload;

#[cfg(test)]
mod auth_tests;

pub use auth::auth_routes;
pub use upload::upload_routes;

/// Request bodies are capped here; image pairs dominate the payloads.
const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let public_dir = state.config().server.public_dir.clone();
    let index_file = Path::new(&public_dir).join("index.html");

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .merge(auth_routes())
        .merge(upload_routes())
        .nest_service("/public", ServeDir::new(&public_dir))
        // SPA fallback: any unmatched path serves the front-end entry point
        .fallback_service(ServeFile::new(index_file))
        // Apply middleware layers
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        // Generous bound: the relay makes up to three sequential upstream
        // calls, each with its own timeout
        .layer(TimeoutLayer::new(Duration::from_secs(120)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
