//! Terralens Backend Library
//!
//! Authentication gateway and image-pair upload relay for the change
//! detection API. Exposed as a library so integration tests can build the
//! router directly.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod relay;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
