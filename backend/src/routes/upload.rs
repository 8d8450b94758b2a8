//! Upload route
//!
//! Accepts a multipart image pair, relays it through the external pipeline,
//! and returns the analysis JSON verbatim. Protected: the `AuthUser`
//! extractor runs before any body is read.

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};

/// Create upload routes
pub fn upload_routes() -> Router<AppState> {
    Router::new().route("/upload", post(upload))
}

/// Relay two uploaded images for change analysis
///
/// POST /upload — multipart fields `image1` and `image2`.
async fn upload(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<serde_json::Value>> {
    let mut image1: Option<Vec<u8>> = None;
    let mut image2: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;

        match name.as_deref() {
            Some("image1") => image1 = Some(bytes.to_vec()),
            Some("image2") => image2 = Some(bytes.to_vec()),
            // Unknown fields are ignored rather than rejected
            _ => {}
        }
    }

    let image1 =
        image1.ok_or_else(|| ApiError::BadRequest("Missing multipart field: image1".to_string()))?;
    let image2 =
        image2.ok_or_else(|| ApiError::BadRequest("Missing multipart field: image2".to_string()))?;

    let analysis = state.relay().relay(image1, image2).await?;
    Ok(Json(analysis))
}
