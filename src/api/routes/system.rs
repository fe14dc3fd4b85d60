//! System handlers: service index.

use super::HomeResponse;
use axum::{Json, response::IntoResponse};

/// GET / - Service status and endpoint directory
#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses(
        (status = 200, description = "Service is running", body = HomeResponse)
    )
)]
pub async fn home() -> impl IntoResponse {
    Json(HomeResponse {
        status: "running".to_string(),
        message: "YouTube Downloader Server is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: vec![
            "/video-info?videoId=<id>".to_string(),
            "/download?videoId=<id>&quality=<quality>".to_string(),
            "/qualities".to_string(),
        ],
    })
}
