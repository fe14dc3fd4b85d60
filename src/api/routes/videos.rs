//! Video metadata handlers: quality listing and size estimation.

use super::VideoInfoQuery;
use crate::api::AppState;
use crate::error::Error;
use crate::types::{Quality, VideoInfo};
use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use std::collections::BTreeMap;

/// GET /qualities - Supported quality tags
///
/// Returns a flat map of quality tag to human-readable description, in
/// ascending-quality order with `best` last.
#[utoipa::path(
    get,
    path = "/qualities",
    tag = "videos",
    responses(
        (status = 200, description = "Map of quality tag to description")
    )
)]
pub async fn get_qualities() -> impl IntoResponse {
    let qualities: BTreeMap<Quality, &'static str> = Quality::ALL
        .into_iter()
        .map(|quality| (quality, quality.label()))
        .collect();

    Json(qualities)
}

/// GET /video-info - Title, duration, and per-quality size estimates
///
/// Unlike the probe inside a download, a metadata failure here is fatal:
/// there is no artifact to fall back to, so the extractor error surfaces
/// as a 500.
#[utoipa::path(
    get,
    path = "/video-info",
    tag = "videos",
    params(
        ("videoId" = String, Query, description = "Source video identifier")
    ),
    responses(
        (status = 200, description = "Video metadata with heuristic size estimates", body = crate::types::VideoInfo),
        (status = 400, description = "Missing videoId parameter", body = crate::error::ErrorBody),
        (status = 500, description = "Metadata resolution failed", body = crate::error::ErrorBody)
    )
)]
pub async fn get_video_info(
    State(state): State<AppState>,
    Query(query): Query<VideoInfoQuery>,
) -> Result<Json<VideoInfo>, Error> {
    // An empty videoId is treated the same as an absent one
    let video_id = query
        .video_id
        .filter(|id| !id.is_empty())
        .ok_or(Error::MissingParameter("videoId"))?;

    let info = state.downloader.video_info(&video_id).await?;
    Ok(Json(info))
}
