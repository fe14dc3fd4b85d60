//! Download handler: runs one download job and streams the artifact back.

use super::DownloadQuery;
use crate::api::AppState;
use crate::downloader::MediaStream;
use crate::error::{Error, ToHttpStatus};
use crate::types::Quality;
use axum::{
    body::Body,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

/// GET /download - Download media and stream it back as an attachment
///
/// The success path is a binary `video/mp4` stream, so failures use
/// plain-text bodies rather than the JSON envelope: a client saving the
/// response to disk sees a readable message instead of a JSON fragment.
#[utoipa::path(
    get,
    path = "/download",
    tag = "download",
    params(
        ("videoId" = String, Query, description = "Source video identifier"),
        ("quality" = Option<String>, Query, description = "Quality tag (default: best; unknown tags resolve to best)")
    ),
    responses(
        (status = 200, description = "Media file stream", content_type = "video/mp4"),
        (status = 400, description = "Missing videoId parameter (plain text)"),
        (status = 500, description = "Download pipeline failed (plain text)"),
        (status = 503, description = "Server is shutting down (plain text)")
    )
)]
pub async fn download_video(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Response {
    // Validated before any extractor call or registry write
    let Some(video_id) = query.video_id.filter(|id| !id.is_empty()) else {
        return plain_error(Error::MissingParameter("videoId"));
    };
    let quality = Quality::parse(query.quality.as_deref().unwrap_or("best"));

    match state.downloader.fetch_video(&video_id, quality).await {
        Ok(stream) => media_response(stream),
        Err(error) => plain_error(error),
    }
}

/// Build the streaming attachment response from a verified artifact.
///
/// The body streams from the already-open handle, which is what lets the
/// delayed cleanup unlink the path mid-transfer without cutting the client
/// off.
fn media_response(stream: MediaStream) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", stream.attachment_name);
    let body = Body::from_stream(ReaderStream::new(stream.file));

    (
        [
            (header::CONTENT_TYPE, "video/mp4".to_string()),
            (header::CONTENT_LENGTH, stream.size_bytes.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

fn plain_error(error: Error) -> Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, error.to_string()).into_response()
}
