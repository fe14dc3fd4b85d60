//! Common test utilities for media-dl E2E tests

use media_dl::{Config, MediaDownloader};
use std::sync::Arc;
use tempfile::TempDir;

/// Error type for test setup
#[derive(Debug)]
pub struct SetupError(pub String);

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Setup error: {}", self.0)
    }
}

impl std::error::Error for SetupError {}

/// Check whether a real yt-dlp binary is available on PATH
pub fn has_live_tooling() -> bool {
    which::which("yt-dlp").is_ok()
}

/// Video id the live tests run against
///
/// Defaults to yt-dlp's own ~10 second test video; set
/// `MEDIA_DL_TEST_VIDEO_ID` to point the tests at something else.
pub fn test_video_id() -> String {
    std::env::var("MEDIA_DL_TEST_VIDEO_ID").unwrap_or_else(|_| "BaW_jenozKc".to_string())
}

/// Create a MediaDownloader backed by the real yt-dlp binary
///
/// Returns the downloader and temp directory (keep temp_dir alive for test duration)
pub async fn create_live_downloader() -> Result<(Arc<MediaDownloader>, TempDir), SetupError> {
    let temp_dir = tempfile::tempdir()
        .map_err(|e| SetupError(format!("Failed to create temp dir: {}", e)))?;

    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.storage.temp_dir = temp_dir.path().join("yt_downloader");

    let downloader = MediaDownloader::new(config)
        .await
        .map_err(|e| SetupError(format!("Failed to create downloader: {}", e)))?;

    Ok((Arc::new(downloader), temp_dir))
}
