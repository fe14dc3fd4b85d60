//! Traits and types for media extraction

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

/// Metadata reported by an extractor for a single video
///
/// Mirrors the two fields of yt-dlp's JSON dump that the service consumes;
/// everything else in the dump is ignored at deserialization. Both fields
/// are optional because source sites do not reliably expose them (live
/// streams have no duration, some extractors omit titles).
#[must_use]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaMetadata {
    /// Video title, when the source exposes one
    #[serde(default)]
    pub title: Option<String>,
    /// Duration in seconds, when the source exposes one
    #[serde(default)]
    pub duration: Option<f64>,
}

/// Trait for fetching metadata and downloading media from a source site
///
/// This trait defines the interface between the download orchestration and
/// whatever tool actually talks to the video platform. Implementations can
/// shell out to external binaries or provide stub behavior for tests. All
/// methods take the bare video identifier; building source URLs is an
/// implementation concern.
///
/// # Examples
///
/// ```no_run
/// use media_dl::extractor::{MediaExtractor, YtDlpExtractor};
/// use std::path::Path;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let extractor = YtDlpExtractor::from_path()
///     .expect("yt-dlp binary not found");
///
/// let metadata = extractor.fetch_metadata("dQw4w9WgXcQ").await?;
/// if metadata.duration.is_none() {
///     println!("source reported no duration; estimates will use a default");
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait MediaExtractor: Send + Sync {
    /// Fetch title and duration for a video without downloading it
    ///
    /// # Arguments
    ///
    /// * `video_id` - Source video identifier (not a full URL)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The external binary cannot be executed
    /// - The tool exits unsuccessfully (unknown video, network failure)
    /// - The tool's output cannot be parsed
    async fn fetch_metadata(&self, video_id: &str) -> crate::Result<MediaMetadata>;

    /// Download a video to `output_path`, selecting streams with
    /// `format_selector`
    ///
    /// The selector string is passed through to the tool verbatim. On
    /// success a file exists at `output_path`, though it may be empty if
    /// the tool misbehaved; callers are expected to verify the artifact.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The external binary cannot be executed
    /// - The tool reports a failed download
    async fn download(
        &self,
        video_id: &str,
        format_selector: &str,
        output_path: &Path,
    ) -> crate::Result<()>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
