//! CLI-based extractor using the external yt-dlp binary

use super::traits::{MediaExtractor, MediaMetadata};
use crate::error::DownloadError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Binary name searched for in PATH
const YTDLP_BINARY: &str = "yt-dlp";

/// CLI-based extractor shelling out to the external `yt-dlp` binary
///
/// Metadata probes run `yt-dlp --dump-single-json --skip-download` and parse
/// the JSON dump; downloads run the tool with a format selector and an
/// explicit output path, merging into mp4. Both invocations are awaited
/// asynchronously, so a long download never ties up a runtime worker.
///
/// # Examples
///
/// ```no_run
/// use media_dl::extractor::{MediaExtractor, YtDlpExtractor};
/// use std::path::PathBuf;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Create with explicit path
/// let extractor = YtDlpExtractor::new(PathBuf::from("/usr/local/bin/yt-dlp"));
///
/// // Or auto-discover from PATH
/// let extractor = YtDlpExtractor::from_path()
///     .expect("yt-dlp not found in PATH");
///
/// let metadata = extractor.fetch_metadata("dQw4w9WgXcQ").await?;
/// # Ok(())
/// # }
/// ```
pub struct YtDlpExtractor {
    binary_path: PathBuf,
}

impl YtDlpExtractor {
    /// Create a new extractor with an explicit binary path
    ///
    /// # Arguments
    ///
    /// * `binary_path` - Path to the yt-dlp binary
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    /// Attempt to find yt-dlp in PATH
    ///
    /// Uses the `which` crate to search for the `yt-dlp` binary in the
    /// system PATH.
    ///
    /// # Returns
    ///
    /// `Some(YtDlpExtractor)` if the binary is found, `None` otherwise.
    pub fn from_path() -> Option<Self> {
        which::which(YTDLP_BINARY).ok().map(Self::new)
    }

    fn watch_url(video_id: &str) -> String {
        format!("https://www.youtube.com/watch?v={video_id}")
    }
}

#[async_trait]
impl MediaExtractor for YtDlpExtractor {
    async fn fetch_metadata(&self, video_id: &str) -> crate::Result<MediaMetadata> {
        let output = Command::new(&self.binary_path)
            .arg("--dump-single-json")
            .arg("--skip-download")
            .arg("--no-warnings")
            .arg("--no-progress")
            .arg(Self::watch_url(video_id))
            .output()
            .await
            .map_err(|e| crate::Error::ExternalTool(format!("Failed to execute yt-dlp: {}", e)))?;

        if !output.status.success() {
            return Err(crate::Error::MetadataFetch(condense_stderr(
                &output.stderr,
                output.status,
            )));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| crate::Error::MetadataFetch(format!("unparseable yt-dlp output: {e}")))
    }

    async fn download(
        &self,
        video_id: &str,
        format_selector: &str,
        output_path: &Path,
    ) -> crate::Result<()> {
        let output = Command::new(&self.binary_path)
            .arg("--format")
            .arg(format_selector)
            .arg("--output")
            .arg(output_path)
            .arg("--merge-output-format")
            .arg("mp4")
            .arg("--no-warnings")
            .arg("--no-progress")
            .arg(Self::watch_url(video_id))
            .output()
            .await
            .map_err(|e| crate::Error::ExternalTool(format!("Failed to execute yt-dlp: {}", e)))?;

        if !output.status.success() {
            return Err(DownloadError::Failed(condense_stderr(&output.stderr, output.status)).into());
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        YTDLP_BINARY
    }
}

/// yt-dlp prints its actionable "ERROR:" line last; keep that, drop the noise.
fn condense_stderr(stderr: &[u8], status: std::process::ExitStatus) -> String {
    String::from_utf8_lossy(stderr)
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(ToString::to_string)
        .unwrap_or_else(|| format!("yt-dlp failed with {status}"))
}
