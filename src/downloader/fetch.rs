//! Per-request download orchestration.
//!
//! One `fetch_video` call runs a whole job: metadata probe, output path
//! construction, extractor invocation, artifact verification, streaming
//! handoff, and delayed cleanup scheduling.

use crate::error::{DownloadError, Error, Result};
use crate::naming;
use crate::types::Quality;

use super::MediaDownloader;

use std::path::{Path, PathBuf};

/// A verified download artifact, ready to stream to one client
///
/// Carries an already-open file handle so the HTTP layer never races the
/// delayed cleanup: the open handle keeps streaming even after the path is
/// unlinked mid-transfer.
pub struct MediaStream {
    /// Open handle to the artifact
    pub file: tokio::fs::File,
    /// Path on disk (tracked by the registry until cleanup)
    pub path: PathBuf,
    /// Filename offered to the client in Content-Disposition
    pub attachment_name: String,
    /// Artifact size in bytes, for Content-Length
    pub size_bytes: u64,
}

impl MediaDownloader {
    /// Run one download job end to end and hand back a streamable artifact
    ///
    /// Phases:
    /// 1. Metadata probe — failure falls back to the video id as title and
    ///    never aborts the job
    /// 2. Build a unique output path under the temp dir and register it,
    ///    so the retention sweep covers every later failure
    /// 3. Run the extractor
    /// 4. Verify the artifact exists and is non-empty
    /// 5. Open it for streaming (before any deletion can be scheduled)
    /// 6. Schedule delayed cleanup
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShuttingDown`] once shutdown has begun, the
    /// extractor's error if the download fails, and a
    /// [`DownloadError`] describing a missing, empty, or unopenable
    /// artifact.
    pub async fn fetch_video(&self, video_id: &str, quality: Quality) -> Result<MediaStream> {
        if self.is_shutting_down() {
            return Err(Error::ShuttingDown);
        }

        let title = match self.extractor.fetch_metadata(video_id).await {
            Ok(metadata) => metadata.title.unwrap_or_else(|| video_id.to_string()),
            Err(e) => {
                tracing::warn!(
                    video_id,
                    error = %e,
                    "Metadata lookup failed; using the video id as title"
                );
                video_id.to_string()
            }
        };

        let safe_title = naming::sanitize_title(&title, video_id);
        let file_name = naming::storage_file_name(&safe_title, quality);
        let output_path = self.config.storage.temp_dir.join(&file_name);

        // Registered before the extractor runs: whatever lands on disk from
        // here on is reclaimed by the sweeper if this job aborts.
        self.registry.register(output_path.clone()).await;

        tracing::info!(
            video_id,
            quality = %quality,
            output = %output_path.display(),
            "Starting download"
        );

        self.extractor
            .download(video_id, quality.format_selector(), &output_path)
            .await?;

        let file_metadata = match tokio::fs::metadata(&output_path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DownloadError::Incomplete.into());
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let size_bytes = file_metadata.len();
        if size_bytes == 0 {
            // Worthless artifact: discard now instead of waiting an hour
            self.discard(&output_path).await;
            return Err(DownloadError::EmptyArtifact.into());
        }

        let file = match tokio::fs::File::open(&output_path).await {
            Ok(file) => file,
            Err(e) => {
                self.discard(&output_path).await;
                return Err(DownloadError::StreamSetup(e.to_string()).into());
            }
        };

        self.schedule_delayed_cleanup(output_path.clone());

        tracing::info!(
            video_id,
            size_bytes,
            path = %output_path.display(),
            "Download complete, streaming to client"
        );

        Ok(MediaStream {
            file,
            path: output_path,
            attachment_name: naming::attachment_file_name(&safe_title, quality),
            size_bytes,
        })
    }

    /// Delete an artifact immediately and stop tracking it
    ///
    /// A delete that fails for any reason other than the file being gone
    /// leaves the entry tracked, so the retention sweep gets another shot.
    async fn discard(&self, path: &Path) {
        match tokio::fs::remove_file(path).await {
            Ok(()) => self.registry.unregister(path).await,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.registry.unregister(path).await;
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to discard artifact; leaving it to the retention sweep"
                );
            }
        }
    }

    /// Spawn a one-shot task that deletes `path` after the stream grace
    /// period
    ///
    /// The grace period gives the HTTP layer time to finish sending before
    /// the unlink; a client still mid-download survives because it reads
    /// from an open handle. The task captures only the registry handle and
    /// the grace duration, not the whole downloader.
    pub(crate) fn schedule_delayed_cleanup(&self, path: PathBuf) {
        let registry = self.registry();
        let grace = self.config.retention.stream_grace();

        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), "Removed delivered file");
                    registry.unregister(&path).await;
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    // Another trigger got there first; just stop tracking
                    registry.unregister(&path).await;
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to remove delivered file; leaving it to the retention sweep"
                    );
                }
            }
        });
    }
}
