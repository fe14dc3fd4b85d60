//! Core downloader implementation split into focused submodules.
//!
//! The `MediaDownloader` struct and its methods are organized by domain:
//! - [`fetch`] - Per-request download orchestration and streaming handoff
//! - [`lifecycle`] - Shutdown coordination and final cleanup

mod fetch;
mod lifecycle;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

pub use fetch::MediaStream;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::extractor::{MediaExtractor, YtDlpExtractor};
use crate::registry::FileRegistry;
use crate::sweeper::RetentionSweeper;
use crate::types::VideoInfo;

/// Main downloader instance (cloneable - all fields are Arc-wrapped)
#[derive(Clone)]
pub struct MediaDownloader {
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: std::sync::Arc<Config>,
    /// Registry of ephemeral files this process still has to delete
    pub(crate) registry: std::sync::Arc<FileRegistry>,
    /// Media extractor collaborator (trait object for pluggable implementations)
    pub(crate) extractor: std::sync::Arc<dyn MediaExtractor>,
    /// Cancelled when shutdown begins; stops background tasks and rejects new work
    pub(crate) shutdown_token: tokio_util::sync::CancellationToken,
}

impl MediaDownloader {
    /// Create a new MediaDownloader instance
    ///
    /// This initializes all core components:
    /// - Resolves the extraction binary (explicit path, or PATH search)
    /// - Creates the ephemeral temp directory
    /// - Sets up the shared file registry
    ///
    /// # Errors
    ///
    /// Fails if no extraction binary can be found or the temp directory
    /// cannot be created.
    pub async fn new(config: Config) -> Result<Self> {
        let extractor: std::sync::Arc<dyn MediaExtractor> =
            if let Some(ref binary_path) = config.extractor.binary_path {
                // Use explicitly configured binary path
                std::sync::Arc::new(YtDlpExtractor::new(binary_path.clone()))
            } else {
                // Search PATH for the yt-dlp binary
                YtDlpExtractor::from_path()
                    .map(|e| std::sync::Arc::new(e) as std::sync::Arc<dyn MediaExtractor>)
                    .ok_or_else(|| {
                        Error::ExternalTool(
                            "yt-dlp not found in PATH; install it or set YTDLP_PATH".to_string(),
                        )
                    })?
            };

        Self::with_extractor(config, extractor).await
    }

    /// Create a downloader with an explicit extractor implementation
    ///
    /// Useful for embedding and for tests that substitute a stub extractor.
    ///
    /// # Errors
    ///
    /// Fails if the temp directory cannot be created.
    pub async fn with_extractor(
        config: Config,
        extractor: std::sync::Arc<dyn MediaExtractor>,
    ) -> Result<Self> {
        // Ensure the ephemeral temp directory exists
        tokio::fs::create_dir_all(&config.storage.temp_dir)
            .await
            .map_err(|e| {
                Error::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create temp directory '{}': {}",
                        config.storage.temp_dir.display(),
                        e
                    ),
                ))
            })?;

        tracing::info!(
            extractor = extractor.name(),
            temp_dir = %config.storage.temp_dir.display(),
            "Media downloader initialized"
        );

        Ok(Self {
            config: std::sync::Arc::new(config),
            registry: std::sync::Arc::new(FileRegistry::new()),
            extractor,
            shutdown_token: tokio_util::sync::CancellationToken::new(),
        })
    }

    /// Get the current configuration
    ///
    /// The configuration is wrapped in an Arc, so this is a cheap clone
    /// operation.
    pub fn get_config(&self) -> std::sync::Arc<Config> {
        std::sync::Arc::clone(&self.config)
    }

    /// Registry of files awaiting deletion (shared with background tasks)
    pub fn registry(&self) -> std::sync::Arc<FileRegistry> {
        std::sync::Arc::clone(&self.registry)
    }

    /// Whether shutdown has begun (new downloads are rejected once true)
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown_token.is_cancelled()
    }

    /// Fetch title and duration for a video and derive per-quality size
    /// estimates
    ///
    /// Unlike the metadata probe inside a download job, this lookup is
    /// fatal on extractor failure: the caller asked for metadata
    /// specifically, so there is nothing to fall back to.
    ///
    /// # Errors
    ///
    /// Returns an error if the extractor cannot be executed or the lookup
    /// fails.
    pub async fn video_info(&self, video_id: &str) -> Result<VideoInfo> {
        let metadata = self.extractor.fetch_metadata(video_id).await?;
        tracing::debug!(
            video_id,
            title = metadata.title.as_deref().unwrap_or("<none>"),
            duration = metadata.duration,
            "Fetched video metadata"
        );
        Ok(VideoInfo::from_metadata(&metadata))
    }

    /// Start the retention sweeper background task
    ///
    /// The sweeper periodically deletes tracked files older than the
    /// configured retention age and stops when shutdown begins.
    pub fn start_retention_sweeper(&self) -> tokio::task::JoinHandle<()> {
        let retention = &self.config.retention;
        let sweeper = RetentionSweeper::new(
            self.registry(),
            retention.sweep_interval(),
            retention.max_age(),
            self.shutdown_token.child_token(),
        );

        let handle = tokio::spawn(sweeper.run());
        tracing::info!("Retention sweeper background task started");
        handle
    }

    /// Spawn the REST API server in a background task
    ///
    /// This method spawns the API server as a separate async task using
    /// `tokio::spawn`. The server runs concurrently with download
    /// processing and listens on the configured bind address (default:
    /// 0.0.0.0:5000).
    pub fn spawn_api_server(self: &std::sync::Arc<Self>) -> tokio::task::JoinHandle<Result<()>> {
        let downloader = self.clone();
        let config = self.config.clone();

        tokio::spawn(async move { crate::api::start_api_server(downloader, config).await })
    }
}
