//! # media-dl
//!
//! HTTP service for fetching media from streaming sites and serving it back
//! as downloadable MP4 files, built around the `yt-dlp` command-line extractor.
//!
//! ## Design Philosophy
//!
//! media-dl is designed to be:
//! - **Self-contained** - One binary, one external tool (`yt-dlp`), no database
//! - **Sensible defaults** - Works out of the box with zero configuration
//! - **Ephemeral by design** - Downloaded artifacts live in a temp directory
//!   and are deleted shortly after they have been streamed to the client
//! - **Embeddable** - The HTTP layer is a thin shell over [`MediaDownloader`],
//!   which can be driven directly from Rust
//!
//! ## Quick Start
//!
//! ```no_run
//! use media_dl::{Config, MediaDownloader, run_with_shutdown};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let downloader = Arc::new(MediaDownloader::new(config).await?);
//!
//!     // Background retention sweep plus the HTTP API
//!     downloader.start_retention_sweeper();
//!     downloader.spawn_api_server();
//!
//!     // Run until SIGTERM/SIGINT, then clean up temp files
//!     run_with_shutdown(downloader).await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Configuration types
pub mod config;
/// Core downloader implementation (decomposed into focused submodules)
pub mod downloader;
/// Error types
pub mod error;
/// Media metadata and download via the yt-dlp CLI
pub mod extractor;
/// Download file naming
pub mod naming;
/// Ephemeral file registry
pub mod registry;
/// Age-based retention sweeper
pub mod sweeper;
/// Core types
pub mod types;

use std::sync::Arc;

// Re-export commonly used types
pub use config::{Config, ExtractorConfig, RetentionConfig, ServerConfig, StorageConfig};
pub use downloader::{MediaDownloader, MediaStream};
pub use error::{DownloadError, Error, ErrorBody, Result, ToHttpStatus};
pub use extractor::{MediaExtractor, MediaMetadata, YtDlpExtractor};
pub use registry::{FileRegistry, SweepOutcome};
pub use sweeper::RetentionSweeper;
pub use types::{Quality, QualityEstimate, VideoInfo};

/// Helper function to run the downloader with graceful signal handling.
///
/// Waits for a termination signal and then calls the downloader's `shutdown()`
/// method, which deletes any temp files still on disk.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// # Example
///
/// ```no_run
/// use media_dl::{Config, MediaDownloader, run_with_shutdown};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config::from_env()?;
///     let downloader = Arc::new(MediaDownloader::new(config).await?);
///
///     // Run with automatic signal handling
///     run_with_shutdown(downloader).await?;
///
///     Ok(())
/// }
/// ```
pub async fn run_with_shutdown(downloader: Arc<MediaDownloader>) -> Result<()> {
    wait_for_signal().await;
    downloader.shutdown().await
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Set up signal handlers - these may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
