//! Media extraction via an external downloader binary
//!
//! This module provides a trait-based architecture for the site-extraction
//! tool that does the actual fetching. The service itself never speaks to
//! video platforms; it orchestrates an external binary that does, and treats
//! that binary as a replaceable collaborator.
//!
//! ## Architecture
//!
//! The core abstraction is the [`MediaExtractor`] trait, which defines the
//! two operations the service needs: a metadata probe and a download run.
//!
//! - [`YtDlpExtractor`]: shells out to the external `yt-dlp` binary
//!
//! Test code substitutes stub implementations of the trait, so nothing above
//! this module depends on the binary being installed.
//!
//! ## Usage
//!
//! ```no_run
//! use media_dl::extractor::{MediaExtractor, YtDlpExtractor};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Try to find yt-dlp in PATH
//!     let extractor = YtDlpExtractor::from_path()
//!         .expect("yt-dlp binary not found");
//!
//!     let metadata = extractor.fetch_metadata("dQw4w9WgXcQ").await?;
//!     println!(
//!         "{} ({:?} seconds)",
//!         metadata.title.unwrap_or_default(),
//!         metadata.duration
//!     );
//!
//!     extractor
//!         .download("dQw4w9WgXcQ", "best[ext=mp4]/best", Path::new("video.mp4"))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod cli;
mod traits;

pub use cli::YtDlpExtractor;
pub use traits::{MediaExtractor, MediaMetadata};
