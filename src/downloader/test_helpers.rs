//! Shared test helpers for creating MediaDownloader instances in tests.

use crate::config::Config;
use crate::downloader::MediaDownloader;
use crate::error::DownloadError;
use crate::extractor::{MediaExtractor, MediaMetadata};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::tempdir;

/// What a stub download run does after the optional delay
pub(crate) enum StubDownload {
    /// Write these bytes to the output path and succeed
    Write(Vec<u8>),
    /// Succeed without creating the output file
    Vanish,
    /// Fail with a download error
    Fail,
}

/// Scripted extractor standing in for the yt-dlp binary.
pub(crate) struct StubExtractor {
    /// Metadata returned by `fetch_metadata`; `None` makes the probe fail
    pub(crate) metadata: Option<MediaMetadata>,
    /// Download behavior
    pub(crate) download: StubDownload,
    /// Artificial latency applied to each download run
    pub(crate) delay: Duration,
    /// Number of `fetch_metadata` calls observed
    pub(crate) metadata_calls: AtomicUsize,
    /// Number of `download` calls observed
    pub(crate) download_calls: AtomicUsize,
}

impl Default for StubExtractor {
    fn default() -> Self {
        Self {
            metadata: Some(MediaMetadata {
                title: Some("Stub Video".to_string()),
                duration: Some(180.0),
            }),
            download: StubDownload::Write(b"stub media bytes".to_vec()),
            delay: Duration::ZERO,
            metadata_calls: AtomicUsize::new(0),
            download_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl MediaExtractor for StubExtractor {
    async fn fetch_metadata(&self, _video_id: &str) -> crate::Result<MediaMetadata> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        self.metadata
            .clone()
            .ok_or_else(|| crate::Error::MetadataFetch("stub metadata failure".to_string()))
    }

    async fn download(
        &self,
        _video_id: &str,
        _format_selector: &str,
        output_path: &Path,
    ) -> crate::Result<()> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.download {
            StubDownload::Write(bytes) => {
                tokio::fs::write(output_path, bytes).await?;
                Ok(())
            }
            StubDownload::Vanish => Ok(()),
            StubDownload::Fail => {
                Err(DownloadError::Failed("stub download failure".to_string()).into())
            }
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Helper to create a test MediaDownloader backed by a stub extractor.
/// Returns the downloader, a handle to the stub for call assertions, and
/// the tempdir (which must be kept alive).
pub(crate) async fn create_test_downloader(
    stub: StubExtractor,
) -> (MediaDownloader, Arc<StubExtractor>, tempfile::TempDir) {
    // Long grace so delayed cleanups never fire mid-test
    create_test_downloader_with_grace(stub, 30).await
}

/// Same as [`create_test_downloader`] but with an explicit stream grace
/// period, for tests that want to observe the delayed cleanup.
pub(crate) async fn create_test_downloader_with_grace(
    stub: StubExtractor,
    stream_grace_secs: u64,
) -> (MediaDownloader, Arc<StubExtractor>, tempfile::TempDir) {
    let temp_dir = tempdir().unwrap();

    let mut config = Config::default();
    // Loopback with an OS-assigned port, so tests never race over port 5000
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.storage.temp_dir = temp_dir.path().join("yt_downloader");
    config.retention.stream_grace_secs = stream_grace_secs;

    let stub = Arc::new(stub);
    let downloader = MediaDownloader::with_extractor(config, stub.clone() as Arc<dyn MediaExtractor>)
        .await
        .unwrap();

    (downloader, stub, temp_dir)
}
