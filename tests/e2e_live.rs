//! End-to-end tests against the real yt-dlp binary
//!
//! These tests shell out to yt-dlp and hit the network, so they are gated
//! behind the `live-tests` feature and skip themselves when the binary is
//! not on PATH.
//!
//! # Prerequisites
//!
//! ```bash
//! pip install yt-dlp
//! ```
//!
//! # Running the tests
//!
//! ```bash
//! # Run all live E2E tests
//! cargo test --features live-tests --test e2e_live -- --nocapture
//!
//! # Run a specific test
//! cargo test --features live-tests --test e2e_live test_live_video_info -- --nocapture
//! ```
//!
//! # Optional environment variables
//!
//! - `MEDIA_DL_TEST_VIDEO_ID` - Video id to fetch (default: a ~10 second test video)

#![cfg(feature = "live-tests")]

mod common;

use common::{create_live_downloader, has_live_tooling, test_video_id};
use media_dl::Quality;
use serial_test::serial;
use std::time::Duration;
use tokio::io::AsyncReadExt;

// ============================================================================
// Metadata Tests
// ============================================================================

/// Test that metadata for a real video comes back with sane fields
#[tokio::test]
#[serial]
async fn test_live_video_info() {
    if !has_live_tooling() {
        eprintln!("Skipping: yt-dlp not found on PATH");
        return;
    }

    let (downloader, _temp_dir) = create_live_downloader()
        .await
        .expect("Failed to create downloader");

    let info = downloader
        .video_info(&test_video_id())
        .await
        .expect("Failed to fetch video info");

    println!("Title: {}", info.title);
    println!("Duration: {}s", info.duration);

    assert!(!info.title.is_empty(), "Title should not be empty");
    assert!(info.duration > 0.0, "Duration should be positive");
    assert_eq!(
        info.qualities.len(),
        4,
        "Expected one size estimate per fixed quality"
    );

    downloader.shutdown().await.ok();
}

/// Test that a bogus video id surfaces as a metadata error
#[tokio::test]
#[serial]
async fn test_live_video_info_bogus_id() {
    if !has_live_tooling() {
        eprintln!("Skipping: yt-dlp not found on PATH");
        return;
    }

    let (downloader, _temp_dir) = create_live_downloader()
        .await
        .expect("Failed to create downloader");

    let result = downloader.video_info("no-such-video-zzzzzz").await;

    match result {
        Err(error) => {
            println!("Got expected error: {}", error);
        }
        Ok(info) => {
            panic!("Expected a metadata error for a bogus id, got: {:?}", info);
        }
    }

    downloader.shutdown().await.ok();
}

// ============================================================================
// Download Tests
// ============================================================================

/// Test a full download at the lowest quality
#[tokio::test]
#[serial]
async fn test_live_download_360p() {
    if !has_live_tooling() {
        eprintln!("Skipping: yt-dlp not found on PATH");
        return;
    }

    let (downloader, _temp_dir) = create_live_downloader()
        .await
        .expect("Failed to create downloader");

    let mut stream = downloader
        .fetch_video(&test_video_id(), Quality::Q360)
        .await
        .expect("Download failed");

    println!(
        "Downloaded {} ({} bytes) to {:?}",
        stream.attachment_name, stream.size_bytes, stream.path
    );

    assert!(stream.size_bytes > 0, "Artifact should not be empty");
    assert!(
        stream.attachment_name.ends_with("_360p.mp4"),
        "Attachment name should carry the quality suffix: {}",
        stream.attachment_name
    );

    // The open handle must deliver exactly the advertised byte count
    let mut buf = Vec::new();
    stream
        .file
        .read_to_end(&mut buf)
        .await
        .expect("Failed to read artifact");
    assert_eq!(buf.len() as u64, stream.size_bytes);

    downloader.shutdown().await.ok();
}

/// Test that shutdown removes every artifact a download left behind
#[tokio::test]
#[serial]
async fn test_live_shutdown_cleans_temp_dir() {
    if !has_live_tooling() {
        eprintln!("Skipping: yt-dlp not found on PATH");
        return;
    }

    let (downloader, temp_dir) = create_live_downloader()
        .await
        .expect("Failed to create downloader");

    let stream = downloader
        .fetch_video(&test_video_id(), Quality::Q360)
        .await
        .expect("Download failed");

    assert!(stream.path.exists(), "Artifact should be on disk");

    downloader.shutdown().await.expect("Shutdown failed");

    assert!(
        !stream.path.exists(),
        "Artifact should be deleted on shutdown"
    );
    assert!(
        !temp_dir.path().join("yt_downloader").exists(),
        "Temp dir should be removed once empty"
    );
}

// ============================================================================
// HTTP Round-Trip Tests
// ============================================================================

/// Test the whole HTTP path: router to extractor to streamed response
#[tokio::test]
#[serial]
async fn test_live_http_round_trip() {
    if !has_live_tooling() {
        eprintln!("Skipping: yt-dlp not found on PATH");
        return;
    }

    let (downloader, _temp_dir) = create_live_downloader()
        .await
        .expect("Failed to create downloader");

    let config = downloader.get_config();
    let app = media_dl::api::create_router(downloader.clone(), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get local addr");
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    let base = format!("http://{}", addr);
    let client = reqwest::Client::new();

    // Metadata endpoint
    let info: serde_json::Value = client
        .get(format!("{}/video-info", base))
        .query(&[("videoId", test_video_id())])
        .send()
        .await
        .expect("video-info request failed")
        .json()
        .await
        .expect("video-info returned invalid JSON");
    println!("video-info: {}", info);
    assert!(info["title"].is_string(), "Expected a title field");

    // Download endpoint streams the artifact back
    let response = client
        .get(format!("{}/download", base))
        .query(&[
            ("videoId", test_video_id()),
            ("quality", "360p".to_string()),
        ])
        .send()
        .await
        .expect("download request failed");

    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["content-type"], "video/mp4");
    let disposition = response.headers()["content-disposition"]
        .to_str()
        .expect("disposition not utf-8")
        .to_string();
    assert!(
        disposition.starts_with("attachment; filename="),
        "Unexpected disposition: {}",
        disposition
    );

    let bytes = response.bytes().await.expect("Failed to read body");
    println!("Streamed {} bytes over HTTP", bytes.len());
    assert!(!bytes.is_empty(), "Streamed body should not be empty");

    server.abort();
    downloader.shutdown().await.ok();
}
