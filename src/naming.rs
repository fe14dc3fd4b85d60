//! Filename derivation for downloaded artifacts
//!
//! Titles come from an untrusted origin and must never reach the filesystem
//! as-is. The helpers here produce the two names one download needs: the
//! on-disk storage name (unique per request) and the attachment name offered
//! to the client (stable per title + quality).

use crate::types::Quality;
use std::sync::atomic::{AtomicU64, Ordering};

// Storage stamps are second-resolution; the sequence keeps two requests
// inside the same second from colliding. Process-wide on purpose.
static NEXT_STAMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Derive a safe, bounded on-disk name component from an untrusted title.
///
/// Keeps only ASCII alphanumerics, spaces, hyphens and underscores, trims
/// trailing whitespace, replaces the remaining spaces with underscores, and
/// truncates to 50 characters. An empty result falls back to `fallback_id`,
/// so the output is always non-empty given a non-empty identifier.
pub fn sanitize_title(raw: &str, fallback_id: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let cleaned: String = kept.trim_end().replace(' ', "_").chars().take(50).collect();

    if cleaned.is_empty() {
        fallback_id.to_string()
    } else {
        cleaned
    }
}

/// On-disk filename for one download: `{title}_{quality}_{stamp}.mp4`.
///
/// The stamp makes the path unique per request, so concurrent downloads of
/// the same video at the same quality never share a file.
pub fn storage_file_name(safe_title: &str, quality: Quality) -> String {
    format!("{safe_title}_{}_{}.mp4", quality.as_str(), unique_stamp())
}

/// Attachment filename offered to the client: `{title}_{quality}.mp4`.
///
/// Deliberately distinct from the storage name — the client should not see
/// the internal stamp.
pub fn attachment_file_name(safe_title: &str, quality: Quality) -> String {
    format!("{safe_title}_{}.mp4", quality.as_str())
}

/// Timestamp component plus a process-wide sequence number.
fn unique_stamp() -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let seq = NEXT_STAMP_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{timestamp}_{seq}")
}
