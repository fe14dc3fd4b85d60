//! Core types for media-dl

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use utoipa::ToSchema;

use crate::extractor::MediaMetadata;

/// Requested media quality
///
/// The fixed set of quality tags the service recognizes. Anything outside the
/// set resolves to [`Quality::Best`] — a defined default, not an error — so a
/// raw request string never reaches a format selector or a filesystem path.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum Quality {
    /// Up to 360p
    #[serde(rename = "360p")]
    Q360,
    /// Up to 480p
    #[serde(rename = "480p")]
    Q480,
    /// Up to 720p (HD)
    #[serde(rename = "720p")]
    Q720,
    /// Up to 1080p (Full HD)
    #[serde(rename = "1080p")]
    Q1080,
    /// Best available
    #[serde(rename = "best")]
    Best,
}

impl Quality {
    /// Every recognized quality tag, in presentation order
    pub const ALL: [Quality; 5] = [
        Quality::Q360,
        Quality::Q480,
        Quality::Q720,
        Quality::Q1080,
        Quality::Best,
    ];

    /// The height-constrained tags that carry a size-estimate rate
    pub const FIXED: [Quality; 4] = [Quality::Q360, Quality::Q480, Quality::Q720, Quality::Q1080];

    /// Parse a quality tag. Unknown tags resolve to `Best` by contract.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "360p" => Quality::Q360,
            "480p" => Quality::Q480,
            "720p" => Quality::Q720,
            "1080p" => Quality::Q1080,
            _ => Quality::Best,
        }
    }

    /// The canonical tag string
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Q360 => "360p",
            Quality::Q480 => "480p",
            Quality::Q720 => "720p",
            Quality::Q1080 => "1080p",
            Quality::Best => "best",
        }
    }

    /// Human-readable description shown by the `/qualities` endpoint
    pub fn label(&self) -> &'static str {
        match self {
            Quality::Q360 => "360p quality",
            Quality::Q480 => "480p quality",
            Quality::Q720 => "720p HD quality",
            Quality::Q1080 => "1080p Full HD quality",
            Quality::Best => "Best available quality",
        }
    }

    /// Format-selection expression handed to the extraction collaborator.
    ///
    /// Three-tier fallback chain: best video within the height cap in mp4 plus
    /// best m4a audio, then best overall within the cap in mp4, then best
    /// overall mp4. `Best` skips the height cap entirely.
    pub fn format_selector(&self) -> &'static str {
        match self {
            Quality::Q360 => {
                "bestvideo[height<=360][ext=mp4]+bestaudio[ext=m4a]/best[height<=360][ext=mp4]/best[ext=mp4]"
            }
            Quality::Q480 => {
                "bestvideo[height<=480][ext=mp4]+bestaudio[ext=m4a]/best[height<=480][ext=mp4]/best[ext=mp4]"
            }
            Quality::Q720 => {
                "bestvideo[height<=720][ext=mp4]+bestaudio[ext=m4a]/best[height<=720][ext=mp4]/best[ext=mp4]"
            }
            Quality::Q1080 => {
                "bestvideo[height<=1080][ext=mp4]+bestaudio[ext=m4a]/best[height<=1080][ext=mp4]/best[ext=mp4]"
            }
            Quality::Best => "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/mp4",
        }
    }

    /// Rough size-estimate rate in MB per minute of media, from typical
    /// bitrates at each height. `Best` has no height and therefore no rate.
    pub fn estimated_mb_per_minute(&self) -> Option<f64> {
        match self {
            Quality::Q360 => Some(5.0),
            Quality::Q480 => Some(8.0),
            Quality::Q720 => Some(15.0),
            Quality::Q1080 => Some(25.0),
            Quality::Best => None,
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Heuristic size estimate for one quality tier
///
/// Sizes are always estimates derived from duration and a per-quality rate,
/// never probed from the origin; `estimated` is always `true` to make that
/// explicit to API consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QualityEstimate {
    /// Estimated size in bytes
    pub size_bytes: u64,
    /// Estimated size in MB, rounded to one decimal
    pub size_mb: f64,
    /// Display string, `"{mb} MB"` below 1024 MB, `"{gb} GB"` above
    pub size_formatted: String,
    /// Always true — these numbers are heuristics
    pub estimated: bool,
}

impl QualityEstimate {
    /// Estimate from a MB-per-minute rate and a duration in minutes
    pub fn from_rate(mb_per_minute: f64, duration_minutes: f64) -> Self {
        let size_mb = round_one_decimal(duration_minutes * mb_per_minute);
        let size_bytes = (size_mb * 1024.0 * 1024.0) as u64;
        let size_formatted = if size_mb < 1024.0 {
            format!("{size_mb:.1} MB")
        } else {
            format!("{:.1} GB", round_one_decimal(size_mb / 1024.0))
        };

        Self {
            size_bytes,
            size_mb,
            size_formatted,
            estimated: true,
        }
    }
}

/// Response body for the `/video-info` endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VideoInfo {
    /// Display title reported by the origin (empty string when unknown)
    pub title: String,
    /// Duration in seconds (0 when unknown)
    pub duration: f64,
    /// Per-quality size estimates for the height-constrained tags
    pub qualities: BTreeMap<Quality, QualityEstimate>,
}

impl VideoInfo {
    /// Build the response from extractor metadata.
    ///
    /// The reported duration defaults to 0 when the origin did not provide
    /// one, but the size estimates fall back to a 3-minute baseline so the
    /// caller still gets usable numbers.
    pub fn from_metadata(metadata: &MediaMetadata) -> Self {
        let duration_minutes = metadata.duration.unwrap_or(180.0) / 60.0;

        let qualities = Quality::FIXED
            .into_iter()
            .filter_map(|quality| {
                quality
                    .estimated_mb_per_minute()
                    .map(|rate| (quality, QualityEstimate::from_rate(rate, duration_minutes)))
            })
            .collect();

        Self {
            title: metadata.title.clone().unwrap_or_default(),
            duration: metadata.duration.unwrap_or(0.0),
            qualities,
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
