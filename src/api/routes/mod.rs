//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`system`] — Service index and status
//! - [`videos`] — Quality listing and video metadata
//! - [`download`] — Media download and delivery

use serde::{Deserialize, Serialize};

mod download;
mod system;
mod videos;

// Re-export all handlers so `routes::function_name` continues to work
pub use download::*;
pub use system::*;
pub use videos::*;

// ============================================================================
// Query/Request Types (shared across handlers)
// ============================================================================

/// Query parameters for GET /video-info
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct VideoInfoQuery {
    /// Source video identifier
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

/// Query parameters for GET /download
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct DownloadQuery {
    /// Source video identifier
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
    /// Requested quality tag (default: "best"; unknown tags resolve to best)
    pub quality: Option<String>,
}

/// Response for GET / - service status and endpoint directory
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct HomeResponse {
    /// Always "running" once the server answers
    pub status: String,
    /// Human-readable service banner
    pub message: String,
    /// Crate version serving the request
    pub version: String,
    /// Usage patterns for the public endpoints
    pub endpoints: Vec<String>,
}
