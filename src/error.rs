//! Error types for media-dl
//!
//! This module provides comprehensive error handling for the library, including:
//! - Domain-specific error types (Download, Config, etc.)
//! - HTTP status code mapping for API integration
//! - The flat JSON error envelope used by the JSON endpoints

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for media-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for media-dl
///
/// This is the primary error type used throughout the library. Each variant includes
/// contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "PORT")
        key: Option<String>,
    },

    /// A required request parameter was not supplied
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// Metadata resolution for a source identifier failed
    #[error("failed to get video info: {0}")]
    MetadataFetch(String),

    /// Download-related error
    #[error("download error: {0}")]
    Download(#[from] DownloadError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Shutdown in progress - not accepting new downloads
    #[error("shutdown in progress: not accepting new downloads")]
    ShuttingDown,

    /// External tool execution failed (yt-dlp)
    #[error("external tool error: {0}")]
    ExternalTool(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),
}

/// Errors raised by one download orchestration, named by the phase that failed
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The extraction collaborator reported a failed download
    #[error("extractor reported failure: {0}")]
    Failed(String),

    /// The extractor returned success but the output file does not exist
    #[error("completed but output file not found")]
    Incomplete,

    /// The output file exists but contains zero bytes
    #[error("output file is empty")]
    EmptyArtifact,

    /// The finished file could not be opened for streaming to the client
    #[error("could not open output for streaming: {0}")]
    StreamSetup(String),
}

/// Flat JSON error envelope returned by the JSON endpoints
///
/// The `/download` endpoint intentionally returns plain-text bodies instead,
/// since its success path is a binary stream.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable description of what went wrong
    pub error: String,
}

impl ErrorBody {
    /// Build an envelope from any displayable error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl From<&Error> for ErrorBody {
    fn from(error: &Error) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

/// Trait for mapping errors to HTTP status codes
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - Client error (invalid input)
            Error::Config { .. } => 400,
            Error::MissingParameter(_) => 400,

            // 500 Internal Server Error - the request was valid but the
            // retrieval pipeline failed somewhere
            Error::MetadataFetch(_) => 500,
            Error::Download(_) => 500,
            Error::Io(_) => 500,
            Error::Serialization(_) => 500,
            Error::ApiServerError(_) => 500,

            // 503 Service Unavailable
            Error::ShuttingDown => 503,
            Error::ExternalTool(_) => 503,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::MissingParameter(_) => "missing_parameter",
            Error::MetadataFetch(_) => "metadata_fetch_failed",
            Error::Download(e) => match e {
                DownloadError::Failed(_) => "download_failed",
                DownloadError::Incomplete => "download_incomplete",
                DownloadError::EmptyArtifact => "empty_artifact",
                DownloadError::StreamSetup(_) => "stream_setup_failed",
            },
            Error::Io(_) => "io_error",
            Error::ShuttingDown => "shutting_down",
            Error::ExternalTool(_) => "external_tool_error",
            Error::Serialization(_) => "serialization_error",
            Error::ApiServerError(_) => "api_server_error",
        }
    }
}
