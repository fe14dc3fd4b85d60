//! Configuration types for media-dl

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use utoipa::ToSchema;

/// Top-level configuration for the media download service
///
/// All fields have sensible defaults, so `Config::default()` produces a fully
/// working configuration. Embedders can override individual sections with
/// struct-update syntax; the binary applies environment overrides via
/// [`Config::from_env`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Ephemeral storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// File retention and cleanup timing
    #[serde(default)]
    pub retention: RetentionConfig,

    /// Extraction collaborator settings
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

impl Config {
    /// Build a configuration from environment variables, starting from defaults.
    ///
    /// Recognized variables:
    /// - `PORT` — listen port (default 5000)
    /// - `HOST` — listen address (default `0.0.0.0`)
    /// - `YTDLP_PATH` — explicit path to the yt-dlp binary (default: search `PATH`)
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port.parse().map_err(|_| Error::Config {
                message: format!("invalid PORT value: {port}"),
                key: Some("PORT".to_string()),
            })?;
        }

        if let Ok(host) = std::env::var("HOST") {
            config.server.host = host;
        }

        if let Ok(path) = std::env::var("YTDLP_PATH") {
            config.extractor.binary_path = Some(PathBuf::from(path));
        }

        Ok(config)
    }
}

/// HTTP server configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ServerConfig {
    /// Address to listen on (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Enable permissive CORS headers on every response (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Enable Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,
}

impl ServerConfig {
    /// The `host:port` string the TCP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: true,
            swagger_ui: true,
        }
    }
}

/// Ephemeral storage configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct StorageConfig {
    /// Directory downloaded files are written to before delivery
    /// (default: `{system temp}/yt_downloader`)
    ///
    /// Created at startup if missing; removed at shutdown if empty.
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            temp_dir: default_temp_dir(),
        }
    }
}

/// Retention and cleanup timing configuration
///
/// Controls the three deletion triggers: the recurring age-based sweep, the
/// post-delivery grace period, and (indirectly) how long a failed download's
/// partial file can linger before the sweep reclaims it.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RetentionConfig {
    /// Seconds between retention sweeps (default: 300)
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Age in seconds past which a tracked file is deleted by the sweep (default: 3600)
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,

    /// Grace period in seconds between starting a response stream and deleting
    /// the served file (default: 30)
    ///
    /// A heuristic, not a guarantee: a client slower than the grace period can
    /// lose the file mid-transfer.
    #[serde(default = "default_stream_grace_secs")]
    pub stream_grace_secs: u64,
}

impl RetentionConfig {
    /// Interval between sweeper firings
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Maximum tracked-file age before the sweep deletes it
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }

    /// Delay before post-delivery cleanup
    pub fn stream_grace(&self) -> Duration {
        Duration::from_secs(self.stream_grace_secs)
    }
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: default_sweep_interval_secs(),
            max_age_secs: default_max_age_secs(),
            stream_grace_secs: default_stream_grace_secs(),
        }
    }
}

/// Extraction collaborator configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ExtractorConfig {
    /// Explicit path to the yt-dlp binary (default: discovered on `PATH`)
    #[serde(default)]
    pub binary_path: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_true() -> bool {
    true
}

fn default_temp_dir() -> PathBuf {
    std::env::temp_dir().join("yt_downloader")
}

fn default_sweep_interval_secs() -> u64 {
    300
}

fn default_max_age_secs() -> u64 {
    3600
}

fn default_stream_grace_secs() -> u64 {
    30
}
