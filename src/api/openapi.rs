//! OpenAPI documentation and schema generation
//!
//! This module defines the OpenAPI specification for the media-dl REST API
//! using utoipa for compile-time spec generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the media-dl REST API
///
/// This struct is used to generate the OpenAPI specification that describes
/// all available endpoints, request/response types, and API behavior.
///
/// The spec can be accessed via:
/// - `/api-docs/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "media-dl REST API",
        version = "0.1.0",
        description = "REST API for fetching media through yt-dlp and streaming it back from ephemeral storage",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        // System
        crate::api::routes::home,

        // Videos
        crate::api::routes::get_qualities,
        crate::api::routes::get_video_info,

        // Download
        crate::api::routes::download_video,
    ),
    components(schemas(
        // Core types from types.rs
        crate::types::Quality,
        crate::types::QualityEstimate,
        crate::types::VideoInfo,

        // API request/response types from routes
        crate::api::routes::HomeResponse,
        crate::api::routes::VideoInfoQuery,
        crate::api::routes::DownloadQuery,

        // Error types from error.rs
        crate::error::ErrorBody,
    )),
    tags(
        (name = "system", description = "Service status and endpoint directory"),
        (name = "videos", description = "Quality listing and video metadata with size estimates"),
        (name = "download", description = "Media download and streamed delivery"),
    )
)]
pub struct ApiDoc;
