use super::*;
use crate::downloader::test_helpers::StubExtractor;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::time::Duration;
use tower::ServiceExt;


/// Helper to create a test MediaDownloader wrapped in Arc, along with a
/// handle to its stub extractor and the tempdir backing its storage (which
/// must be kept alive for the duration of the test).
async fn create_test_downloader(
    stub: StubExtractor,
) -> (Arc<MediaDownloader>, Arc<StubExtractor>, tempfile::TempDir) {
    let (downloader, stub, temp_dir) =
        crate::downloader::test_helpers::create_test_downloader(stub).await;
    (Arc::new(downloader), stub, temp_dir)
}

#[tokio::test]
async fn test_api_server_spawns() {
    let (downloader, _stub, _temp_dir) = create_test_downloader(StubExtractor::default()).await;

    // Test config already binds 127.0.0.1:0, so the OS assigns a free port
    let config = downloader.get_config();

    // Spawn the API server
    let api_handle = tokio::spawn({
        let downloader = downloader.clone();
        let config = config.clone();
        async move { start_api_server(downloader, config).await }
    });

    // Give it a moment to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Abort the server task; the bind succeeding without panic is the test
    api_handle.abort();
}

#[tokio::test]
async fn test_spawn_api_server_method() {
    let (downloader, _stub, _temp_dir) = create_test_downloader(StubExtractor::default()).await;

    // Use the spawn_api_server method
    let api_handle = downloader.spawn_api_server();

    // Give it a moment to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Abort the server task
    api_handle.abort();
}

#[tokio::test]
async fn test_cors_enabled() {
    // CORS is on by default
    let (downloader, _stub, _temp_dir) = create_test_downloader(StubExtractor::default()).await;
    let config = downloader.get_config();
    assert!(config.server.cors_enabled);

    let app = create_router(downloader, config);

    // Make a request with Origin header
    let request = Request::builder()
        .uri("/")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    // The CORS middleware should add access-control-allow-origin: * so any
    // browser client can call the service
    let allow_origin = response
        .headers()
        .get("access-control-allow-origin")
        .and_then(|v| v.to_str().ok());
    assert_eq!(
        allow_origin,
        Some("*"),
        "CORS header should be present and permissive when CORS is enabled"
    );
}

#[tokio::test]
async fn test_cors_preflight_lists_methods_and_headers() {
    let (downloader, _stub, _temp_dir) = create_test_downloader(StubExtractor::default()).await;
    let config = downloader.get_config();
    let app = create_router(downloader, config);

    // Browser preflight for a cross-origin GET
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/download")
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "GET")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_success());

    let headers = response.headers();
    let methods = headers
        .get("access-control-allow-methods")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(
        methods.contains("GET") && methods.contains("OPTIONS"),
        "preflight should allow GET and OPTIONS, got: {methods}"
    );

    let allowed_headers = headers
        .get("access-control-allow-headers")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();
    assert!(
        allowed_headers.contains("content-type"),
        "preflight should allow content-type, got: {allowed_headers}"
    );
}

#[tokio::test]
async fn test_cors_disabled() {
    let (downloader, _stub, _temp_dir) = create_test_downloader(StubExtractor::default()).await;

    let mut config = (*downloader.config).clone();
    config.server.cors_enabled = false;
    let config = Arc::new(config);

    let app = create_router(downloader, config);

    let request = Request::builder()
        .uri("/")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        !response.headers().contains_key("access-control-allow-origin"),
        "no CORS headers should be emitted when CORS is disabled"
    );
}

#[tokio::test]
async fn test_server_starts_and_responds() {
    let (downloader, _stub, _temp_dir) = create_test_downloader(StubExtractor::default()).await;

    // Bind to a random available port (port 0)
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let config = downloader.get_config();
    let server_downloader = downloader.clone();
    let server_handle = tokio::spawn(async move {
        let app = create_router(server_downloader, config);
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Make an HTTP request over a real socket
    let client = reqwest::Client::new();
    let url = format!("http://{}/", addr);
    let response = client.get(url).send().await.unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(body["status"], "running");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    // Shutdown the server
    server_handle.abort();
}

#[tokio::test]
async fn test_openapi_json_endpoint() {
    let (downloader, _stub, _temp_dir) = create_test_downloader(StubExtractor::default()).await;
    let config = downloader.get_config();

    // Swagger UI (and with it the spec route) is enabled by default
    assert!(config.server.swagger_ui);
    let app = create_router(downloader, config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value =
        serde_json::from_slice(&body).expect("Response should be valid JSON");

    // Verify it has the required OpenAPI fields
    assert!(json.get("openapi").is_some(), "Should have 'openapi' field");
    assert!(json.get("info").is_some(), "Should have 'info' field");
    assert!(json.get("paths").is_some(), "Should have 'paths' field");

    let openapi_version = json["openapi"].as_str().unwrap();
    assert!(openapi_version.starts_with("3."), "Should be OpenAPI 3.x");

    assert_eq!(json["info"]["title"], "media-dl REST API");

    // All four public endpoints should be documented
    let paths = json["paths"].as_object().unwrap();
    for path in ["/", "/qualities", "/video-info", "/download"] {
        assert!(
            paths.contains_key(path),
            "OpenAPI spec must contain path: {path}"
        );
    }
}

#[tokio::test]
async fn test_swagger_ui_enabled() {
    let (downloader, _stub, _temp_dir) = create_test_downloader(StubExtractor::default()).await;

    let mut config = (*downloader.config).clone();
    config.server.swagger_ui = true;
    let config = Arc::new(config);

    let app = create_router(downloader, config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/swagger-ui/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Swagger UI should return 200 OK (serving HTML)
    assert_eq!(
        response.status(),
        StatusCode::OK,
        "Swagger UI should be accessible when enabled"
    );

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_str = String::from_utf8(body.to_vec()).unwrap();

    assert!(
        body_str.contains("<!DOCTYPE html>") || body_str.contains("<html"),
        "Response should contain HTML"
    );
    assert!(
        body_str.contains("swagger") || body_str.contains("Swagger"),
        "Response should contain Swagger-related content"
    );
}

#[tokio::test]
async fn test_swagger_ui_disabled() {
    let (downloader, _stub, _temp_dir) = create_test_downloader(StubExtractor::default()).await;

    let mut config = (*downloader.config).clone();
    config.server.swagger_ui = false;
    let config = Arc::new(config);

    let app = create_router(downloader, config);

    // Both the UI and the spec route disappear together
    for uri in ["/swagger-ui/", "/api-docs/openapi.json"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::NOT_FOUND,
            "{uri} should not be accessible when Swagger UI is disabled"
        );
    }
}
