//! Static host for the browser bundle.
//!
//! - `GET /health` - liveness check
//! - `ANY /api/{*path}` - forwarded to the recognition backend
//! - everything else - embedded SPA assets, `index.html` for unknown paths

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{any, get};
use axum::Router;
use rust_embed::RustEmbed;
use serde_json::json;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::HostConfig;

/// Built SPA bundle.
#[derive(RustEmbed)]
#[folder = "public/"]
struct Assets;

const INDEX: &str = "index.html";

/// Request headers passed through to the backend.
const FORWARDED_REQUEST: [header::HeaderName; 3] =
    [header::CONTENT_TYPE, header::COOKIE, header::ACCEPT];

/// Response headers passed back to the browser.
const FORWARDED_RESPONSE: [header::HeaderName; 3] =
    [header::CONTENT_TYPE, header::SET_COOKIE, header::CACHE_CONTROL];

struct HostState {
    client: reqwest::Client,
    backend: String,
}

pub fn router(config: &HostConfig) -> Router {
    let state = Arc::new(HostState {
        client: reqwest::Client::new(),
        backend: config.backend_base().to_string(),
    });

    Router::new()
        .route("/health", get(health))
        .route("/api/{*path}", any(forward))
        .with_state(state)
        .fallback(static_asset)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(config: HostConfig) -> Result<()> {
    let addr = config.socket_addr();
    let app = router(&config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!(backend = %config.backend_base(), "Listening on http://{}", addr);

    axum::serve(listener, app).await.context("Host server error")?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "frass-web",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn forward(
    State(state): State<Arc<HostState>>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut url = format!("{}/api/{}", state.backend, path);
    if let Some(query) = query {
        url.push('?');
        url.push_str(&query);
    }

    let mut request = state.client.request(method.clone(), &url);
    for name in FORWARDED_REQUEST {
        for value in headers.get_all(&name) {
            request = request.header(name.clone(), value.clone());
        }
    }
    if !body.is_empty() {
        request = request.body(body);
    }

    let upstream = match request.send().await {
        Ok(upstream) => upstream,
        Err(e) => {
            warn!(%method, %url, "Backend unreachable: {}", e);
            return bad_gateway(format!("Backend unreachable: {e}"));
        }
    };

    let status = upstream.status();
    let mut forwarded = HeaderMap::new();
    for name in FORWARDED_RESPONSE {
        for value in upstream.headers().get_all(&name) {
            forwarded.append(name.clone(), value.clone());
        }
    }

    match upstream.bytes().await {
        Ok(bytes) => (status, forwarded, bytes).into_response(),
        Err(e) => {
            warn!(%method, %url, "Backend reply truncated: {}", e);
            bad_gateway(format!("Backend reply truncated: {e}"))
        }
    }
}

fn bad_gateway(message: String) -> Response {
    (
        StatusCode::BAD_GATEWAY,
        Json(json!({ "status": "error", "message": message })),
    )
        .into_response()
}

async fn static_asset(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    let path = if path.is_empty() { INDEX } else { path };

    match Assets::get(path) {
        Some(file) => asset_response(path, file.data.into_owned()),
        None => match Assets::get(INDEX) {
            Some(index) => asset_response(INDEX, index.data.into_owned()),
            None => (StatusCode::NOT_FOUND, "UI bundle missing").into_response(),
        },
    }
}

fn asset_response(path: &str, data: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    match HeaderValue::from_str(mime.as_ref()) {
        Ok(content_type) => ([(header::CONTENT_TYPE, content_type)], data).into_response(),
        Err(_) => data.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn config_for(backend_url: &str) -> HostConfig {
        HostConfig {
            backend_url: backend_url.to_string(),
            ..HostConfig::default()
        }
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Fake backend echoing what it received.
    async fn spawn_backend() -> String {
        async fn echo(
            method: Method,
            uri: Uri,
            headers: HeaderMap,
            body: Bytes,
        ) -> impl IntoResponse {
            let cookie = headers
                .get(header::COOKIE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            (
                [(header::SET_COOKIE, "session=abc")],
                Json(json!({
                    "status": "success",
                    "method": method.as_str(),
                    "uri": uri.to_string(),
                    "cookie": cookie,
                    "body": String::from_utf8_lossy(&body),
                })),
            )
        }

        let app = Router::new().route("/api/{*path}", any(echo));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(&HostConfig::default());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["service"], "frass-web");
    }

    #[tokio::test]
    async fn test_forwards_method_query_cookie_and_body() {
        let backend = spawn_backend().await;
        let app = router(&config_for(&format!("{backend}/")));

        let request = Request::post("/api/login?next=home")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=x")
            .header(header::COOKIE, "session=old")
            .body(Body::from("payload"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::SET_COOKIE], "session=abc");
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["method"], "POST");
        assert_eq!(body["uri"], "/api/login?next=home");
        assert_eq!(body["cookie"], "session=old");
        assert_eq!(body["body"], "payload");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_bad_gateway() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let app = router(&config_for(&format!("http://{addr}")));
        let response = app
            .oneshot(Request::get("/api/students").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["status"], "error");
        assert!(body["message"].as_str().unwrap().starts_with("Backend unreachable"));
    }

    #[tokio::test]
    async fn test_unknown_paths_serve_index() {
        let app = router(&HostConfig::default());
        let response = app
            .oneshot(Request::get("/some/deep/link").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");
        assert!(body_text(response).await.contains("<div id=\"main\">"));
    }

    #[tokio::test]
    async fn test_assets_get_their_mime_type() {
        let app = router(&HostConfig::default());
        let response = app
            .oneshot(Request::get("/style.css").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
    }
}
