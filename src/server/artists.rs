//! CORS proxy for the boycott source page.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};
use reqwest::Client;
use tower_http::cors::CorsLayer;

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::utils::http;

/// Body returned when the upstream page cannot be fetched.
pub const PROXY_FAILURE: &str = "Failed to fetch artist names.";

/// Shared state for the proxy routes.
pub struct ProxyState {
    client: Client,
    source_url: String,
}

impl ProxyState {
    pub fn new(client: Client, source_url: impl Into<String>) -> Self {
        Self {
            client,
            source_url: source_url.into(),
        }
    }
}

/// Build the proxy router, allowing cross-origin calls from `allowed_origin` only.
pub fn router(state: Arc<ProxyState>, allowed_origin: &str) -> Result<Router> {
    let origin = HeaderValue::from_str(allowed_origin).map_err(|e| {
        AppError::config(format!("Invalid allowed origin {allowed_origin:?}: {e}"))
    })?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::HEAD]);

    Ok(Router::new()
        .route("/api/artists", get(artists_handler))
        .layer(cors)
        .with_state(state))
}

/// Build the proxy router from publisher configuration.
pub fn router_from_config(config: &Config) -> Result<Router> {
    let client = http::create_async_client(&config.http)?;
    let state = Arc::new(ProxyState::new(client, &config.source.url));
    router(state, &config.server.allowed_origin)
}

async fn artists_handler(State(state): State<Arc<ProxyState>>) -> Response {
    match http::fetch_text(&state.client, &state.source_url).await {
        Ok(body) => (
            StatusCode::OK,
            [(CONTENT_TYPE, "text/html; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            log::error!("Error fetching data from the target URL: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, PROXY_FAILURE).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HttpConfig;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use httpmock::prelude::*;
    use tower::ServiceExt;

    const ORIGIN: &str = "https://nesma-belkhodja.github.io";

    fn app(url: String) -> Router {
        let client = http::create_async_client(&HttpConfig::default()).unwrap();
        router(Arc::new(ProxyState::new(client, url)), ORIGIN).unwrap()
    }

    fn get_artists(origin: &str) -> Request<Body> {
        Request::builder()
            .uri("/api/artists")
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_proxy_forwards_raw_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/list");
                then.status(200).body("<p>ARTISTS · Alpha</p>");
            })
            .await;

        let response = app(server.url("/list"))
            .oneshot(get_artists(ORIGIN))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            ORIGIN
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<p>ARTISTS \xc2\xb7 Alpha</p>");
    }

    #[tokio::test]
    async fn test_proxy_upstream_error_is_500() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/list");
                then.status(404);
            })
            .await;

        let response = app(server.url("/list"))
            .oneshot(get_artists(ORIGIN))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], PROXY_FAILURE.as_bytes());
    }

    #[tokio::test]
    async fn test_proxy_unreachable_is_500() {
        let response = app("http://127.0.0.1:9/unreachable".to_string())
            .oneshot(get_artists(ORIGIN))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_other_origin_sees_only_configured_origin() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/list");
                then.status(200).body("ok");
            })
            .await;

        let response = app(server.url("/list"))
            .oneshot(get_artists("https://evil.example"))
            .await
            .unwrap();

        // The fixed origin is always sent; the caller's origin never is.
        let allowed = response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap();
        assert_eq!(allowed, ORIGIN);
        assert_ne!(allowed, "https://evil.example");
        assert_ne!(allowed, "*");
    }

    #[test]
    fn test_invalid_origin_is_config_error() {
        let client = http::create_async_client(&HttpConfig::default()).unwrap();
        let state = Arc::new(ProxyState::new(client, "http://localhost"));
        assert!(matches!(
            router(state, "bad\norigin"),
            Err(AppError::Config(_))
        ));
    }
}
