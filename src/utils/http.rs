// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::HttpConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &HttpConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch a response body as text whatever its status.
///
/// Only transport and body read failures are errors.
pub async fn fetch_body(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        log::warn!("{url} answered {status}; using the body anyway");
    }
    Ok(response.text().await?)
}

/// Fetch a page body as text. Non-2xx responses are errors.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::fetch(url, format!("unexpected status {status}")));
    }
    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_text_ok() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/page");
                then.status(200).body("<html>hi</html>");
            })
            .await;

        let client = create_async_client(&HttpConfig::default()).unwrap();
        let body = fetch_text(&client, &server.url("/page")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(body, "<html>hi</html>");
    }

    #[tokio::test]
    async fn test_fetch_text_rejects_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/page");
                then.status(503);
            })
            .await;

        let client = create_async_client(&HttpConfig::default()).unwrap();
        let err = fetch_text(&client, &server.url("/page")).await.unwrap_err();
        assert!(matches!(err, AppError::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_fetch_body_keeps_error_page() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/page");
                then.status(500).body("oops");
            })
            .await;

        let client = create_async_client(&HttpConfig::default()).unwrap();
        let body = fetch_body(&client, &server.url("/page")).await.unwrap();
        assert_eq!(body, "oops");
    }

    #[tokio::test]
    async fn test_fetch_body_unreachable_is_error() {
        let client = create_async_client(&HttpConfig::default()).unwrap();
        let err = fetch_body(&client, "http://127.0.0.1:9/page").await.unwrap_err();
        assert!(matches!(err, AppError::Http(_)));
    }
}
