//! HTTP client with base URL resolution and request timeouts.

use std::time::Duration;

use crate::{FetchError, Response};

/// HTTP client for outbound reads against the storefront API.
///
/// A thin wrapper around `reqwest::Client` that resolves relative paths
/// against a base URL and buffers the response.
#[derive(Debug, Clone)]
pub struct FetchClient {
    inner: reqwest::Client,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
            base_url: None,
            timeout: None,
        }
    }

    /// Create a client with a base URL that will be prepended to relative paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Give up on requests that take longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The configured base URL.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Resolve `url` against the base URL.
    pub fn resolve(&self, url: &str) -> String {
        match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    url.trim_start_matches('/')
                )
            }
            _ => url.to_string(),
        }
    }

    /// Create a GET request.
    pub fn get(&self, url: &str) -> ClientRequestBuilder {
        let mut builder = self
            .inner
            .get(self.resolve(url))
            .header("Accept", "application/json");
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        ClientRequestBuilder { builder }
    }

    /// GET `url` and decode a JSON body, failing on non-2xx statuses.
    pub async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        self.get(url).send().await?.error_for_status()?.json()
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    builder: reqwest::RequestBuilder,
}

impl ClientRequestBuilder {
    /// Send the request and buffer the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        let response = self.builder.send().await?;
        Response::read(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_paths() {
        let client = FetchClient::new().with_base_url("http://localhost:3333/");

        assert_eq!(client.resolve("/products/1"), "http://localhost:3333/products/1");
        assert_eq!(client.resolve("stock/1"), "http://localhost:3333/stock/1");
    }

    #[test]
    fn test_resolve_absolute_urls_untouched() {
        let client = FetchClient::new().with_base_url("http://localhost:3333");
        assert_eq!(
            client.resolve("https://cdn.example.com/p/1"),
            "https://cdn.example.com/p/1"
        );
    }

    #[test]
    fn test_resolve_without_base() {
        let client = FetchClient::new();
        assert_eq!(client.base_url(), None);
        assert_eq!(client.resolve("/products/1"), "/products/1");
    }

    #[tokio::test]
    async fn test_invalid_url_is_fetch_error() {
        let client = FetchClient::new();
        let result = client.get_json::<serde_json::Value>("not a url").await;
        assert!(result.is_err());
    }
}
