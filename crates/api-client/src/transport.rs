//! HTTP transport seam
//!
//! The client only needs "GET this URL, give me the body". Anything that can
//! do that implements [`Transport`]; [`ReqwestTransport`] is the default.

use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use tracing::warn;

/// Performs a plain HTTP GET and returns the response body
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url`; network failures are returned as errors, HTTP error
    /// statuses are not
    async fn get(&self, url: &str) -> ApiResult<String>;
}

/// `reqwest`-backed transport
#[derive(Clone)]
pub struct ReqwestTransport {
    inner: Client,
}

impl ReqwestTransport {
    /// Build a transport with the given request timeout
    pub fn new(timeout: Duration) -> ApiResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("fatsecret-api-client/", env!("CARGO_PKG_VERSION"))),
        );

        let inner = Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self { inner })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> ApiResult<String> {
        let response = self.inner.get(url).send().await?;
        let status = response.status();

        // Upstream error payloads are data for the caller, not transport failures
        if !status.is_success() {
            warn!(status = status.as_u16(), "FatSecret returned a non-success status");
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_creation() {
        assert!(ReqwestTransport::new(Duration::from_secs(5)).is_ok());
    }
}
