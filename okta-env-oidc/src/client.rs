use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::error::DiscoveryError;

/// Blocking GET-and-parse-JSON primitive used for discovery.
pub trait DiscoveryClient: Send + Sync {
    /// Fetch `url` and parse the body as JSON.
    ///
    /// # Errors
    ///
    /// Transport failures map to [`DiscoveryError::Unreachable`], bodies that
    /// are not JSON to [`DiscoveryError::Malformed`], non-success statuses to
    /// [`DiscoveryError::Status`].
    fn get_json(&self, url: &Url) -> Result<serde_json::Value, DiscoveryError>;
}

impl<T: DiscoveryClient + ?Sized> DiscoveryClient for &T {
    fn get_json(&self, url: &Url) -> Result<serde_json::Value, DiscoveryError> {
        (**self).get_json(url)
    }
}

impl<T: DiscoveryClient + ?Sized> DiscoveryClient for Arc<T> {
    fn get_json(&self, url: &Url) -> Result<serde_json::Value, DiscoveryError> {
        (**self).get_json(url)
    }
}

impl<T: DiscoveryClient + ?Sized> DiscoveryClient for Box<T> {
    fn get_json(&self, url: &Url) -> Result<serde_json::Value, DiscoveryError> {
        (**self).get_json(url)
    }
}

/// [`DiscoveryClient`] backed by `reqwest::blocking`.
///
/// Must not be called from inside an async runtime; discovery runs during
/// bootstrap, before one is started.
#[derive(Debug, Clone)]
pub struct ReqwestDiscoveryClient {
    client: reqwest::blocking::Client,
}

impl ReqwestDiscoveryClient {
    /// Client with reqwest's default timeout (30 seconds).
    pub fn new() -> Result<Self, DiscoveryError> {
        Self::build(reqwest::blocking::Client::builder())
    }

    /// Client with a total request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, DiscoveryError> {
        Self::build(reqwest::blocking::Client::builder().timeout(timeout))
    }

    fn build(builder: reqwest::blocking::ClientBuilder) -> Result<Self, DiscoveryError> {
        let client = builder
            .build()
            .map_err(|e| DiscoveryError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl DiscoveryClient for ReqwestDiscoveryClient {
    fn get_json(&self, url: &Url) -> Result<serde_json::Value, DiscoveryError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|e| DiscoveryError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|e| DiscoveryError::Unreachable(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| DiscoveryError::Malformed(e.to_string()))
    }
}
