//! HTTP client implementation

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::errors::PortalError;

/// HTTP client for the static report host
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PortalError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = Url::parse(base_url.trim_end_matches('/'))?;
        if base_url.cannot_be_a_base() {
            return Err(PortalError::ConfigError(format!(
                "Base URL cannot carry a path: {}",
                base_url
            )));
        }

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a URL below the base URL, percent-encoding each segment
    pub fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Make a GET request and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, PortalError> {
        let url = self.url_for(segments);
        debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            debug!("HTTP GET failed: {} - {}", status, url);
            return Err(PortalError::StatusError {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        let value = serde_json::from_slice(&body)?;
        Ok(value)
    }
}
