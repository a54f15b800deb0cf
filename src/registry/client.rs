//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - Status code mapping to [`RegistryError`]
//!
//! Requests are not retried; a failed read is reported to the caller as is.

use crate::error::RegistryError;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("lnpm/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                RegistryError::network_error(
                    String::new(),
                    format!("failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self { client })
    }

    /// Perform a GET request and parse the JSON body
    ///
    /// `package` only gives errors their context.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        accept: &str,
        package: &str,
    ) -> Result<T, RegistryError> {
        tracing::debug!(url, package, "GET");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, accept)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RegistryError::timeout(package)
                } else {
                    RegistryError::network_error(package, e.to_string())
                }
            })?;

        let status = response.status();
        tracing::trace!(url, %status, "response");

        if status == StatusCode::NOT_FOUND {
            return Err(RegistryError::package_not_found(package));
        }
        if !status.is_success() {
            return Err(RegistryError::network_error(package, format!("HTTP {}", status)));
        }

        response.json::<T>().await.map_err(|e| {
            RegistryError::invalid_response(package, format!("failed to parse JSON: {}", e))
        })
    }
}
