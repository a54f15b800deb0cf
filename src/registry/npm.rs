//! npm Registry adapter
//!
//! Reads package metadata from an npm-compatible registry.
//! API endpoints:
//! - `{registry}/{package}`: packument (versions and dist-tags)
//! - `{registry}/{package}/{version}`: manifest of one version

use crate::error::RegistryError;
use crate::registry::{HttpClient, Packument, Registry, VersionManifest};
use async_trait::async_trait;
use reqwest::Url;

/// Public npm registry
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org/";

/// Abbreviated metadata is enough for resolution and much smaller
const PACKUMENT_ACCEPT: &str =
    "application/vnd.npm.install-v1+json; q=1.0, application/json; q=0.8, */*";

const MANIFEST_ACCEPT: &str = "application/json";

/// npm Registry adapter
pub struct NpmRegistry {
    client: HttpClient,
    base_url: Url,
}

impl NpmRegistry {
    /// Create an adapter for the registry at `base_url`
    pub fn new(client: HttpClient, base_url: &str) -> Result<Self, RegistryError> {
        // Url::join drops the last path segment unless it ends with '/'
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let base_url = Url::parse(&normalized).map_err(|e| RegistryError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(RegistryError::InvalidUrl {
                url: base_url.to_string(),
                message: "expected an http or https URL".to_string(),
            });
        }

        Ok(Self { client, base_url })
    }

    /// Registry base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the packument URL; the scope separator is percent-encoded
    fn packument_url(&self, package: &str) -> Result<Url, RegistryError> {
        let encoded = if package.starts_with('@') {
            package.replacen('/', "%2F", 1)
        } else {
            package.to_string()
        };
        self.join(&encoded, package)
    }

    /// Build the URL of one version's manifest
    fn version_url(&self, package: &str, version: &str) -> Result<Url, RegistryError> {
        self.join(&format!("{}/{}", package, version), package)
    }

    fn join(&self, path: &str, package: &str) -> Result<Url, RegistryError> {
        self.base_url.join(path).map_err(|e| {
            RegistryError::invalid_response(package, format!("failed to build URL: {}", e))
        })
    }
}

#[async_trait]
impl Registry for NpmRegistry {
    async fn packument(&self, package: &str) -> Result<Packument, RegistryError> {
        let url = self.packument_url(package)?;
        self.client
            .get_json(url.as_str(), PACKUMENT_ACCEPT, package)
            .await
    }

    async fn version_manifest(
        &self,
        package: &str,
        version: &str,
    ) -> Result<VersionManifest, RegistryError> {
        let url = self.version_url(package, version)?;
        self.client
            .get_json(url.as_str(), MANIFEST_ACCEPT, package)
            .await
    }
}
