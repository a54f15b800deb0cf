//! Registry adapters for fetching package metadata
//!
//! This module provides:
//! - The [`Registry`] read interface used by the install pipeline
//! - HTTP client shared foundation
//! - npm Registry adapter

mod client;
#[cfg(test)]
mod memory;
mod npm;
mod packument;

pub use client::HttpClient;
#[cfg(test)]
pub(crate) use memory::MemoryRegistry;
pub use npm::{NpmRegistry, DEFAULT_REGISTRY_URL};
pub use packument::{Packument, VersionManifest};

use crate::error::RegistryError;
use async_trait::async_trait;

/// Read interface of a package registry
#[async_trait]
pub trait Registry: Send + Sync {
    /// Fetch the packument (published versions and dist-tags) of a package
    async fn packument(&self, package: &str) -> Result<Packument, RegistryError>;

    /// Fetch the manifest of one published version
    async fn version_manifest(
        &self,
        package: &str,
        version: &str,
    ) -> Result<VersionManifest, RegistryError>;
}
