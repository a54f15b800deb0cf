//! In-memory registry
//!
//! Serves packuments and version manifests from fixtures.

use crate::error::RegistryError;
use crate::registry::{Packument, Registry, VersionManifest};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

/// Registry backed by maps
#[derive(Default)]
pub struct MemoryRegistry {
    packuments: HashMap<String, Packument>,
    typed: HashSet<(String, String)>,
    failing: Vec<String>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a packument
    pub fn with_packument(mut self, packument: Packument) -> Self {
        self.packuments.insert(packument.name.clone(), packument);
        self
    }

    /// Mark a published version as declaring `types`
    pub fn with_types(mut self, package: &str, version: &str) -> Self {
        self.typed.insert((package.to_string(), version.to_string()));
        self
    }

    /// Make every read of `package` fail with a network error
    pub fn with_failure(mut self, package: &str) -> Self {
        self.failing.push(package.to_string());
        self
    }

    fn check_failure(&self, package: &str) -> Result<(), RegistryError> {
        if self.failing.iter().any(|p| p == package) {
            return Err(RegistryError::network_error(package, "connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl Registry for MemoryRegistry {
    async fn packument(&self, package: &str) -> Result<Packument, RegistryError> {
        self.check_failure(package)?;
        self.packuments
            .get(package)
            .cloned()
            .ok_or_else(|| RegistryError::package_not_found(package))
    }

    async fn version_manifest(
        &self,
        package: &str,
        version: &str,
    ) -> Result<VersionManifest, RegistryError> {
        self.check_failure(package)?;

        let published = self
            .packuments
            .get(package)
            .is_some_and(|p| p.versions.contains_key(version));
        if !published {
            return Err(RegistryError::package_not_found(package));
        }

        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::from(package));
        fields.insert("version".to_string(), Value::from(version));
        if self
            .typed
            .contains(&(package.to_string(), version.to_string()))
        {
            fields.insert("types".to_string(), Value::from("index.d.ts"));
        }
        Ok(VersionManifest::from_fields(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> MemoryRegistry {
        MemoryRegistry::new()
            .with_packument(
                Packument::new("foo")
                    .with_version("1.0.0")
                    .with_dist_tag("latest", "1.0.0"),
            )
            .with_types("foo", "1.0.0")
            .with_failure("broken")
    }

    #[tokio::test]
    async fn test_packument_lookup() {
        let registry = registry();
        let packument = registry.packument("foo").await.unwrap();
        assert_eq!(packument.dist_tag("latest"), Some("1.0.0"));
    }

    #[tokio::test]
    async fn test_unknown_package() {
        let err = registry().packument("missing").await.unwrap_err();
        assert!(matches!(err, RegistryError::PackageNotFound { .. }));
    }

    #[tokio::test]
    async fn test_failing_package() {
        let err = registry().packument("broken").await.unwrap_err();
        assert!(matches!(err, RegistryError::NetworkError { .. }));
    }

    #[tokio::test]
    async fn test_version_manifest_types() {
        let registry = registry();
        let manifest = registry.version_manifest("foo", "1.0.0").await.unwrap();
        assert!(manifest.declares_types());
        assert!(registry.version_manifest("foo", "9.9.9").await.is_err());
    }
}
