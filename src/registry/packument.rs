//! Registry documents: packuments and per-version manifests

use crate::domain::SemanticVersion;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Registry metadata for a package name: published versions and dist-tags
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Packument {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "dist-tags", default)]
    pub dist_tags: HashMap<String, String>,
    #[serde(default)]
    pub versions: HashMap<String, Value>,
}

impl Packument {
    /// Create an empty packument
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a published version
    pub fn with_version(mut self, version: &str) -> Self {
        self.versions
            .insert(version.to_string(), serde_json::json!({ "version": version }));
        self
    }

    /// Point a dist-tag at a version
    pub fn with_dist_tag(mut self, tag: &str, version: &str) -> Self {
        self.dist_tags.insert(tag.to_string(), version.to_string());
        self
    }

    /// The version a dist-tag points to
    pub fn dist_tag(&self, tag: &str) -> Option<&str> {
        self.dist_tags.get(tag).map(String::as_str)
    }

    /// Every published version that parses as a semantic version
    pub fn parsed_versions(&self) -> Vec<SemanticVersion> {
        self.versions
            .keys()
            .filter_map(|v| SemanticVersion::parse(v))
            .collect()
    }
}

/// The manifest of one published version, as served by `/<name>/<version>`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct VersionManifest {
    fields: Map<String, Value>,
}

impl VersionManifest {
    /// Wrap an already parsed JSON object
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Returns true if the package declares `types` or `typings`
    pub fn declares_types(&self) -> bool {
        self.fields.contains_key("types") || self.fields.contains_key("typings")
    }
}
