//! Semantic versions as published by the registry

use semver::Version;
use std::cmp::Ordering;
use std::fmt;

/// A parsed semantic version that remembers the string it was parsed from.
///
/// The raw string is what gets written into package.json, so a registry
/// spelling such as `v1.2.3` is preserved while comparisons use the parsed
/// form.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    raw: String,
    version: Version,
}

impl SemanticVersion {
    /// Parse a version string; surrounding whitespace and a leading `v` are accepted
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let plain = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let version = Version::parse(plain).ok()?;
        Some(Self {
            raw: trimmed.to_string(),
            version,
        })
    }

    /// The version string as published
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parsed version
    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn major(&self) -> u64 {
        self.version.major
    }

}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
    }
}

impl Eq for SemanticVersion {}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version.cmp(&other.version)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
