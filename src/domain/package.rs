//! Package requests and resolution results

use super::SemanticVersion;
use std::fmt;

/// Constraint used when a specifier carries no `@version` suffix
pub const DEFAULT_CONSTRAINT: &str = "*";

/// One package requested on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    /// Package name, possibly scoped (`@scope/name`)
    pub name: String,
    /// Whether the package goes into devDependencies
    pub is_dev: bool,
    /// Version range, dist-tag, or `*`
    pub constraint: String,
}

impl PackageRequest {
    /// Creates a new request
    pub fn new(name: impl Into<String>, is_dev: bool, constraint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dev,
            constraint: constraint.into(),
        }
    }
}

impl fmt::Display for PackageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dev_marker = if self.is_dev { " (dev)" } else { "" };
        write!(f, "{}@{}{}", self.name, self.constraint, dev_marker)
    }
}

/// A requested package pinned to a concrete version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackage {
    pub name: String,
    pub is_dev: bool,
    pub version: SemanticVersion,
    /// Whether the published version declares `types` or `typings`
    pub typed: bool,
}

impl ResolvedPackage {
    /// Creates a resolved package from its request
    pub fn new(request: &PackageRequest, version: SemanticVersion, typed: bool) -> Self {
        Self {
            name: request.name.clone(),
            is_dev: request.is_dev,
            version,
            typed,
        }
    }
}

impl fmt::Display for ResolvedPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// A `@types/*` package installed alongside an untyped dependency.
///
/// Companions always land in devDependencies and are typed by definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypesCompanion {
    /// The companion package name (e.g. `@types/scope__name`)
    pub name: String,
    /// The package the declarations are for
    pub subject: String,
    pub version: SemanticVersion,
}

impl TypesCompanion {
    pub fn is_dev(&self) -> bool {
        true
    }

    pub fn typed(&self) -> bool {
        true
    }
}

impl fmt::Display for TypesCompanion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}
