//! Type-coverage classification
//!
//! A resolved package is typed when its published manifest declares `types`
//! or `typings`. In a typed project, untyped production dependencies get a
//! `@types/*` companion pinned to the same major version.

use crate::domain::{Failure, Outcome, ResolvedPackage, SemanticVersion, TypesCompanion};
use crate::manifest::PackageManifest;
use crate::registry::Registry;
use crate::resolver::{pick_version, NpmRange};

/// Scope holding declaration packages
pub const TYPES_SCOPE: &str = "@types/";

/// Dependencies that make a project typed
pub const TYPED_PROJECT_MARKERS: &[&str] = &["typescript", "ts-node"];

/// Name of the declarations package for `package`.
///
/// `foo` → `@types/foo`, `@scope/name` → `@types/scope__name`
pub fn types_package_name(package: &str) -> String {
    match package.strip_prefix('@') {
        Some(scoped) if scoped.contains('/') => {
            format!("{}{}", TYPES_SCOPE, scoped.replacen('/', "__", 1))
        }
        _ => format!("{}{}", TYPES_SCOPE, package),
    }
}

/// Returns true for packages in the `@types` scope
pub fn is_types_package(package: &str) -> bool {
    package.starts_with(TYPES_SCOPE)
}

/// Returns true if the project depends on TypeScript tooling in any section
pub fn is_typed_project(manifest: &PackageManifest) -> bool {
    TYPED_PROJECT_MARKERS
        .iter()
        .any(|marker| manifest.has_dependency(marker))
}

/// Returns true if a companion should be looked up for the package
pub fn needs_companion(package: &ResolvedPackage) -> bool {
    !is_types_package(&package.name) && !package.is_dev && !package.typed
}

/// Check whether the published version declares its own types
pub async fn check_typed(
    registry: &dyn Registry,
    package: &str,
    version: &SemanticVersion,
) -> Outcome<bool> {
    registry
        .version_manifest(package, version.raw())
        .await
        .map(|manifest| manifest.declares_types())
        .map_err(|e| Failure::new(format!("Failed to fetch {}@{}: {}", package, version, e)))
}

/// Result of looking up a declarations package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanionLookup {
    Found(TypesCompanion),
    Missing { subject: String, types_name: String },
}

impl CompanionLookup {
    /// Warning shown when no companion exists
    pub fn warning(&self) -> Option<String> {
        match self {
            CompanionLookup::Found(_) => None,
            CompanionLookup::Missing {
                subject,
                types_name,
            } => Some(format!(
                "{} is not typed, but {} is not found",
                subject, types_name
            )),
        }
    }
}

/// Look up the companion of an untyped package within `~<major>`.
///
/// Any miss (unknown package, nothing in range, failed read) yields
/// [`CompanionLookup::Missing`].
pub async fn find_companion(registry: &dyn Registry, package: &ResolvedPackage) -> CompanionLookup {
    let types_name = types_package_name(&package.name);
    let range_text = format!("~{}", package.version.major());

    let missing = || CompanionLookup::Missing {
        subject: package.name.clone(),
        types_name: types_name.clone(),
    };

    let range = match NpmRange::parse(&range_text) {
        Ok(range) => range,
        Err(_) => return missing(),
    };

    let packument = match registry.packument(&types_name).await {
        Ok(packument) => packument,
        Err(e) => {
            tracing::debug!(package = %types_name, error = %e, "companion lookup failed");
            return missing();
        }
    };

    match pick_version(&packument, &range) {
        Some(version) => CompanionLookup::Found(TypesCompanion {
            name: types_name.clone(),
            subject: package.name.clone(),
            version,
        }),
        None => {
            tracing::debug!(package = %types_name, range = %range_text, "no companion in range");
            missing()
        }
    }
}
