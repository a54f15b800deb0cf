//! Version resolution against a packument
//!
//! Resolution policy, in order:
//! 1. empty, `latest` or `*` → the `latest` dist-tag
//! 2. anything that is not an npm range → a dist-tag of that name
//! 3. an npm range → the highest published version satisfying it

mod range;

pub use range::{NpmRange, RangeError};

use crate::domain::{Failure, Outcome, PackageRequest, SemanticVersion, DEFAULT_CONSTRAINT};
use crate::registry::Packument;

/// Dist-tag every npm package is expected to carry
pub const LATEST_TAG: &str = "latest";

/// Resolve a request to one concrete version of the packument
pub fn resolve_version(
    request: &PackageRequest,
    packument: &Packument,
) -> Outcome<SemanticVersion> {
    let constraint = request.constraint.trim();

    let resolved = match constraint {
        "" | LATEST_TAG => lookup_tag(request, packument, LATEST_TAG)?,
        DEFAULT_CONSTRAINT => match packument.dist_tag(LATEST_TAG) {
            Some(latest) => latest.to_string(),
            None => max_satisfying(request, packument, constraint)?,
        },
        _ if NpmRange::is_valid(constraint) => max_satisfying(request, packument, constraint)?,
        tag => lookup_tag(request, packument, tag)?,
    };

    SemanticVersion::parse(&resolved)
        .ok_or_else(|| Failure::new(format!("Invalid version: {}", resolved)))
}

/// Pick the version npm would install for `range`: the `latest` tag when it
/// satisfies the range, otherwise the highest satisfying version.
pub fn pick_version(packument: &Packument, range: &NpmRange) -> Option<SemanticVersion> {
    let latest = packument
        .dist_tag(LATEST_TAG)
        .and_then(SemanticVersion::parse)
        .filter(|latest| range.matches(latest.version()));
    if latest.is_some() {
        return latest;
    }

    let versions = packument.parsed_versions();
    range.max_satisfying(&versions).cloned()
}

fn lookup_tag(request: &PackageRequest, packument: &Packument, tag: &str) -> Outcome<String> {
    packument
        .dist_tag(tag)
        .map(str::to_string)
        .ok_or_else(|| Failure::new(format!("Tag {} not found for {}", tag, request.name)))
}

fn max_satisfying(
    request: &PackageRequest,
    packument: &Packument,
    range: &str,
) -> Outcome<String> {
    let not_found = || Failure::new(format!("Version {} not found for {}", range, request.name));

    let range = NpmRange::parse(range).map_err(|_| not_found())?;
    let versions = packument.parsed_versions();
    range
        .max_satisfying(&versions)
        .map(|v| v.raw().to_string())
        .ok_or_else(not_found)
}
