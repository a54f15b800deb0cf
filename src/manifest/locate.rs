//! Finding the project manifest

use crate::error::ManifestError;
use std::path::{Path, PathBuf};

/// File name of the npm manifest
pub const MANIFEST_FILENAME: &str = "package.json";

/// Return the path of the nearest `package.json`, searching `start` and then
/// each of its ancestors.
pub fn locate_manifest(start: &Path) -> Result<PathBuf, ManifestError> {
    let found = start
        .ancestors()
        .map(|dir| dir.join(MANIFEST_FILENAME))
        .find(|candidate| candidate.is_file());

    match found {
        Some(path) => {
            tracing::debug!(path = %path.display(), "found manifest");
            Ok(path)
        }
        None => Err(ManifestError::not_found(start)),
    }
}
