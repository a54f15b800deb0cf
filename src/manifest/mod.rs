//! package.json location, parsing and update
//!
//! This module provides functionality to:
//! - Locate the nearest package.json above a directory
//! - Merge resolved packages into the dependency sections
//! - Write the manifest back atomically, keeping its formatting

mod locate;
mod package_json;

pub use locate::{locate_manifest, MANIFEST_FILENAME};
pub use package_json::PackageManifest;

/// The dependency sections of a package.json
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencySection {
    Dependencies,
    DevDependencies,
    PeerDependencies,
    OptionalDependencies,
}

impl DependencySection {
    /// Every section, in package.json order
    pub const ALL: [DependencySection; 4] = [
        DependencySection::Dependencies,
        DependencySection::DevDependencies,
        DependencySection::PeerDependencies,
        DependencySection::OptionalDependencies,
    ];

    /// The JSON key of the section
    pub fn key(&self) -> &'static str {
        match self {
            DependencySection::Dependencies => "dependencies",
            DependencySection::DevDependencies => "devDependencies",
            DependencySection::PeerDependencies => "peerDependencies",
            DependencySection::OptionalDependencies => "optionalDependencies",
        }
    }

    /// Section receiving a package installed with or without the dev flag
    pub fn for_install(is_dev: bool) -> Self {
        if is_dev {
            DependencySection::DevDependencies
        } else {
            DependencySection::Dependencies
        }
    }
}

impl std::fmt::Display for DependencySection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
