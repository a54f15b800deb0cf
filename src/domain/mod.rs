//! Core domain models for lnpm
//!
//! This module contains the fundamental types used throughout the application:
//! - Per-item outcomes and their all-or-nothing aggregation
//! - Semantic versions that remember their registry spelling
//! - Package requests, resolved packages and `@types` companions

mod outcome;
mod package;
mod version;

pub use outcome::{collect_outcomes, Failure, Outcome};
pub use package::{PackageRequest, ResolvedPackage, TypesCompanion, DEFAULT_CONSTRAINT};
pub use version::SemanticVersion;
