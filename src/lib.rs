//! lnpm - npm package installer library
//!
//! This library provides the install pipeline:
//! - Specifier parsing (`[dev:]name[@constraint]`)
//! - Version resolution against the npm registry
//! - Type-coverage classification and `@types/*` companions
//! - package.json update and package manager invocation

pub mod cli;
pub mod domain;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod package_manager;
pub mod parser;
pub mod progress;
pub mod registry;
pub mod resolver;
pub mod types;
