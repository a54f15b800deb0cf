//! Application error types using thiserror
//!
//! Error hierarchy:
//! - RegistryError: Issues with package registry communication
//! - ManifestError: Issues with locating, parsing or writing package.json
//! - InstallError: Pipeline failures reported to the user
//!
//! Per-package parse and resolution failures are not errors of this module;
//! they are collected as [`crate::domain::Failure`] values and only surface
//! here once aggregated into [`InstallError::Batch`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors related to package registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package (or package version) not found in registry
    #[error("package '{package}' not found in registry")]
    PackageNotFound { package: String },

    /// Network request failed
    #[error("failed to fetch package '{package}': {message}")]
    NetworkError { package: String, message: String },

    /// Invalid response from registry
    #[error("invalid response for '{package}': {message}")]
    InvalidResponse { package: String, message: String },

    /// Timeout
    #[error("timeout while fetching '{package}'")]
    Timeout { package: String },

    /// Registry URL could not be used
    #[error("invalid registry URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// No package.json in the directory or any of its ancestors
    #[error("package.json not found")]
    NotFound { start: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("failed to write manifest file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    /// The manifest parsed but is not usable (e.g. not an object)
    #[error("invalid manifest {path}: {message}")]
    InvalidShape { path: PathBuf, message: String },
}

/// Errors that end an install invocation
#[derive(Error, Debug)]
pub enum InstallError {
    /// Empty argument list
    #[error("No packages specified")]
    NoPackages,

    /// One or more packages failed to parse or resolve
    #[error("{}", .0.join("\n"))]
    Batch(Vec<String>),

    /// Manifest could not be located, read or written
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// The HTTP client could not be set up
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A registry task panicked
    #[error("registry task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// The package manager could not be started
    #[error("failed to run {command}: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The package manager exited with a non-zero status
    #[error("{command} exited with {}", describe_exit(.code))]
    InstallerFailed { command: String, code: Option<i32> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "a signal".to_string(),
    }
}

impl InstallError {
    /// Messages to print, one per line of the report
    pub fn messages(&self) -> Vec<String> {
        match self {
            InstallError::Batch(messages) => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(package: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(package: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
        }
    }
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(start: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound {
            start: start.into(),
        }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}
