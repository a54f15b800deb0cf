//! Package manager integration for installing dependencies after the manifest update
//!
//! This module provides:
//! - Detection of the project's package manager from its lockfile
//! - Execution of the install command with inherited stdio

use crate::error::InstallError;
use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use tokio::process::Command;

/// The package managers a project can use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// Detect the package manager from the lockfiles in `project_dir`.
    ///
    /// `yarn.lock` wins over `pnpm-lock.yaml`; without either, npm is used.
    pub fn detect(project_dir: &Path) -> Self {
        if project_dir.join("yarn.lock").exists() {
            return PackageManager::Yarn;
        }
        if project_dir.join("pnpm-lock.yaml").exists() {
            return PackageManager::Pnpm;
        }
        PackageManager::Npm
    }

    /// Executable name
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    /// Full install command, program first
    pub fn install_command(&self) -> Vec<String> {
        vec![self.program().to_string(), "install".to_string()]
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// Trait for running package manager commands
#[async_trait]
pub trait PackageManagerRunner: Send + Sync {
    /// Run `command` in `working_dir` and wait for it; success iff exit status 0
    async fn run(&self, command: &[String], working_dir: &Path) -> Result<(), InstallError>;
}

/// Default package manager runner that executes real commands
#[derive(Debug, Default)]
pub struct SystemPackageManager;

impl SystemPackageManager {
    /// Create a new system package manager
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PackageManagerRunner for SystemPackageManager {
    async fn run(&self, command: &[String], working_dir: &Path) -> Result<(), InstallError> {
        let command_str = command.join(" ");
        let Some((program, args)) = command.split_first() else {
            return Err(InstallError::SpawnFailed {
                command: command_str,
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "Empty command"),
            });
        };

        tracing::debug!(command = %command_str, dir = %working_dir.display(), "spawning");

        // stdio is inherited so the installer's own output reaches the terminal
        let status = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .status()
            .await
            .map_err(|e| InstallError::SpawnFailed {
                command: command_str.clone(),
                source: e,
            })?;

        tracing::debug!(command = %command_str, %status, "installer finished");

        if status.success() {
            Ok(())
        } else {
            Err(InstallError::InstallerFailed {
                command: command_str,
                code: status.code(),
            })
        }
    }
}
