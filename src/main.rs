//! lnpm - npm package installer CLI tool
//!
//! Adds packages to package.json at their resolved versions, pulls in
//! `@types/*` companions for untyped packages of TypeScript projects, and runs
//! the project's package manager.

use anyhow::Context;
use clap::Parser;
use lnpm::cli::{Cli, Command};
use lnpm::error::InstallError;
use lnpm::logging;
use lnpm::orchestrator::{InstallOptions, Orchestrator};
use lnpm::output::{Reporter, TextReporter};
use lnpm::package_manager::SystemPackageManager;
use lnpm::registry::{HttpClient, NpmRegistry};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let reporter = TextReporter::stdout();
    match run(cli, &reporter).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<InstallError>() {
                Some(install) => {
                    for message in install.messages() {
                        reporter.error(&message);
                    }
                }
                None => reporter.error(&format!("{:#}", e)),
            }
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(cli: Cli, reporter: &dyn Reporter) -> anyhow::Result<()> {
    let Command::Install { packages, dev } = cli.command;
    tracing::debug!(registry = %cli.registry, count = packages.len(), dev, "install");

    let cwd = std::env::current_dir().context("failed to read the current directory")?;
    let client = HttpClient::new()?;
    let registry = NpmRegistry::new(client, &cli.registry)?;

    let orchestrator = Orchestrator::new(Arc::new(registry), Box::new(SystemPackageManager::new()));
    let options = InstallOptions {
        packages,
        dev,
        cwd,
        show_progress: !cli.quiet,
    };
    orchestrator.install(&options, reporter).await?;
    Ok(())
}
