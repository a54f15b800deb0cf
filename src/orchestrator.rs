//! Install orchestrator for coordinating the entire install workflow
//!
//! This module provides:
//! - Workflow coordination: parse → resolve → classify → write → install
//! - Parallel registry reads bounded by a semaphore
//! - Failure aggregation at every stage boundary
//!
//! The manifest is written only after every package has resolved; a failure in
//! an earlier stage leaves package.json untouched and spawns nothing.

use crate::domain::{
    collect_outcomes, Failure, Outcome, PackageRequest, ResolvedPackage, SemanticVersion,
    TypesCompanion,
};
use crate::error::InstallError;
use crate::manifest::{locate_manifest, PackageManifest};
use crate::output::{summary_lines, Reporter};
use crate::package_manager::{PackageManager, PackageManagerRunner};
use crate::parser::parse_specifiers;
use crate::progress::Progress;
use crate::registry::Registry;
use crate::resolver::resolve_version;
use crate::types::{
    check_typed, find_companion, is_typed_project, needs_companion, CompanionLookup,
};
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Default concurrency limit for registry requests
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Pipeline stages, used for logging. `Failed` is terminal and can follow any
/// other stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ParsingArguments,
    ResolvingVersions,
    ClassifyingTypes,
    UpdatingManifest,
    InvokingInstaller,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ParsingArguments => "parsing-arguments",
            Stage::ResolvingVersions => "resolving-versions",
            Stage::ClassifyingTypes => "classifying-types",
            Stage::UpdatingManifest => "updating-manifest",
            Stage::InvokingInstaller => "invoking-installer",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Inputs of one install invocation
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Raw specifier tokens from the command line
    pub packages: Vec<String>,
    /// Global `-D/--dev` flag
    pub dev: bool,
    /// Directory the manifest search starts from
    pub cwd: PathBuf,
    /// Show the progress bar
    pub show_progress: bool,
}

/// What a successful install did
#[derive(Debug, Clone)]
pub struct InstallReport {
    /// The manifest that was updated
    pub manifest_path: PathBuf,
    /// Requested packages, in input order
    pub resolved: Vec<ResolvedPackage>,
    /// Companion declaration packages that were added
    pub companions: Vec<TypesCompanion>,
    /// Warnings for packages left without type declarations
    pub warnings: Vec<String>,
    /// The package manager that ran the install
    pub package_manager: PackageManager,
}

/// Orchestrator for coordinating the install workflow
pub struct Orchestrator {
    /// Registry serving every read, companion lookups included
    registry: Arc<dyn Registry>,
    /// Runs the package manager once the manifest is written
    runner: Box<dyn PackageManagerRunner>,
    /// Bounds in-flight registry reads
    semaphore: Arc<Semaphore>,
}

impl Orchestrator {
    /// Create an orchestrator with the default concurrency limit
    pub fn new(registry: Arc<dyn Registry>, runner: Box<dyn PackageManagerRunner>) -> Self {
        Self {
            registry,
            runner,
            semaphore: Arc::new(Semaphore::new(DEFAULT_CONCURRENCY)),
        }
    }

    /// Replace the concurrency limit (at least one read is always allowed)
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.semaphore = Arc::new(Semaphore::new(limit.max(1)));
        self
    }

    /// Run the install workflow
    pub async fn install(
        &self,
        options: &InstallOptions,
        reporter: &dyn Reporter,
    ) -> Result<InstallReport, InstallError> {
        let mut stage = Stage::ParsingArguments;
        let result = self.run_pipeline(options, reporter, &mut stage).await;
        if let Err(e) = &result {
            tracing::debug!(stage = %Stage::Failed, after = %stage, error = %e, "entering stage");
        }
        result
    }

    async fn run_pipeline(
        &self,
        options: &InstallOptions,
        reporter: &dyn Reporter,
        stage: &mut Stage,
    ) -> Result<InstallReport, InstallError> {
        if options.packages.is_empty() {
            return Err(InstallError::NoPackages);
        }

        let mut progress = Progress::new(options.show_progress);

        let manifest_path = locate_manifest(&options.cwd)?;
        let mut manifest = PackageManifest::load(&manifest_path)?;
        let typed_project = is_typed_project(&manifest);
        tracing::debug!(path = %manifest_path.display(), typed_project, "loaded manifest");

        enter(stage, Stage::ParsingArguments);
        let requests = collect_outcomes(parse_specifiers(&options.packages, options.dev, reporter))
            .map_err(batch)?;

        enter(stage, Stage::ResolvingVersions);
        reporter.info(&format!("Resolving {} packages...", requests.len()));
        progress.start(requests.len(), "Resolving");
        let resolutions = self
            .run_concurrently(requests.clone(), &progress, |registry, request| async move {
                fetch_and_resolve(&*registry, &request).await
            })
            .await;
        progress.finish_and_clear();
        let versions = collect_outcomes(resolutions?).map_err(batch)?;

        enter(stage, Stage::ClassifyingTypes);
        let lookups: Vec<(String, SemanticVersion)> = requests
            .iter()
            .map(|request| request.name.clone())
            .zip(versions.iter().cloned())
            .collect();
        progress.start(lookups.len(), "Checking types");
        let typed_checks = self
            .run_concurrently(lookups, &progress, |registry, (name, version)| async move {
                check_typed(&*registry, &name, &version).await
            })
            .await;
        progress.finish_and_clear();
        let typed = collect_outcomes(typed_checks?).map_err(batch)?;

        let resolved: Vec<ResolvedPackage> = requests
            .iter()
            .zip(versions)
            .zip(typed)
            .map(|((request, version), typed)| ResolvedPackage::new(request, version, typed))
            .collect();

        let candidates: Vec<ResolvedPackage> = if typed_project {
            resolved
                .iter()
                .filter(|package| needs_companion(package))
                .cloned()
                .collect()
        } else {
            Vec::new()
        };
        progress.start(candidates.len(), "Looking up type declarations");
        let companion_lookups = self
            .run_concurrently(candidates, &progress, |registry, package| async move {
                find_companion(&*registry, &package).await
            })
            .await;
        progress.finish_and_clear();

        let mut companions = Vec::new();
        let mut warnings = Vec::new();
        for lookup in companion_lookups? {
            if let Some(warning) = lookup.warning() {
                reporter.warn(&warning);
                warnings.push(warning);
            }
            if let CompanionLookup::Found(companion) = lookup {
                companions.push(companion);
            }
        }

        enter(stage, Stage::UpdatingManifest);
        manifest.update_dependencies(&resolved, &companions);
        manifest.save()?;

        reporter.info(&format!(
            "Installing {} + {} packages...",
            resolved.len(),
            companions.len()
        ));
        // The summary looks at the written manifest, so installing typescript
        // itself already counts as a typed project here.
        for line in summary_lines(&resolved, &companions, is_typed_project(&manifest)) {
            reporter.report(line.severity, &line.text);
        }

        enter(stage, Stage::InvokingInstaller);
        let package_manager = PackageManager::detect(manifest.dir());
        let command = package_manager.install_command();
        reporter.shell(&command);
        self.runner.run(&command, manifest.dir()).await?;

        enter(stage, Stage::Done);
        Ok(InstallReport {
            manifest_path,
            resolved,
            companions,
            warnings,
            package_manager,
        })
    }

    /// Run one registry task per item, at most `semaphore` permits at a time.
    ///
    /// Results come back in input order regardless of completion order.
    async fn run_concurrently<I, T, F, Fut>(
        &self,
        items: Vec<I>,
        progress: &Progress,
        task: F,
    ) -> Result<Vec<T>, InstallError>
    where
        I: Send + 'static,
        T: Send + 'static,
        F: Fn(Arc<dyn Registry>, I) -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        let total = items.len();
        let mut set = JoinSet::new();

        for (index, item) in items.into_iter().enumerate() {
            let semaphore = Arc::clone(&self.semaphore);
            let future = task(Arc::clone(&self.registry), item);
            set.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                (index, future.await)
            });
        }

        let mut slots: Vec<Option<T>> = (0..total).map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            let (index, value) = joined?;
            slots[index] = Some(value);
            progress.inc();
        }

        Ok(slots.into_iter().flatten().collect())
    }
}

/// Read the packument and pick the version for one request
async fn fetch_and_resolve(
    registry: &dyn Registry,
    request: &PackageRequest,
) -> Outcome<SemanticVersion> {
    let packument = registry
        .packument(&request.name)
        .await
        .map_err(|e| Failure::new(format!("Failed to fetch {}: {}", request.name, e)))?;
    let version = resolve_version(request, &packument)?;
    tracing::debug!(package = %request.name, constraint = %request.constraint, %version, "resolved");
    Ok(version)
}

fn enter(current: &mut Stage, stage: Stage) {
    *current = stage;
    tracing::debug!(%stage, "entering stage");
}

fn batch(failures: Vec<Failure>) -> InstallError {
    InstallError::Batch(
        failures
            .into_iter()
            .map(|failure| failure.message().to_string())
            .collect(),
    )
}
