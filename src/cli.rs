//! CLI argument parsing module for lnpm

use crate::registry::DEFAULT_REGISTRY_URL;
use clap::{ArgAction, Parser, Subcommand};

/// Install npm packages with their type declarations
#[derive(Parser, Debug, Clone)]
#[command(
    name = "lnpm",
    version,
    about = "Install npm packages and add missing @types companions"
)]
pub struct Cli {
    /// Registry to resolve packages against
    #[arg(
        long,
        global = true,
        env = "NPM_CONFIG_REGISTRY",
        default_value = DEFAULT_REGISTRY_URL
    )]
    pub registry: String,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Hide the progress bar
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Add packages to package.json and run the package manager's install
    #[command(visible_alias = "i")]
    Install {
        /// Packages as [dev:]name[@version|range|tag]
        packages: Vec<String>,

        /// Add every listed package to devDependencies
        #[arg(short = 'D', long)]
        dev: bool,
    },
}
