//! Command line arguments

use crate::logging::LoggingArgs;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Runs the pyo3 build hook outside of a packaging host.
///
/// The hook finds the shared libraries cargo built for the project in `target/<profile>` and
/// reports where they belong in the wheel. The profile can be overridden with the
/// `HATCH_BUILD_HOOK_PYO3_PROFILE` environment variable.
#[derive(Debug, Parser, Clone)]
#[clap(name = "pyo3-hook")]
#[clap(version)]
#[clap(term_width = 80)]
pub struct HookArgs {
    /// The project root, containing `pyproject.toml`
    #[clap(long, short = 'r', default_value = ".")]
    #[clap(global = true)]
    pub root: PathBuf,

    #[clap(flatten)]
    pub logging: LoggingArgs,

    #[clap(subcommand)]
    pub command: HookCommand,
}

/// What to do with the project
#[derive(Debug, Subcommand, Clone)]
pub enum HookCommand {
    /// Runs the hook before a build, printing the resulting build data as json
    Build(BuildArgs),
    /// Removes libraries previously copied into the source package
    Clean {
        /// The target being cleaned
        #[clap(long, default_value = "wheel")]
        target: String,
        /// The versions being cleaned
        #[clap(long = "target-version")]
        versions: Vec<String>,
    },
    /// Prints the cargo profile the hook would take libraries from
    Profile,
}

/// Options for a single build
#[derive(Debug, clap::Args, Clone)]
pub struct BuildArgs {
    /// The target being built
    #[clap(long, default_value = "wheel")]
    pub target: String,

    /// The directory the target is built into. Defaults to `<root>/dist`
    #[clap(long)]
    pub directory: Option<PathBuf>,

    /// The version of the target being built
    #[clap(long, default_value = "standard")]
    pub target_version: String,

    /// A json file with the build data so far
    #[clap(long)]
    pub build_data: Option<PathBuf>,

    /// Overrides the configured cargo profile
    #[clap(long)]
    pub profile: Option<String>,

    /// Also copy the libraries into the source package
    #[clap(long)]
    pub copy_to_source: bool,
}
