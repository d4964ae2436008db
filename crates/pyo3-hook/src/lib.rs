//! Runs the pyo3 build hook from the command line.
//!
//! A packaging host that can't link against [`pyo3_hook_core`] runs `pyo3-hook build`, feeds it
//! its current build data and reads the augmented build data back from stdout.

#[macro_use]
extern crate log;

use std::fs::File;
use std::io::{BufReader, Write};

use anyhow::{Context, Result};
use clap::Parser;

use pyo3_hook_core::{
    BuildData, BuildHook, Environment, ProcessEnvironment, PyProject, Pyo3BuildHook,
};

use crate::cli::{BuildArgs, HookArgs, HookCommand};

pub mod cli;
pub mod logging;

/// Parses the process arguments, runs the requested command and logs any failure.
pub fn execute() -> std::result::Result<(), ()> {
    let args = HookArgs::parse();
    if let Err(e) = args.logging.init_logger() {
        eprintln!("couldn't install logger: {}", e);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    with_args(args, &mut out).map_err(|e| {
        error!("{:#}", e);
    })
}

/// Runs the command described by `args`, writing its output into `out`
pub fn with_args<W: Write>(args: HookArgs, out: &mut W) -> Result<()> {
    with_args_in(args, ProcessEnvironment, out)
}

/// Runs the command described by `args`, reading environment overrides from `environment`
/// instead of the process environment
pub fn with_args_in<W, E>(args: HookArgs, environment: E, out: &mut W) -> Result<()>
where
    W: Write,
    E: Environment + 'static,
{
    let project = PyProject::load(&args.root)
        .with_context(|| format!("couldn't load project at {:?}", args.root))?;
    debug!("loaded project {}", project.identity());

    match args.command {
        HookCommand::Build(build) => run_build(&project, build, environment, out),
        HookCommand::Clean { target, versions } => {
            let hook = project
                .build_hook(&target, project.root().join("dist"))?
                .with_environment(environment);
            hook.clean(&versions)?;
            Ok(())
        }
        HookCommand::Profile => {
            let hook = project
                .build_hook(Pyo3BuildHook::WHEEL_TARGET, project.root().join("dist"))?
                .with_environment(environment);
            writeln!(out, "{}", hook.profile())?;
            Ok(())
        }
    }
}

fn run_build<W, E>(project: &PyProject, args: BuildArgs, environment: E, out: &mut W) -> Result<()>
where
    W: Write,
    E: Environment + 'static,
{
    let directory = args
        .directory
        .unwrap_or_else(|| project.root().join("dist"));
    let mut config = project.hook_config(&args.target)?;
    if let Some(profile) = args.profile {
        config.profile = Some(profile);
    }
    config.copy_to_source |= args.copy_to_source;
    let hook = Pyo3BuildHook::new(project.root(), config, project.identity().clone())
        .with_target(&args.target, directory)
        .with_environment(environment);

    let mut build_data: BuildData = match &args.build_data {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("couldn't open build data {:?}", path))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("couldn't parse build data {:?}", path))?
        }
        None => BuildData::new(),
    };

    hook.initialize(&args.target_version, &mut build_data)?;
    info!(
        "{} files force included by the {} hook",
        build_data.force_include.len(),
        hook.plugin_name()
    );

    serde_json::to_writer_pretty(&mut *out, &build_data)?;
    writeln!(out)?;
    Ok(())
}
