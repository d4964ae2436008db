//! The build hook a packaging host calls into

use crate::artifact::{discover_artifacts, ArtifactCandidate};
use crate::build_data::BuildData;
use crate::config::{resolve_profile, Environment, HookConfig, ProcessEnvironment};
use crate::error::HookResult;
use crate::identity::ProjectIdentity;
use crate::platform::Platform;
use std::fmt::{Debug, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

/// A hook the packaging host runs while building a target.
pub trait BuildHook {
    /// The name the hook is registered under
    fn plugin_name(&self) -> &str;

    /// Called before the target is built. May augment `build_data`.
    fn initialize(&self, version: &str, build_data: &mut BuildData) -> HookResult;

    /// Called when the host cleans the build outputs of the given versions
    fn clean(&self, _versions: &[String]) -> HookResult {
        Ok(())
    }
}

/// Adds the cargo built extension module of a pyo3 project to its wheel.
pub struct Pyo3BuildHook {
    root: PathBuf,
    config: HookConfig,
    identity: ProjectIdentity,
    directory: PathBuf,
    target_name: String,
    platform: Platform,
    environment: Box<dyn Environment>,
}

impl Pyo3BuildHook {
    /// The name of this hook
    pub const PLUGIN_NAME: &'static str = "pyo3";

    /// The only target that gets native libraries
    pub const WHEEL_TARGET: &'static str = "wheel";

    /// Creates a hook for the project at `root`, building a wheel into `<root>/dist` on the current
    /// platform.
    pub fn new<P: AsRef<Path>>(root: P, config: HookConfig, identity: ProjectIdentity) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            directory: root.join("dist"),
            root,
            config,
            identity,
            target_name: Self::WHEEL_TARGET.to_string(),
            platform: Platform::current(),
            environment: Box::new(ProcessEnvironment),
        }
    }

    /// Sets the target being built and the directory it is built into
    pub fn with_target<S: AsRef<str>, P: AsRef<Path>>(
        mut self,
        target_name: S,
        directory: P,
    ) -> Self {
        self.target_name = target_name.as_ref().to_string();
        self.directory = directory.as_ref().to_path_buf();
        self
    }

    /// Pretends to run on another platform
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Reads environment overrides from `environment` instead of the process environment
    pub fn with_environment<E: Environment + 'static>(mut self, environment: E) -> Self {
        self.environment = Box::new(environment);
        self
    }

    /// The project root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The hook configuration
    pub fn config(&self) -> &HookConfig {
        &self.config
    }

    /// The directory the target is built into
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The name of the target being built
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// The cargo profile to take libraries from
    pub fn profile(&self) -> String {
        resolve_profile(&self.config, self.environment.as_ref())
    }

    /// The directory cargo writes the libraries of the profile to, `<root>/target/<profile>`
    pub fn cargo_output_dir(&self) -> PathBuf {
        self.root.join("target").join(self.profile())
    }

    /// The source package directory, `<root>/<package>`
    pub fn source_package_dir(&self) -> PathBuf {
        self.root.join(self.identity.package_dir())
    }

    fn artifacts(&self) -> HookResult<Vec<ArtifactCandidate>> {
        discover_artifacts(&self.cargo_output_dir(), self.platform, &self.identity)
    }

    /// Registers every library built for this project in `build_data`, and copies them into the
    /// source package when `copy-to-source` is set.
    ///
    /// Returns how many libraries were registered. Finding none is not an error.
    pub fn add_rust_artifacts(&self, build_data: &mut BuildData) -> HookResult<usize> {
        let artifacts = self.artifacts()?;
        let package_dir = self.identity.package_dir();
        let source_package = self.source_package_dir();

        for artifact in &artifacts {
            let output_name = artifact.output_file_name(self.platform);
            let destination = format!("{}/{}", package_dir, output_name);
            info!("including {:?} as {}", artifact.path(), destination);
            build_data.force_include(artifact.path(), &destination);

            if self.config.copy_to_source {
                if source_package.is_dir() {
                    let copy = source_package.join(&output_name);
                    debug!("copying {:?} to {:?}", artifact.path(), copy);
                    fs::copy(artifact.path(), &copy)?;
                } else {
                    debug!(
                        "source package {:?} does not exist, not copying {}",
                        source_package, output_name
                    );
                }
            }
        }

        Ok(artifacts.len())
    }
}

impl BuildHook for Pyo3BuildHook {
    fn plugin_name(&self) -> &str {
        Self::PLUGIN_NAME
    }

    fn initialize(&self, version: &str, build_data: &mut BuildData) -> HookResult {
        if self.target_name != Self::WHEEL_TARGET {
            debug!("nothing to add to {} target", self.target_name);
            return Ok(());
        }
        trace!("initializing {} ({}) for {}", self.target_name, version, self.identity);

        if self.add_rust_artifacts(build_data)? > 0 {
            build_data.pure_python = Some(false);
            build_data.infer_tag = Some(true);
        }
        Ok(())
    }

    fn clean(&self, _versions: &[String]) -> HookResult {
        if !self.config.copy_to_source {
            return Ok(());
        }
        let source_package = self.source_package_dir();
        for artifact in self.artifacts()? {
            let copy = source_package.join(artifact.output_file_name(self.platform));
            if copy.is_file() {
                info!("removing {:?}", copy);
                fs::remove_file(&copy)?;
            }
        }
        Ok(())
    }
}

impl Debug for Pyo3BuildHook {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pyo3BuildHook")
            .field("root", &self.root)
            .field("config", &self.config)
            .field("identity", &self.identity)
            .field("directory", &self.directory)
            .field("target_name", &self.target_name)
            .field("platform", &self.platform)
            .finish_non_exhaustive()
    }
}
