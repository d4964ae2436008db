//! Reads the project name and hook configuration out of `pyproject.toml`

use crate::config::HookConfig;
use crate::error::{HookError, HookResult};
use crate::hook::Pyo3BuildHook;
use crate::identity::ProjectIdentity;
use std::fs;
use std::path::{Path, PathBuf};
use toml::value::Table;
use toml::Value;

/// The name of the project file
pub const PYPROJECT_FILE: &str = "pyproject.toml";

/// A parsed `pyproject.toml`
#[derive(Debug, Clone)]
pub struct PyProject {
    root: PathBuf,
    identity: ProjectIdentity,
    document: Table,
}

impl PyProject {
    /// Loads `<root>/pyproject.toml`
    pub fn load<P: AsRef<Path>>(root: P) -> HookResult<Self> {
        let root = root.as_ref().to_path_buf();
        let file = root.join(PYPROJECT_FILE);
        let text = fs::read_to_string(&file)?;
        Self::parse(root, &text, &file)
    }

    fn parse(root: PathBuf, text: &str, file: &Path) -> HookResult<Self> {
        let document: Table = toml::from_str(text)?;
        let name = document
            .get("project")
            .and_then(|project| project.get("name"))
            .and_then(Value::as_str)
            .ok_or_else(|| HookError::MissingProjectName(file.to_path_buf()))?;
        Ok(Self {
            identity: ProjectIdentity::new(name),
            root,
            document,
        })
    }

    /// The project root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The identity of the project
    pub fn identity(&self) -> &ProjectIdentity {
        &self.identity
    }

    /// Walks a chain of keys down from the document root to a table, if every step exists
    fn table_at(&self, keys: &[&str]) -> Option<&Table> {
        keys.iter()
            .try_fold(&self.document, |table, key| table.get(*key)?.as_table())
    }

    /// The hook configuration used when building `target_name`.
    ///
    /// The global `[tool.hatch.build.hooks.pyo3]` table is read first, then the keys of
    /// `[tool.hatch.build.targets.<target_name>.hooks.pyo3]` override it.
    pub fn hook_config(&self, target_name: &str) -> HookResult<HookConfig> {
        let hook = Pyo3BuildHook::PLUGIN_NAME;
        let global = self
            .table_at(&["tool", "hatch", "build", "hooks", hook])
            .cloned()
            .unwrap_or_default();
        let config = HookConfig::from_table(global)?;

        match self.table_at(&["tool", "hatch", "build", "targets", target_name, "hooks", hook]) {
            Some(target) => {
                trace!("{} target overrides the {} hook configuration", target_name, hook);
                config.merged_with(target.clone())
            }
            None => Ok(config),
        }
    }

    /// Creates the hook for building `target_name` into `directory`
    pub fn build_hook<P: AsRef<Path>>(
        &self,
        target_name: &str,
        directory: P,
    ) -> HookResult<Pyo3BuildHook> {
        let config = self.hook_config(target_name)?;
        Ok(Pyo3BuildHook::new(&self.root, config, self.identity.clone())
            .with_target(target_name, directory))
    }
}
