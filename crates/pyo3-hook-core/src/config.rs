//! Hook configuration and the environment it reads overrides from

use crate::error::{HookError, HookResult};
use std::collections::HashMap;
use std::env;

/// The environment variable that overrides the configured cargo profile
pub const PROFILE_ENV_VAR: &str = "HATCH_BUILD_HOOK_PYO3_PROFILE";

/// The profile used when neither the environment nor the configuration sets one
pub const DEFAULT_PROFILE: &str = "release";

/// The options a project can set in its hook table.
///
/// Keys the hook doesn't know about are ignored, as the host stores its own options in the same
/// table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HookConfig {
    /// The cargo profile whose `target/<profile>` directory is searched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Also copy the renamed libraries into the source package directory
    #[serde(default)]
    pub copy_to_source: bool,
}

impl HookConfig {
    /// Reads the configuration out of a toml table
    pub fn from_table(table: toml::value::Table) -> HookResult<Self> {
        toml::Value::Table(table)
            .try_into::<HookConfig>()
            .map_err(HookError::invalid_config)
    }

    /// Overlays the keys set in `table` on top of this configuration
    pub fn merged_with(self, table: toml::value::Table) -> HookResult<Self> {
        let mut base = match toml::Value::try_from(&self).map_err(HookError::invalid_config)? {
            toml::Value::Table(base) => base,
            _ => toml::value::Table::new(),
        };
        base.extend(table);
        Self::from_table(base)
    }
}

/// Read access to environment variables.
pub trait Environment {
    /// Gets the value of a variable, if it is set
    fn var(&self, key: &str) -> Option<String>;
}

/// The environment of the current process
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Resolves the cargo profile.
///
/// A non-empty [`PROFILE_ENV_VAR`] wins over the configured profile, which wins over
/// [`DEFAULT_PROFILE`]. Profiles are not validated, an unknown one just points at a directory that
/// likely doesn't exist.
pub fn resolve_profile(config: &HookConfig, environment: &dyn Environment) -> String {
    if let Some(profile) = environment.var(PROFILE_ENV_VAR).filter(|p| !p.is_empty()) {
        trace!("profile {:?} taken from {}", profile, PROFILE_ENV_VAR);
        return profile;
    }
    config
        .profile
        .clone()
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
}
