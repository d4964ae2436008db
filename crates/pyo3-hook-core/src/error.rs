//! The hook error type. Returned by every fallible operation of the hook.

use std::io;
use std::path::PathBuf;

/// Errors that can stop a hook invocation.
///
/// A missing `target/<profile>` directory or a directory without matching libraries is *not* an
/// error; those produce empty results instead.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    /// A filesystem operation failed
    #[error(transparent)]
    IoError(#[from] io::Error),
    /// A directory listing failed
    #[error(transparent)]
    WalkError(#[from] walkdir::Error),
    /// `pyproject.toml` could not be parsed
    #[error(transparent)]
    TomlError(#[from] toml::de::Error),
    /// The hook table had values of the wrong type
    #[error("Invalid hook configuration: {0}")]
    InvalidConfig(String),
    /// `pyproject.toml` has no `[project] name`
    #[error("No [project] name declared in {0:?}")]
    MissingProjectName(PathBuf),
}

impl HookError {
    /// Create an invalid configuration error from anything displayable
    pub fn invalid_config<E: std::fmt::Display>(error: E) -> Self {
        Self::InvalidConfig(error.to_string())
    }
}

/// A result whose error is a [`HookError`]
pub type HookResult<T = ()> = Result<T, HookError>;
