//! # pyo3 hook core
//!
//! Finds the shared libraries cargo produced for a pyo3 extension and places them into a wheel.
//!
//! The entry point is [`Pyo3BuildHook`](hook::Pyo3BuildHook), which implements the
//! [`BuildHook`](hook::BuildHook) contract a packaging host calls into. The hook resolves a cargo
//! profile, scans `target/<profile>/` for libraries built for the host platform, and records them
//! in the host's [`BuildData`](build_data::BuildData).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

#[macro_use]
extern crate log;

#[macro_use]
extern crate serde;

pub mod artifact;
pub mod build_data;
pub mod config;
pub mod error;
pub mod hook;
pub mod identity;
pub mod platform;
pub mod pyproject;

pub use build_data::BuildData;
pub use config::{Environment, HookConfig, ProcessEnvironment, PROFILE_ENV_VAR};
pub use error::{HookError, HookResult};
pub use hook::{BuildHook, Pyo3BuildHook};
pub use identity::ProjectIdentity;
pub use platform::Platform;
pub use pyproject::PyProject;
