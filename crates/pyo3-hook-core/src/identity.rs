//! The identity of the python project being built

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-_.]+").expect("separator regex is a valid literal"));

/// Folds runs of `-`, `_` and `.` into a single `_` and lowercases the result.
fn fold(name: &str) -> String {
    SEPARATORS.replace_all(name, "_").to_lowercase()
}

/// The declared name of a project, and the names derived from it.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ProjectIdentity {
    name: String,
}

impl ProjectIdentity {
    /// Creates an identity from the name declared in the project metadata
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
        }
    }

    /// The name as declared
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The normalized distribution name, ie `My.Cool_package` becomes `my-cool-package`
    pub fn normalized(&self) -> String {
        SEPARATORS.replace_all(&self.name, "-").to_lowercase()
    }

    /// The importable package directory, ie `my-cool-package` becomes `my_cool_package`
    pub fn package_dir(&self) -> String {
        fold(&self.name)
    }

    /// Checks whether a library stem (the file name without `lib` prefix and suffix) was built
    /// for this project.
    ///
    /// Separators and case are ignored. The stem matches when it contains the package name, or when
    /// it is a leading `_` separated part of it, so `test` matches the project `test-package` and
    /// `test_package_native` matches it too.
    pub fn matches_library(&self, stem: &str) -> bool {
        let stem = fold(stem);
        if stem.is_empty() {
            return false;
        }
        let package = self.package_dir();
        stem.contains(&package)
            || package
                .strip_prefix(stem.as_str())
                .map_or(false, |rest| rest.starts_with('_'))
    }
}

impl Display for ProjectIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
