//! The build data a host hands to its hooks

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Mutable build state owned by the host for the duration of a hook call.
///
/// Only the keys this hook works with are typed, every other key the host passes is kept in
/// `other` and written back untouched.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildData {
    /// Files injected into the archive, keyed by their path on disk. The values are the paths
    /// inside the archive.
    #[serde(default)]
    pub force_include: BTreeMap<PathBuf, String>,
    /// Whether the wheel only contains python code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pure_python: Option<bool>,
    /// Whether the host should infer a platform specific wheel tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infer_tag: Option<bool>,
    /// Any other keys
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl BuildData {
    /// Creates empty build data
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a file to be put into the archive at `destination`.
    ///
    /// Registering the same source again replaces its destination.
    pub fn force_include<P: AsRef<Path>, S: AsRef<str>>(&mut self, source: P, destination: S) {
        self.force_include.insert(
            source.as_ref().to_path_buf(),
            destination.as_ref().to_string(),
        );
    }

    /// Gets the archive destination registered for a source file
    pub fn destination_of<P: AsRef<Path>>(&self, source: P) -> Option<&str> {
        self.force_include.get(source.as_ref()).map(String::as_str)
    }

    /// Iterates over every registered archive destination
    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.force_include.values().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn last_registration_wins() {
        let mut data = BuildData::new();
        data.force_include("target/release/libfoo.so", "foo/old.so");
        data.force_include("target/release/libfoo.so", "foo/foo.so");
        assert_eq!(data.force_include.len(), 1);
        assert_eq!(data.destination_of("target/release/libfoo.so"), Some("foo/foo.so"));
    }

    #[test]
    fn unknown_keys_survive() {
        let data: BuildData = serde_json::from_value(json!({
            "artifacts": ["*.txt"],
            "force_include": { "/abs/libfoo.so": "foo/foo.so" }
        }))
        .unwrap();
        assert_eq!(data.destination_of("/abs/libfoo.so"), Some("foo/foo.so"));

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["artifacts"], json!(["*.txt"]));
        assert!(value.get("pure_python").is_none());
    }

    #[test]
    fn missing_force_include_is_created() {
        let data: BuildData = serde_json::from_value(json!({})).unwrap();
        assert!(data.force_include.is_empty());
    }
}
