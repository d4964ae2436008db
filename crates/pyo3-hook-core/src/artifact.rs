//! Discovery of the shared libraries cargo left in a profile directory

use crate::error::HookResult;
use crate::identity::ProjectIdentity;
use crate::platform::{NativeSuffix, Platform};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The prefix cargo puts in front of library names on unix platforms
const LIB_PREFIX: &str = "lib";

/// A shared library built for the host platform.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ArtifactCandidate {
    path: PathBuf,
    stem: String,
    suffix: NativeSuffix,
}

impl ArtifactCandidate {
    /// Creates a candidate from a library's file name, if it has one of the native suffixes.
    fn from_file_name(path: PathBuf, file_name: &str) -> Option<Self> {
        let suffix = NativeSuffix::of_file_name(file_name)?;
        let stem = file_name.strip_suffix(&suffix.to_string())?;
        let stem = stem.strip_prefix(LIB_PREFIX).unwrap_or(stem);
        if stem.is_empty() {
            return None;
        }
        Some(Self {
            path,
            stem: stem.to_string(),
            suffix,
        })
    }

    /// The path of the library on disk
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The library name without `lib` prefix and suffix
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// The suffix the library was built with
    pub fn suffix(&self) -> NativeSuffix {
        self.suffix
    }

    /// The file name python expects for this library on `platform`, ie `libfoo.dylib` becomes
    /// `foo.so` and `foo.dll` becomes `foo.pyd`
    pub fn output_file_name(&self, platform: Platform) -> String {
        format!("{}.{}", self.stem, platform.extension_module_suffix())
    }
}

/// Finds the libraries in `directory` that were built for `identity` on `platform`.
///
/// Only the direct children of `directory` are searched. Libraries with a suffix that belongs to
/// another platform are ignored. When none of the native libraries match the project's name, all
/// of them are returned, as cargo names the library after the crate which can differ from the
/// python project.
///
/// A directory that doesn't exist contains no libraries. Symlinks are followed, links that point
/// nowhere are skipped.
pub fn discover_artifacts(
    directory: &Path,
    platform: Platform,
    identity: &ProjectIdentity,
) -> HookResult<Vec<ArtifactCandidate>> {
    if !directory.is_dir() {
        debug!("no cargo output found at {:?}", directory);
        return Ok(vec![]);
    }

    let native = platform.native_suffix();
    let mut candidates = vec![];
    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        // follows symlinks, a dangling one is not a file
        if !entry.path().is_file() {
            trace!("skipping {:?}, not a file", entry.path());
            continue;
        }
        let Some(file_name) = entry.file_name().to_str() else {
            trace!("skipping non unicode file name {:?}", entry.file_name());
            continue;
        };
        let path = entry.path().to_path_buf();
        let Some(candidate) = ArtifactCandidate::from_file_name(path, file_name) else {
            continue;
        };
        if candidate.suffix() != native {
            trace!("ignoring {} library {:?} on {}", candidate.suffix(), file_name, platform);
            continue;
        }
        candidates.push(candidate);
    }

    let (matching, others): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .partition(|candidate| identity.matches_library(candidate.stem()));

    if matching.is_empty() && !others.is_empty() {
        debug!(
            "no library named after {} in {:?}, using all {} native libraries",
            identity,
            directory,
            others.len()
        );
        return Ok(others);
    }
    Ok(matching)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch_all(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), b"").unwrap();
        }
    }

    #[test]
    fn output_names() {
        let candidate =
            ArtifactCandidate::from_file_name(PathBuf::from("libfoo.dylib"), "libfoo.dylib").unwrap();
        assert_eq!(candidate.stem(), "foo");
        assert_eq!(candidate.output_file_name(Platform::MacOs), "foo.so");

        let candidate = ArtifactCandidate::from_file_name(PathBuf::from("bar.dll"), "bar.dll").unwrap();
        assert_eq!(candidate.output_file_name(Platform::Windows), "bar.pyd");
    }

    #[test]
    fn bare_suffixes_are_not_libraries() {
        assert!(ArtifactCandidate::from_file_name(PathBuf::from("lib.so"), "lib.so").is_none());
        assert!(ArtifactCandidate::from_file_name(PathBuf::from(".dll"), ".dll").is_none());
    }

    #[test]
    fn missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        let found = discover_artifacts(
            &temp.path().join("target/release"),
            Platform::Linux,
            &ProjectIdentity::new("test-package"),
        )
        .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn foreign_libraries_are_ignored() {
        let temp = TempDir::new().unwrap();
        touch_all(temp.path(), &["libbar.dll", "libfoo.dylib"]);
        let found = discover_artifacts(temp.path(), Platform::Linux, &ProjectIdentity::new("bar"))
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn name_matches_are_preferred() {
        let temp = TempDir::new().unwrap();
        touch_all(temp.path(), &["libother.so", "libtest_package.so", "libtest_package.rlib"]);
        let found = discover_artifacts(
            temp.path(),
            Platform::Linux,
            &ProjectIdentity::new("test-package"),
        )
        .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].stem(), "test_package");
    }

    #[test]
    fn unnamed_libraries_are_used_when_nothing_matches() {
        let temp = TempDir::new().unwrap();
        touch_all(temp.path(), &["libfoo.dylib", "libtest.so"]);
        let found = discover_artifacts(
            temp.path(),
            Platform::MacOs,
            &ProjectIdentity::new("test-package"),
        )
        .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].stem(), "foo");
    }

    #[test]
    fn nested_directories_are_not_searched() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("deps")).unwrap();
        touch_all(&temp.path().join("deps"), &["libtest-1234.so"]);
        let found = discover_artifacts(temp.path(), Platform::Linux, &ProjectIdentity::new("test"))
            .unwrap();
        assert!(found.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn dangling_links_are_skipped() {
        let temp = TempDir::new().unwrap();
        touch_all(temp.path(), &["libtest_package.so", "libreal.so"]);
        let link = |to: &str, from: &str| {
            std::os::unix::fs::symlink(temp.path().join(to), temp.path().join(from)).unwrap()
        };
        link("gone.so.1", "libstale.so");
        link("libreal.so", "liblinked.so");

        let identity = ProjectIdentity::new("test-package");
        let found = discover_artifacts(temp.path(), Platform::Linux, &identity).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].stem(), "test_package");

        // only unrelated libraries left, the live link is used but the dangling one isn't
        fs::remove_file(temp.path().join("libtest_package.so")).unwrap();
        let found = discover_artifacts(temp.path(), Platform::Linux, &identity).unwrap();
        let stems: Vec<_> = found.iter().map(ArtifactCandidate::stem).collect();
        assert_eq!(stems, vec!["linked", "real"]);
    }

    #[test]
    fn glob_characters_in_paths_do_not_fail() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("[weird]{dir}");
        fs::create_dir(&dir).unwrap();
        touch_all(&dir, &["lib[test].so", "libtest.so", "libtest.dylib", "libtest.dll"]);
        for platform in [Platform::Linux, Platform::MacOs, Platform::Windows] {
            let found = discover_artifacts(&dir, platform, &ProjectIdentity::new("test")).unwrap();
            assert!(!found.is_empty(), "nothing found on {}", platform);
        }
    }
}
