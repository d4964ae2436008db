//! Platform specific naming of shared libraries

use glob::Pattern;
use once_cell::sync::Lazy;
use std::env;
use std::fmt::{Display, Formatter};

/// The suffixes a cargo `cdylib` can be produced with.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum NativeSuffix {
    /// `.so`, produced on linux and most other unixes
    So,
    /// `.dylib`, produced on macOS
    Dylib,
    /// `.dll`, produced on windows
    Dll,
}

/// Compiled once from fixed literals. Never built from user input or paths, so compilation can not
/// fail at runtime.
static SUFFIX_PATTERNS: Lazy<[(NativeSuffix, Pattern); 3]> = Lazy::new(|| {
    NativeSuffix::ALL.map(|suffix| {
        let pattern = Pattern::new(suffix.glob()).expect("suffix globs are valid literals");
        (suffix, pattern)
    })
});

impl NativeSuffix {
    /// Every suffix. All of them are always searched for, regardless of the host.
    pub const ALL: [NativeSuffix; 3] = [NativeSuffix::So, NativeSuffix::Dylib, NativeSuffix::Dll];

    /// The extension, without the leading `.`
    pub fn extension(&self) -> &'static str {
        match self {
            NativeSuffix::So => "so",
            NativeSuffix::Dylib => "dylib",
            NativeSuffix::Dll => "dll",
        }
    }

    /// The file name glob that finds libraries with this suffix
    pub fn glob(&self) -> &'static str {
        match self {
            NativeSuffix::So => "*.so",
            NativeSuffix::Dylib => "*.dylib",
            NativeSuffix::Dll => "*.dll",
        }
    }

    /// Finds the suffix whose glob matches a file name, if any
    pub fn of_file_name(file_name: &str) -> Option<NativeSuffix> {
        SUFFIX_PATTERNS
            .iter()
            .find(|(_, pattern)| pattern.matches(file_name))
            .map(|(suffix, _)| *suffix)
    }
}

impl Display for NativeSuffix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

/// The host platform, as far as library naming is concerned.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Platform {
    /// Linux, and any other unix that isn't macOS
    Linux,
    /// macOS
    MacOs,
    /// Windows
    Windows,
}

impl Platform {
    /// Detects the platform this process runs on.
    ///
    /// Unixes other than macOS name their libraries like linux does, so they are treated as linux.
    pub fn current() -> Self {
        Self::from_os(env::consts::OS)
    }

    /// Maps an `std::env::consts::OS` value to a platform
    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" | "ios" => Platform::MacOs,
            "windows" => Platform::Windows,
            _ => Platform::Linux,
        }
    }

    /// The suffix cargo gives shared libraries on this platform
    pub fn native_suffix(&self) -> NativeSuffix {
        match self {
            Platform::Linux => NativeSuffix::So,
            Platform::MacOs => NativeSuffix::Dylib,
            Platform::Windows => NativeSuffix::Dll,
        }
    }

    /// The extension python expects extension modules to have on this platform, without the `.`
    pub fn extension_module_suffix(&self) -> &'static str {
        match self {
            Platform::Linux | Platform::MacOs => "so",
            Platform::Windows => "pyd",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Linux => write!(f, "linux"),
            Platform::MacOs => write!(f, "macos"),
            Platform::Windows => write!(f, "windows"),
        }
    }
}
