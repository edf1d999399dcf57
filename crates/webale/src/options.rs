//! Resolved build inputs.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default limit on import chain depth.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Build mode.
///
/// Carried through to the build report and logs; the emitted artifact has the
/// same layout in both modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Production,
    #[default]
    Development,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Production => "production",
            Mode::Development => "development",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Mode::Production),
            "development" | "dev" => Ok(Mode::Development),
            other => Err(format!("Invalid mode: {}", other)),
        }
    }
}

/// Everything one build needs, fully resolved by the caller.
///
/// All paths are absolute. The core reads this value and never consults the
/// environment or configuration files itself.
///
/// ```rust
/// use webale::{BuildOptions, Mode};
///
/// let options = BuildOptions::new("/p/src/index.js", "/p/dist/output.js")
///     .root("/p")
///     .mode(Mode::Production);
/// assert_eq!(options.root, std::path::PathBuf::from("/p"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
    pub entry: PathBuf,
    pub output: PathBuf,
    pub mode: Mode,
    pub watch: bool,
    /// Project root; package-style specifiers resolve under `<root>/node_modules`.
    pub root: PathBuf,
    pub max_depth: usize,
}

impl BuildOptions {
    /// Options for `entry` -> `output`, with the root defaulting to the
    /// entry's parent directory.
    pub fn new(entry: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        let entry = entry.into();
        let root = entry
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            entry,
            output: output.into(),
            mode: Mode::default(),
            watch: false,
            root,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn watch(mut self, watch: bool) -> Self {
        self.watch = watch;
        self
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
