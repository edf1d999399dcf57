use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::{Deserialize, Serialize};
use webale::{BuildOptions, DEFAULT_MAX_DEPTH, Mode};

use crate::error::{ConfigError, Result};

/// Default entry module, relative to the project root.
pub const DEFAULT_ENTRY: &str = "src/index.js";

/// Default bundle path, relative to the project root.
pub const DEFAULT_OUTPUT: &str = "dist/output.js";

/// Fully merged configuration for one build.
///
/// Relative paths are kept as written; [`WebaleConfig::into_build_options`]
/// anchors them to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WebaleConfig {
    pub entry: PathBuf,
    pub output: PathBuf,
    pub mode: Mode,
    pub watch: bool,
    pub max_depth: usize,
}

impl Default for WebaleConfig {
    fn default() -> Self {
        Self {
            entry: PathBuf::from(DEFAULT_ENTRY),
            output: PathBuf::from(DEFAULT_OUTPUT),
            mode: Mode::default(),
            watch: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl WebaleConfig {
    /// Check values that deserialize fine but cannot drive a build.
    pub fn validate(&self) -> Result<()> {
        if self.entry.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "entry".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "output".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_depth".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Resolve against `root` into the immutable options the core consumes.
    pub fn into_build_options(self, root: &Path) -> Result<BuildOptions> {
        self.validate()?;

        if !root.is_absolute() {
            return Err(ConfigError::InvalidValue {
                field: "root".to_string(),
                message: format!("{} is not an absolute path", root.display()),
            });
        }

        let root = root.to_path_buf().clean();
        let entry = root.join(&self.entry).clean();
        let output = root.join(&self.output).clean();

        Ok(BuildOptions::new(entry, output)
            .root(root)
            .mode(self.mode)
            .watch(self.watch)
            .max_depth(self.max_depth))
    }
}

/// Values supplied on the command line. Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = WebaleConfig::default();
        assert_eq!(config.entry, PathBuf::from("src/index.js"));
        assert_eq!(config.output, PathBuf::from("dist/output.js"));
        assert_eq!(config.mode, Mode::Development);
        assert!(!config.watch);
        assert_eq!(config.max_depth, 1000);
    }

    #[test]
    fn relative_paths_resolve_against_root() {
        let options = WebaleConfig::default()
            .into_build_options(Path::new("/p"))
            .unwrap();

        assert_eq!(options.entry, PathBuf::from("/p/src/index.js"));
        assert_eq!(options.output, PathBuf::from("/p/dist/output.js"));
        assert_eq!(options.root, PathBuf::from("/p"));
    }

    #[test]
    fn absolute_paths_are_kept() {
        let config = WebaleConfig {
            entry: PathBuf::from("/elsewhere/main.js"),
            output: PathBuf::from("../out/../bundle.js"),
            ..WebaleConfig::default()
        };
        let options = config.into_build_options(Path::new("/p/app")).unwrap();

        assert_eq!(options.entry, PathBuf::from("/elsewhere/main.js"));
        assert_eq!(options.output, PathBuf::from("/p/bundle.js"));
    }

    #[test]
    fn rejects_zero_depth() {
        let config = WebaleConfig {
            max_depth: 0,
            ..WebaleConfig::default()
        };
        let err = config.into_build_options(Path::new("/p")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field, .. } if field == "max_depth"));
    }

    #[test]
    fn rejects_relative_root() {
        let err = WebaleConfig::default()
            .into_build_options(Path::new("p"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field, .. } if field == "root"));
    }

    #[test]
    fn overrides_skip_unset_fields() {
        let overrides = ConfigOverrides {
            mode: Some(Mode::Production),
            ..ConfigOverrides::default()
        };
        let json = serde_json::to_value(&overrides).unwrap();
        assert_eq!(json, serde_json::json!({ "mode": "production" }));
    }
}
