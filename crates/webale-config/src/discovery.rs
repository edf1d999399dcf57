//! Config file discovery and layered loading.
//!
//! Layers, lowest priority first:
//!
//! 1. built-in defaults
//! 2. `webale.toml` or `webale.config.json` in the project root
//! 3. `WEBALE_*` environment variables
//! 4. command-line overrides

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml};

use crate::config::{ConfigOverrides, WebaleConfig};
use crate::error::{ConfigError, Result};

/// Config file names searched for, in order.
pub const CONFIG_FILES: &[&str] = &["webale.toml", "webale.config.json"];

/// Prefix of the environment variables that feed the config.
pub const ENV_PREFIX: &str = "WEBALE_";

const ENV_KEYS: &[&str] = &["entry", "output", "mode", "watch", "max_depth"];

/// Finds and loads the configuration for one project root.
///
/// # Example
///
/// ```no_run
/// use webale_config::{ConfigDiscovery, ConfigOverrides};
///
/// let discovery = ConfigDiscovery::new("/project");
/// let config = discovery.load(&ConfigOverrides::default()).unwrap();
/// let options = config.into_build_options(discovery.root()).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigDiscovery {
    root: PathBuf,
    explicit: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            explicit: None,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Use this file instead of searching the root. It must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.explicit = Some(if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        });
        self
    }

    /// Read environment variables with a different prefix.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The config file that would be loaded, if any.
    ///
    /// An explicit file is returned whether or not it exists; [`Self::load`]
    /// reports it as missing.
    pub fn find(&self) -> Option<PathBuf> {
        if let Some(explicit) = &self.explicit {
            return Some(explicit.clone());
        }

        CONFIG_FILES
            .iter()
            .map(|name| self.root.join(name))
            .find(|path| path.is_file())
    }

    /// Assemble every layer without extracting.
    pub fn figment(&self, overrides: &ConfigOverrides) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(WebaleConfig::default()));

        match self.find() {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path));
                }
                tracing::debug!(path = %path.display(), "loading config file");
                figment = match path.extension().and_then(|ext| ext.to_str()) {
                    Some("toml") => figment.merge(Toml::file(&path)),
                    Some("json") => figment.merge(Json::file(&path)),
                    _ => {
                        return Err(ConfigError::UnsupportedFormat(
                            path.display().to_string(),
                        ));
                    }
                };
            }
            None => {
                tracing::debug!(root = %self.root.display(), "no config file found, using defaults");
            }
        }

        figment = figment.merge(Env::prefixed(&self.env_prefix).only(ENV_KEYS));
        figment = figment.merge(Serialized::defaults(overrides));

        Ok(figment)
    }

    /// Load and validate the merged configuration.
    pub fn load(&self, overrides: &ConfigOverrides) -> Result<WebaleConfig> {
        let config: WebaleConfig = self.figment(overrides)?.extract()?;
        config.validate()?;
        Ok(config)
    }
}
