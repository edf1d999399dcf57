//! Configuration layer for webale.
//!
//! Merges defaults, a project config file, `WEBALE_*` environment variables
//! and command-line overrides into a [`WebaleConfig`], then resolves it into
//! the [`webale::BuildOptions`] consumed by the bundler core.

pub mod config;
pub mod discovery;
pub mod error;

pub use config::{ConfigOverrides, DEFAULT_ENTRY, DEFAULT_OUTPUT, WebaleConfig};
pub use discovery::{CONFIG_FILES, ConfigDiscovery, ENV_PREFIX};
pub use error::{ConfigError, Result};
