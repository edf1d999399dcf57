//! Miette diagnostic conversion for CLI errors.

use miette::Report;

use super::{BuildError, CliError, ConfigError};

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(e) => build_error_to_miette(e),
        CliError::Config(ConfigError::NotFound(path)) => miette::miette!(
            help = "Drop --config to fall back to webale.toml, webale.config.json or the defaults",
            "Config file not found: {}",
            path.display()
        ),
        CliError::Config(e) => miette::miette!(
            help = "Valid keys are entry, output, mode (development|production), watch and max_depth",
            "Configuration error: {}",
            e
        ),
        other => miette::miette!("{}", other),
    }
}

/// Convert BuildError to miette Report
pub fn build_error_to_miette(err: BuildError) -> Report {
    match err {
        BuildError::ModuleNotFound { id } => miette::miette!(
            help = "Relative imports get a .js extension when they have none; \
                    package imports resolve to <root>/node_modules/<name>",
            "Module not found: {}",
            id
        ),
        BuildError::SyntaxError { id, message } => {
            miette::miette!("Syntax error in {}\n\n{}", id, message)
        }
        BuildError::GraphTooDeep { id, depth, max } => miette::miette!(
            help = "Raise max_depth in webale.toml or WEBALE_MAX_DEPTH",
            "Import chain too deep at {} (depth {}, maximum {})",
            id,
            depth,
            max
        ),
        BuildError::OutputWriteError { path, message } => miette::miette!(
            help = "Check that the output directory is writable",
            "Failed to write {}: {}",
            path.display(),
            message
        ),
        other => miette::miette!("{}", other),
    }
}
