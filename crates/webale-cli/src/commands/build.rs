//! The build command: load config, build, report.

use std::io::Write;
use std::path::{Path, PathBuf};

use webale::{BuildOptions, Bundler};
use webale_config::ConfigDiscovery;

use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute one build for the parsed command line.
///
/// # Build Process
///
/// 1. Resolve the project root (`--root`, else the current directory)
/// 2. Load configuration (CLI > environment > file > defaults)
/// 3. Either print the module graph or write the bundle
pub async fn execute(args: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let options = resolve_options(&args, &cwd)?;

    if options.watch {
        ui::warning("Watch mode is not supported; performing a single build");
    }

    let bundler = Bundler::new(options);

    if args.print_graph {
        let graph = bundler.graph().await?;
        let json = serde_json::to_string_pretty(&graph)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{json}")?;
        return Ok(());
    }

    ui::info(&format!(
        "Building {}",
        bundler.options().entry.display()
    ));
    let report = bundler.build().await?;

    ui::success(&format!(
        "Bundled {} modules in {}",
        report.modules,
        ui::format_duration(report.duration)
    ));
    ui::print_build_summary(&report);

    Ok(())
}

/// Turn the command line plus config layers into build options.
///
/// Paths given on the command line are relative to `cwd`; paths from config
/// files and the environment are relative to the project root.
pub fn resolve_options(args: &Cli, cwd: &Path) -> Result<BuildOptions> {
    let root = match &args.root {
        Some(root) => absolutize(root, cwd),
        None => cwd.to_path_buf(),
    };
    if !root.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "project root {} is not a directory",
            root.display()
        )));
    }

    let mut discovery = ConfigDiscovery::new(&root);
    if let Some(config) = &args.config {
        discovery = discovery.with_file(absolutize(config, cwd));
    }

    let mut overrides = args.overrides();
    overrides.entry = overrides.entry.map(|entry| absolutize(&entry, cwd));
    overrides.output = overrides.output.map(|output| absolutize(&output, cwd));

    let config = discovery.load(&overrides)?;
    tracing::debug!(?config, root = %root.display(), "resolved configuration");

    Ok(config.into_build_options(&root)?)
}

fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;
    use webale::Mode;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("webale").chain(args.iter().copied())).unwrap()
    }

    #[test]
    #[serial]
    fn cli_paths_are_relative_to_cwd() {
        let project = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        let root = project.path().to_str().unwrap();

        let options = resolve_options(
            &parse(&["--root", root, "--entry", "main.js", "--mode", "production"]),
            cwd.path(),
        )
        .unwrap();

        assert_eq!(options.entry, cwd.path().join("main.js"));
        assert_eq!(options.output, project.path().join("dist/output.js"));
        assert_eq!(options.root, project.path());
        assert_eq!(options.mode, Mode::Production);
    }

    #[test]
    #[serial]
    fn config_file_paths_are_relative_to_root() {
        let project = TempDir::new().unwrap();
        fs::write(
            project.path().join("webale.toml"),
            "entry = \"app/start.js\"\nwatch = true\n",
        )
        .unwrap();

        let options = resolve_options(&parse(&[]), project.path()).unwrap();

        assert_eq!(options.entry, project.path().join("app/start.js"));
        assert!(options.watch);
    }

    #[test]
    #[serial]
    fn missing_root_is_rejected() {
        let cwd = TempDir::new().unwrap();
        let err = resolve_options(&parse(&["--root", "does-not-exist"]), cwd.path()).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
