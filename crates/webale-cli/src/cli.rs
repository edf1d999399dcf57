//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use webale::Mode;
use webale_config::ConfigOverrides;

/// webale - bundle a CommonJS module graph into one script
#[derive(Parser, Debug)]
#[command(
    name = "webale",
    version,
    about = "Bundle a CommonJS module graph into a single script",
    long_about = "webale follows require() calls from an entry module, rewrites each call\n\
                  to the resolved module path and writes one self-contained bundle."
)]
pub struct Cli {
    /// Entry module (default: src/index.js)
    #[arg(short, long, value_name = "PATH")]
    pub entry: Option<PathBuf>,

    /// Bundle output path (default: dist/output.js)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Build mode
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Request watch mode (accepted; a single build is performed)
    #[arg(short, long)]
    pub watch: bool,

    /// Maximum import chain depth below the entry (default: 1000)
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Project root; defaults to the current directory
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Config file to use instead of webale.toml / webale.config.json
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the module graph as JSON instead of writing a bundle
    #[arg(long)]
    pub print_graph: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Development,
    Production,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Development => Mode::Development,
            ModeArg::Production => Mode::Production,
        }
    }
}

impl Cli {
    /// Config values given on the command line.
    ///
    /// Paths are passed through as written; the build command anchors them.
    /// `--watch` only overrides when present.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            entry: self.entry.clone(),
            output: self.output.clone(),
            mode: self.mode.map(Into::into),
            watch: self.watch.then_some(true),
            max_depth: self.max_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "webale",
            "--entry",
            "lib/main.js",
            "--mode",
            "production",
            "--print-graph",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.entry, Some(PathBuf::from("lib/main.js")));
        assert_eq!(cli.mode, Some(ModeArg::Production));
        assert!(cli.print_graph);
        assert!(cli.verbose);

        let overrides = cli.overrides();
        assert_eq!(overrides.mode, Some(Mode::Production));
        assert_eq!(overrides.watch, None);
        assert!(overrides.output.is_none());
    }

    #[test]
    fn max_depth_flag_reaches_overrides() {
        let cli = Cli::try_parse_from(["webale", "--max-depth", "3"]).unwrap();
        assert_eq!(cli.overrides().max_depth, Some(3));

        let cli = Cli::try_parse_from(["webale"]).unwrap();
        assert_eq!(cli.overrides().max_depth, None);
    }

    #[test]
    fn rejects_non_numeric_max_depth() {
        assert!(Cli::try_parse_from(["webale", "--max-depth", "deep"]).is_err());
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["webale", "-v", "-q"]).is_err());
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["webale", "--mode", "staging"]).is_err());
    }
}
