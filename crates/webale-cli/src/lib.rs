//! webale command-line interface.
//!
//! - [`cli`] - argument definitions
//! - [`commands`] - the build command
//! - [`error`] - error types and miette rendering
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - terminal status output

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
