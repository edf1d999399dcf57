//! # webale
//!
//! A minimal CommonJS bundler core.
//!
//! Starting from one entry module, webale discovers every `require("...")`
//! dependency, rewrites each call site to refer to the resolved module id, and
//! emits a single self-contained script with a small runtime loader.
//!
//! ## Pipeline
//!
//! ```text
//!   BuildOptions
//!        │
//!        ▼
//!   GraphWalker ──► Runtime::read_file ──► LoaderRegistry ──► scanner::scan
//!        │                                                        │
//!        │◄────────────────────── Resolver::resolve ◄─────────────┘
//!        ▼
//!   ModuleGraph ──► rewriter ──► emitter::render ──► atomic write
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use webale::{BuildOptions, Bundler, Mode};
//!
//! # #[tokio::main]
//! # async fn main() -> webale::Result<()> {
//! let options = BuildOptions::new("/project/src/index.js", "/project/dist/output.js")
//!     .root("/project")
//!     .mode(Mode::Production);
//!
//! let report = Bundler::new(options).build().await?;
//! println!("bundled {} modules", report.modules);
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing without a disk
//!
//! All filesystem access goes through [`Runtime`]. With the `test-utils`
//! feature, [`runtime::test_utils::MemoryRuntime`] holds a project in memory.

pub mod bundler;
pub mod emitter;
pub mod error;
pub mod graph;
pub mod loader;
pub mod module_id;
pub mod options;
pub mod resolver;
pub mod rewriter;
pub mod runtime;
pub mod scanner;
pub mod walker;

pub use bundler::{BuildReport, Bundler};
pub use error::{BuildError, Result};
pub use graph::{ModuleGraph, ModuleRecord, ResolvedImport};
pub use loader::{Loader, LoaderError, LoaderRegistry};
pub use module_id::{ModuleId, ModuleIdError};
pub use options::{BuildOptions, DEFAULT_MAX_DEPTH, Mode};
pub use resolver::Resolver;
pub use runtime::native::NativeRuntime;
pub use runtime::{Runtime, RuntimeError, RuntimeResult};
pub use scanner::ImportSite;
pub use walker::GraphWalker;
