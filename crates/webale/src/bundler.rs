//! One build, end to end.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::emitter;
use crate::error::{BuildError, Result};
use crate::graph::ModuleGraph;
use crate::loader::LoaderRegistry;
use crate::module_id::ModuleId;
use crate::options::{BuildOptions, Mode};
use crate::resolver::Resolver;
use crate::runtime::Runtime;
use crate::runtime::native::NativeRuntime;
use crate::walker::GraphWalker;

/// Summary of a successful build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub entry: ModuleId,
    pub output: PathBuf,
    pub mode: Mode,
    /// Number of modules in the bundle.
    pub modules: usize,
    /// Size of the written bundle in bytes.
    pub bytes: usize,
    pub duration: Duration,
}

/// Bundles the graph reachable from `options.entry` into `options.output`.
///
/// ```rust,no_run
/// use webale::{BuildOptions, Bundler};
///
/// # async fn run() -> webale::Result<()> {
/// let options = BuildOptions::new("/p/src/index.js", "/p/dist/output.js");
/// let report = Bundler::new(options).build().await?;
/// println!("{} modules, {} bytes", report.modules, report.bytes);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Bundler {
    options: BuildOptions,
    runtime: Arc<dyn Runtime>,
    loaders: LoaderRegistry,
}

impl Bundler {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            runtime: Arc::new(NativeRuntime::new()),
            loaders: LoaderRegistry::default(),
        }
    }

    /// Use `runtime` for all filesystem access instead of the native one.
    pub fn runtime(mut self, runtime: Arc<dyn Runtime>) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn loaders(mut self, loaders: LoaderRegistry) -> Self {
        self.loaders = loaders;
        self
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    fn entry_id(&self) -> Result<ModuleId> {
        ModuleId::new(&self.options.entry).map_err(|e| BuildError::InvalidSpecifier {
            specifier: self.options.entry.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn walker(&self) -> GraphWalker {
        GraphWalker::new(Resolver::new(&self.options.root))
            .with_max_depth(self.options.max_depth)
            .with_loaders(self.loaders.clone())
    }

    /// Build the module graph without writing anything.
    pub async fn graph(&self) -> Result<ModuleGraph> {
        let entry = self.entry_id()?;
        self.walker().walk(&entry, self.runtime.as_ref()).await
    }

    /// Build and write the bundle.
    ///
    /// Nothing is written unless the whole graph was built successfully.
    pub async fn build(&self) -> Result<BuildReport> {
        let started = Instant::now();
        let entry = self.entry_id()?;

        tracing::info!(
            entry = %entry,
            output = %self.options.output.display(),
            mode = %self.options.mode,
            "starting build"
        );

        let graph = self.walker().walk(&entry, self.runtime.as_ref()).await?;
        let bytes = emitter::emit(
            &graph,
            &entry,
            &self.options.output,
            self.runtime.as_ref(),
        )
        .await?;

        let report = BuildReport {
            entry,
            output: self.options.output.clone(),
            mode: self.options.mode,
            modules: graph.len(),
            bytes,
            duration: started.elapsed(),
        };

        tracing::info!(
            modules = report.modules,
            bytes = report.bytes,
            duration_ms = report.duration.as_millis() as u64,
            "build complete"
        );

        Ok(report)
    }
}
