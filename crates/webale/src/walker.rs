//! Dependency graph builder.
//!
//! Starting from the entry, every module is read through the [`Runtime`],
//! passed through its loader, scanned, and its import sites resolved against
//! its own directory. Traversal uses an explicit stack so deep import chains
//! cannot overflow the call stack; the visit order is depth-first pre-order,
//! with siblings taken in source order.

use rustc_hash::FxHashSet;

use crate::error::{BuildError, Result};
use crate::graph::{ModuleGraph, ModuleRecord, ResolvedImport};
use crate::loader::LoaderRegistry;
use crate::module_id::ModuleId;
use crate::options::DEFAULT_MAX_DEPTH;
use crate::resolver::Resolver;
use crate::runtime::{Runtime, RuntimeError};
use crate::scanner;

/// Walks the import graph reachable from one entry.
#[derive(Debug, Clone)]
pub struct GraphWalker {
    resolver: Resolver,
    max_depth: usize,
    loaders: LoaderRegistry,
}

struct Pending {
    id: ModuleId,
    depth: usize,
}

impl GraphWalker {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver,
            max_depth: DEFAULT_MAX_DEPTH,
            loaders: LoaderRegistry::default(),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_loaders(mut self, loaders: LoaderRegistry) -> Self {
        self.loaders = loaders;
        self
    }

    /// Build the closed graph reachable from `entry`.
    ///
    /// # Errors
    ///
    /// The first failing module aborts the walk; see [`BuildError`] for the
    /// variants that can surface here.
    pub async fn walk(&self, entry: &ModuleId, runtime: &dyn Runtime) -> Result<ModuleGraph> {
        let mut graph = ModuleGraph::new();
        let mut visited: FxHashSet<ModuleId> = FxHashSet::default();
        let mut stack = vec![Pending {
            id: entry.clone(),
            depth: 0,
        }];

        while let Some(Pending { id, depth }) = stack.pop() {
            if !visited.insert(id.clone()) {
                continue;
            }

            if depth > self.max_depth {
                return Err(BuildError::GraphTooDeep {
                    id,
                    depth,
                    max: self.max_depth,
                });
            }

            let mut source = self.load(&id, runtime).await?;
            scanner::neutralize_hashbang(&mut source);
            let sites = scanner::scan(&id, &source)?;

            let mut imports = Vec::with_capacity(sites.len());
            for site in sites {
                let target = self.resolver.resolve(&site.specifier, id.dir())?;
                imports.push(ResolvedImport { site, target });
            }

            tracing::debug!(
                module = %id,
                depth,
                imports = imports.len(),
                "scanned module"
            );

            // Reversed so the first import is popped next.
            stack.extend(imports.iter().rev().filter_map(|import| {
                (!visited.contains(&import.target)).then(|| Pending {
                    id: import.target.clone(),
                    depth: depth + 1,
                })
            }));

            graph.insert(ModuleRecord {
                id,
                source,
                imports,
            });
        }

        Ok(graph)
    }

    async fn load(&self, id: &ModuleId, runtime: &dyn Runtime) -> Result<String> {
        let bytes = runtime
            .read_file(id.as_path())
            .await
            .map_err(|e| match e {
                RuntimeError::FileNotFound(_) => BuildError::ModuleNotFound { id: id.clone() },
                other => BuildError::Io {
                    id: id.clone(),
                    message: other.to_string(),
                },
            })?;

        let source = String::from_utf8(bytes).map_err(|e| BuildError::Io {
            id: id.clone(),
            message: format!("module is not valid UTF-8: {e}"),
        })?;

        self.loaders.apply(id, source)
    }
}
