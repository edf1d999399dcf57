//! Bundle rendering and output.
//!
//! The bundle is one self-invoking function that receives a table of module
//! factories keyed by module id, defines a memoizing loader over it, and
//! returns the entry module's exports:
//!
//! ```text
//! ;(function (modules) {
//!   <runtime>
//!   return __loader("/p/src/index.js")
//! })({
//! "/p/src/index.js": function(module, exports, require){
//! <rewritten source>
//! },
//! })
//! ```
//!
//! Module bodies are real function bodies, so no escaping is involved.

use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};
use crate::graph::ModuleGraph;
use crate::module_id::ModuleId;
use crate::rewriter::{self, LOADER_PARAM};
use crate::runtime::Runtime;

/// Name of the loader function defined by the runtime.
pub const LOADER_FN: &str = "__loader";

/// Memoizing loader over the `modules` table.
///
/// A module is cached before its factory runs, so a cyclic import observes the
/// partially populated `exports` instead of recursing forever.
pub const RUNTIME_BODY: &str = r#"  var cache = {}
  var has = Object.prototype.hasOwnProperty
  function __loader(id) {
    if (has.call(cache, id)) return cache[id].exports
    if (!has.call(modules, id)) throw new Error("Cannot find module '" + id + "'")
    var module = { exports: {} }
    cache[id] = module
    modules[id](module, module.exports, __loader)
    return module.exports
  }
"#;

/// Render the bundle text for `graph`, starting execution at `entry`.
///
/// Every module in the graph is rewritten; the factory table follows graph
/// order, so the output is byte-stable for a given graph.
pub fn render(graph: &ModuleGraph, entry: &ModuleId) -> String {
    let mut out = String::new();

    out.push_str(";(function (modules) {\n");
    out.push_str(RUNTIME_BODY);
    out.push_str(&format!("  return {LOADER_FN}({})\n", rewriter::quote(entry)));
    out.push_str("})({\n");

    for (id, source) in rewriter::rewrite_graph(graph) {
        out.push_str(&format!(
            "{}: function(module, exports, {LOADER_PARAM}){{\n",
            rewriter::quote(id)
        ));
        out.push_str(&source);
        if !source.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("},\n");
    }

    out.push_str("})\n");
    out
}

/// Sibling path the bundle is staged at before being moved into place.
pub fn temp_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    output.with_file_name(name)
}

/// Write `contents` to `output` atomically.
///
/// The parent directory is created if missing. The bytes go to a temporary
/// sibling first and are renamed over `output`, so a failure never leaves a
/// partially written bundle and any previous file is replaced whole.
pub async fn write_atomic(output: &Path, contents: &[u8], runtime: &dyn Runtime) -> Result<()> {
    let write_error = |message: String| BuildError::OutputWriteError {
        path: output.to_path_buf(),
        message,
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !runtime.exists(parent) {
            tracing::debug!(dir = %parent.display(), "creating output directory");
        }
        runtime
            .create_dir(parent, true)
            .await
            .map_err(|e| write_error(format!("failed to create output directory: {e}")))?;
    }

    let temp = temp_path(output);
    if let Err(e) = runtime.write_file(&temp, contents).await {
        let _ = runtime.remove_file(&temp).await;
        return Err(write_error(e.to_string()));
    }

    if let Err(e) = runtime.rename(&temp, output).await {
        let _ = runtime.remove_file(&temp).await;
        return Err(write_error(e.to_string()));
    }

    Ok(())
}

/// Render `graph` and write it to `output`. Returns the number of bytes written.
pub async fn emit(
    graph: &ModuleGraph,
    entry: &ModuleId,
    output: &Path,
    runtime: &dyn Runtime,
) -> Result<usize> {
    let bundle = render(graph, entry);
    write_atomic(output, bundle.as_bytes(), runtime).await?;
    tracing::debug!(output = %output.display(), bytes = bundle.len(), "bundle written");
    Ok(bundle.len())
}
