//! Call-site rewriting.
//!
//! Each import call recorded by the scanner is replaced by a call to the
//! factory's loader parameter keyed by the resolved module id. Sites are
//! spliced by byte span, so formatting and comments around them survive
//! untouched.

use crate::graph::{ModuleGraph, ModuleRecord};
use crate::module_id::ModuleId;

/// Name of the loader parameter inside every generated factory.
pub const LOADER_PARAM: &str = "require";

/// `require("<id>")` with the id as a JSON string literal.
pub fn loader_call(id: &ModuleId) -> String {
    format!("{LOADER_PARAM}({})", quote(id))
}

/// JSON string literal for `id`; also valid JavaScript.
pub(crate) fn quote(id: &ModuleId) -> String {
    serde_json::Value::String(id.path_string().into_owned()).to_string()
}

/// Rewritten source for `record`.
pub fn rewrite(record: &ModuleRecord) -> String {
    if record.imports.is_empty() {
        return record.source.clone();
    }

    let source = record.source.as_str();
    let mut out = String::with_capacity(source.len() + record.imports.len() * 32);
    let mut cursor = 0;

    for import in &record.imports {
        let (start, end) = (import.site.start, import.site.end);
        debug_assert!(cursor <= start && start <= end && end <= source.len());
        out.push_str(&source[cursor..start]);
        out.push_str(&loader_call(&import.target));
        cursor = end;
    }
    out.push_str(&source[cursor..]);
    out
}

/// Rewritten sources for every module, in graph order.
pub fn rewrite_graph(graph: &ModuleGraph) -> Vec<(&ModuleId, String)> {
    graph
        .iter()
        .map(|record| (&record.id, rewrite(record)))
        .collect()
}
