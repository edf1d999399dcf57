//! Import call discovery.
//!
//! Parses a module with oxc and walks the whole tree collecting
//! `require("...")` call sites. The same recognizer feeds both the graph
//! walker (for dependencies) and the rewriter (through the recorded spans),
//! so the set of rewritten sites is exactly the set of discovered ones.
//!
//! Every module is parsed as a CommonJS script. ES module syntax is rejected
//! because the body is pasted into a plain factory function.

use oxc_allocator::Allocator;
use oxc_ast::ast::{Argument, CallExpression, Expression};
use oxc_ast_visit::{Visit, walk};
use oxc_parser::{ParseOptions, Parser};
use oxc_span::SourceType;

use crate::error::{BuildError, Result};
use crate::module_id::ModuleId;

/// Callee name that marks an import call.
pub const IMPORT_CALLEE: &str = "require";

/// One recognised import call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSite {
    /// The literal argument exactly as written.
    pub specifier: String,
    /// Byte offset of the start of the whole call expression.
    pub start: usize,
    /// Byte offset one past the end of the call expression.
    pub end: usize,
}

/// Recognise an import call.
///
/// Only `require("literal")` qualifies: a plain identifier callee, not an
/// optional call, and exactly one string literal argument. `obj.require(..)`,
/// `require(name)`, `require(`tpl`)`, `require(...args)` and
/// `require("a", "b")` are ignored.
pub fn recognize(call: &CallExpression<'_>) -> Option<ImportSite> {
    if call.optional {
        return None;
    }

    let Expression::Identifier(callee) = &call.callee else {
        return None;
    };
    if callee.name.as_str() != IMPORT_CALLEE {
        return None;
    }

    if call.arguments.len() != 1 {
        return None;
    }
    let Some(Argument::StringLiteral(literal)) = call.arguments.first() else {
        return None;
    };

    Some(ImportSite {
        specifier: literal.value.to_string(),
        start: call.span.start as usize,
        end: call.span.end as usize,
    })
}

#[derive(Default)]
struct ImportCollector {
    sites: Vec<ImportSite>,
}

impl<'a> Visit<'a> for ImportCollector {
    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if let Some(site) = recognize(call) {
            self.sites.push(site);
        }
        walk::walk_call_expression(self, call);
    }
}

/// Turn a leading `#!` line into a line comment.
///
/// A hashbang is only legal at the very start of a file, never inside the
/// factory function. The replacement has the same length, so spans recorded
/// afterwards still line up.
pub fn neutralize_hashbang(source: &mut String) {
    if source.starts_with("#!") {
        source.replace_range(..2, "//");
    }
}

/// Parse `source` and return its import sites in pre-order.
///
/// # Errors
///
/// Returns [`BuildError::SyntaxError`] if oxc reports any parse error, or if
/// the module uses `import`/`export` declarations or `import.meta`.
pub fn scan(id: &ModuleId, source: &str) -> Result<Vec<ImportSite>> {
    let allocator = Allocator::default();
    let source_type = SourceType::cjs();

    // Module bodies end up inside a factory function, so a top-level `return`
    // is legal in the bundle.
    let ret = Parser::new(&allocator, source, source_type)
        .with_options(ParseOptions {
            allow_return_outside_function: true,
            ..ParseOptions::default()
        })
        .parse();

    if ret.panicked || !ret.errors.is_empty() {
        let message = if ret.errors.is_empty() {
            "parser aborted".to_string()
        } else {
            ret.errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        };
        return Err(BuildError::SyntaxError {
            id: id.clone(),
            message,
        });
    }

    if ret.module_record.has_module_syntax {
        return Err(BuildError::SyntaxError {
            id: id.clone(),
            message: "ES module syntax (import, export, import.meta) is not allowed in a \
                      CommonJS module"
                .to_string(),
        });
    }

    let mut collector = ImportCollector::default();
    collector.visit_program(&ret.program);
    Ok(collector.sites)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> ModuleId {
        ModuleId::new("/p/src/index.js").unwrap()
    }

    fn specifiers(source: &str) -> Vec<String> {
        scan(&id(), source)
            .unwrap()
            .into_iter()
            .map(|site| site.specifier)
            .collect()
    }

    fn assert_syntax_error(source: &str) {
        match scan(&id(), source).unwrap_err() {
            BuildError::SyntaxError { id: failing, message } => {
                assert_eq!(failing, id());
                assert!(!message.is_empty());
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn finds_plain_require_calls() {
        let source = r#"const util = require("./util");
const _ = require('lodash');
"#;
        assert_eq!(specifiers(source), vec!["./util", "lodash"]);
    }

    #[test]
    fn records_call_spans() {
        let source = "var a = require('./a');";
        let sites = scan(&id(), source).unwrap();

        assert_eq!(sites.len(), 1);
        assert_eq!(&source[sites[0].start..sites[0].end], "require('./a')");
    }

    #[test]
    fn ignores_non_matching_calls() {
        let source = r#"
            const name = "./dynamic";
            module.require("./member");
            require(name);
            require(`./template`);
            require("./a", "./b");
            require(...["./spread"]);
            require?.("./optional");
            requireX("./other");
            require();
        "#;
        assert!(scan(&id(), source).unwrap().is_empty());
    }

    #[test]
    fn finds_nested_calls_in_pre_order() {
        let source = r#"
            function load() {
                return [require("./first"), wrap(require("./second"))];
            }
            if (cond) { require("./third"); }
            module.exports = { lazy: () => require("./fourth") };
        "#;
        assert_eq!(
            specifiers(source),
            vec!["./first", "./second", "./third", "./fourth"]
        );
    }

    #[test]
    fn keeps_duplicate_sites() {
        let source = "require('./a'); require('./a');";
        assert_eq!(scan(&id(), source).unwrap().len(), 2);
    }

    #[test]
    fn allows_top_level_return() {
        let source = "if (done) return;\nrequire('./a');";
        assert_eq!(specifiers(source), vec!["./a"]);
    }

    #[test]
    fn reports_syntax_errors() {
        assert_syntax_error("const = ;");
    }

    #[test]
    fn rejects_export_declarations() {
        assert_syntax_error("export const x = 1;");
        assert_syntax_error("module.exports = 1;\nexport default 2;");
    }

    #[test]
    fn rejects_import_declarations() {
        assert_syntax_error("import fs from 'fs';\nconsole.log(fs);");
    }

    #[test]
    fn rejects_import_meta() {
        assert_syntax_error("console.log(import.meta.url);");
    }

    #[test]
    fn neutralized_hashbang_keeps_spans() {
        let mut source = "#!/usr/bin/env node\nrequire('./a');".to_string();
        neutralize_hashbang(&mut source);

        assert_eq!(source, "///usr/bin/env node\nrequire('./a');");
        let sites = scan(&id(), &source).unwrap();
        assert_eq!(&source[sites[0].start..sites[0].end], "require('./a')");
    }

    #[test]
    fn hashbang_only_counts_at_the_start() {
        let mut source = "var shebang = '#!';".to_string();
        neutralize_hashbang(&mut source);
        assert_eq!(source, "var shebang = '#!';");
    }
}
