//! Property tests over randomly generated import graphs.

use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;
use webale::runtime::test_utils::MemoryRuntime;
use webale::{BuildOptions, Bundler};

/// Adjacency lists for modules `m0..mN`; `edges[i]` lists the modules `m{i}` requires.
fn dag() -> impl Strategy<Value = Vec<Vec<usize>>> {
    (1usize..12).prop_flat_map(|n| {
        (0..n)
            .map(|i| prop::collection::vec((i + 1)..=n, 0..4))
            .collect::<Vec<_>>()
    })
}

fn reachable(edges: &[Vec<usize>]) -> BTreeSet<usize> {
    let mut seen = BTreeSet::new();
    let mut stack = vec![0];
    while let Some(node) = stack.pop() {
        if node < edges.len() && seen.insert(node) {
            stack.extend(edges[node].iter().copied());
        }
    }
    seen
}

fn project(edges: &[Vec<usize>], cyclic: bool) -> MemoryRuntime {
    let mut runtime = MemoryRuntime::new("/p");
    for (i, deps) in edges.iter().enumerate() {
        let mut source: String = deps
            .iter()
            .filter(|&&dep| dep < edges.len())
            .map(|dep| format!("require('./m{dep}');\n"))
            .collect();
        if cyclic && i > 0 {
            source.push_str("require('./m0');\n");
        }
        runtime = runtime.with_file(format!("/p/src/m{i}.js"), source);
    }
    runtime
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #[test]
    fn each_reachable_module_appears_once(edges in dag(), cyclic in any::<bool>()) {
        let runtime = Arc::new(project(&edges, cyclic));
        let options = BuildOptions::new("/p/src/m0.js", "/p/dist/out.js");

        let report = block_on(Bundler::new(options.clone()).runtime(runtime.clone()).build()).unwrap();
        let graph = block_on(Bundler::new(options).runtime(runtime.clone()).graph()).unwrap();

        let expected: BTreeSet<String> = reachable(&edges)
            .into_iter()
            .map(|i| format!("/p/src/m{i}.js"))
            .collect();
        let actual: BTreeSet<String> = graph.ids().map(|id| id.to_string()).collect();

        prop_assert_eq!(report.modules, expected.len());
        prop_assert_eq!(graph.len(), expected.len());
        prop_assert_eq!(actual, expected.clone());
        prop_assert!(graph.is_closed());

        let bundle = runtime.read_string("/p/dist/out.js").unwrap();
        for path in &expected {
            let key = format!("\"{path}\": function(module, exports, require){{");
            prop_assert_eq!(bundle.matches(&key).count(), 1);
        }
    }
}
