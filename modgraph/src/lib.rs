/*!
Turns KEGG module definitions into explicit directed graphs.

KEGG publishes the logic of a module as a nested expression of orthology identifiers.
This crate parses such an expression and builds a graph with one node per identifier occurrence,
anchored by a synthetic `source` and `sink` node.

# Building a graph at runtime
```
use modgraph::{build_graph, ModuleGraph};

let graph = build_graph("K01657+K01658,K13503").unwrap();
assert_eq!(graph.ortholog_count(), 3);
assert!(graph.is_anchored());
```

# Building a graph at compile time
```
use modgraph::{module_graph, BorrowedModuleGraph, ModuleGraph};

static MODULE: BorrowedModuleGraph<'static> = module_graph!("K00844 K01810 (K00850,K16370)");
assert_eq!(MODULE.ortholog_count(), 4);
```

*/
#![doc = include_str!("../GRAMMAR.MD")]
pub use modgraph_core::*;
pub use modgraph_proc::module_graph;
