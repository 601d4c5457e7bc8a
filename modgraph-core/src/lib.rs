pub mod compiler;
use compiler::GraphError;

mod node;
pub use node::{
    Edge,
    EdgeKind,
    Node,
    NodeId,
    NodeKind,
    SINK_LABEL,
    SOURCE_LABEL,
};

mod graph;
#[cfg(feature = "petgraph")]
pub use graph::NodeWeight;
pub use graph::{
    BorrowedModuleGraph,
    ModuleGraph,
    OwnedModuleGraph,
};

/// Build the anchored graph for a module expression.
///
/// This tokenizes, parses and attaches the `source` and `sink` anchors.
/// Every call works on its own parser state.
pub fn build_graph(expression: &str) -> Result<OwnedModuleGraph, GraphError> {
    let graph = compiler::parse_module(expression)?;
    let graph = compiler::attach_anchors(graph);

    tracing::debug!(
        nodes = graph.nodes().len(),
        edges = graph.edges().len(),
        "built module graph"
    );
    Ok(graph)
}
