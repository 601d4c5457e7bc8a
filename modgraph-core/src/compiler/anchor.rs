use tracing::{
    debug,
    trace,
};

use super::GraphBuilder;
use crate::{
    graph::OwnedModuleGraph,
    EdgeKind,
    ModuleGraph,
    NodeId,
    NodeKind,
    SINK_LABEL,
    SOURCE_LABEL,
};

/// Adds the `source` and `sink` anchors to a freshly parsed graph.
///
/// Every node without an incoming edge gets connected from `source`,
/// every node without an outgoing edge gets connected into `sink`.
/// Degrees are computed over the whole graph, so this has to run after parsing completed.
/// A graph which already carries both anchors is returned unchanged.
pub fn attach_anchors(graph: OwnedModuleGraph) -> OwnedModuleGraph {
    if graph.is_anchored() {
        trace!("graph already anchored");
        return graph;
    }

    let node_count = graph.nodes().len();
    let mut in_degree = vec![0usize; node_count];
    let mut out_degree = vec![0usize; node_count];
    for edge in graph.edges() {
        out_degree[edge.from().index()] += 1;
        in_degree[edge.to().index()] += 1;
    }

    let (entries, exits) = {
        let mut entries = Vec::new();
        let mut exits = Vec::new();
        for (index, node) in graph.nodes().iter().enumerate() {
            if node.is_anchor() {
                continue;
            }

            let id = NodeId::new_const(index as u32);
            if in_degree[index] == 0 {
                entries.push(id);
            }

            if out_degree[index] == 0 {
                exits.push(id);
            }
        }

        (entries, exits)
    };

    let mut builder = GraphBuilder::from_graph(graph);
    let source = builder.add_node(NodeKind::Source, SOURCE_LABEL);
    let sink = builder.add_node(NodeKind::Sink, SINK_LABEL);

    builder.connect(&[source], &entries, EdgeKind::Anchor);
    builder.connect(&exits, &[sink], EdgeKind::Anchor);

    debug!(
        entries = entries.len(),
        exits = exits.len(),
        "attached source and sink"
    );
    builder.finish()
}
