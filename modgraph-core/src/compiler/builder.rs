use tracing::trace;

use crate::{
    graph::OwnedModuleGraph,
    Edge,
    EdgeKind,
    Node,
    NodeId,
    NodeKind,
};

/// Entry and exit nodes of a parsed sub expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontier {
    /// Nodes without a predecessor within the sub expression.
    pub top: Vec<NodeId>,
    /// Nodes without a successor within the sub expression.
    pub last: Vec<NodeId>,
}

impl Frontier {
    pub fn single(node: NodeId) -> Self {
        Self {
            top: vec![node],
            last: vec![node],
        }
    }
}

/// Accumulates nodes and edges while an expression gets parsed.
///
/// The builder never validates or deduplicates anything.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    labels: String,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_graph(graph: OwnedModuleGraph) -> Self {
        let (nodes, edges, labels) = graph.into_parts();
        Self {
            nodes,
            edges,
            labels,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Creates a new node. Every call yields a new id, even for a label seen before.
    pub fn add_node(&mut self, kind: NodeKind, label: &str) -> NodeId {
        let label_start = self.labels.len();
        self.labels.push_str(label);

        let id = NodeId::new_const(self.nodes.len() as u32);
        self.nodes
            .push(Node::new_const(kind, label_start, self.labels.len()));

        trace!(%id, ?kind, label, "created node");
        id
    }

    pub fn add_edge(&mut self, from: NodeId, to: NodeId, kind: EdgeKind) {
        self.edges.push(Edge::new_const(from, to, kind));
    }

    /// Connects every node of `from` with every node of `to`.
    pub fn connect(&mut self, from: &[NodeId], to: &[NodeId], kind: EdgeKind) {
        trace!(?from, ?to, %kind, "connecting frontier");

        self.edges.reserve(from.len() * to.len());
        for &source in from {
            for &target in to {
                self.add_edge(source, target, kind);
            }
        }
    }

    pub fn finish(self) -> OwnedModuleGraph {
        OwnedModuleGraph::new(self.nodes, self.edges, self.labels)
    }
}
