use core::fmt::Debug;

use crate::{
    Edge,
    Node,
    NodeId,
    NodeKind,
};

/// A module graph consists of three components:
///
/// 1. Nodes
///    One node per identifier occurrence, plus the `source` and `sink` anchors once normalized.
///
/// 2. Edges
///    Directed connections between nodes, tagged with the grammar level which created them.
///
/// 3. Labels
///    A text buffer the nodes reference for their labels.
pub trait ModuleGraph: Send + Sync + Debug {
    /// Retrieves all nodes of the graph, indexed by [NodeId].
    fn nodes(&self) -> &[Node];

    /// Retrieves all edges of the graph in creation order.
    fn edges(&self) -> &[Edge];

    /// Retrieves the label buffer referenced by the nodes.
    fn labels(&self) -> &str;

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes().get(id.index())
    }

    /// Returns the label of the given node.
    fn label(&self, id: NodeId) -> Option<&str> {
        let node = self.node(id)?;
        self.labels().get(node.label_range())
    }

    fn in_degree(&self, id: NodeId) -> usize {
        self.edges().iter().filter(|edge| edge.to() == id).count()
    }

    fn out_degree(&self, id: NodeId) -> usize {
        self.edges().iter().filter(|edge| edge.from() == id).count()
    }

    /// Returns the targets of all edges leaving `id`, duplicates included.
    fn successors(&self, id: NodeId) -> Vec<NodeId> {
        self.edges()
            .iter()
            .filter(|edge| edge.from() == id)
            .map(Edge::to)
            .collect()
    }

    /// Returns the origins of all edges entering `id`, duplicates included.
    fn predecessors(&self, id: NodeId) -> Vec<NodeId> {
        self.edges()
            .iter()
            .filter(|edge| edge.to() == id)
            .map(Edge::from)
            .collect()
    }

    fn source(&self) -> Option<NodeId> {
        find_kind(self, NodeKind::Source)
    }

    fn sink(&self) -> Option<NodeId> {
        find_kind(self, NodeKind::Sink)
    }

    fn is_anchored(&self) -> bool {
        self.source().is_some() && self.sink().is_some()
    }

    /// Number of nodes which originate from identifiers (anchors excluded).
    fn ortholog_count(&self) -> usize {
        self.nodes()
            .iter()
            .filter(|node| node.kind() == NodeKind::Ortholog)
            .count()
    }

    /// All edges as `(from label, to label)` pairs in creation order.
    fn labeled_edges(&self) -> Vec<(&str, &str)> {
        self.edges()
            .iter()
            .map(|edge| {
                (
                    self.label(edge.from()).unwrap_or_default(),
                    self.label(edge.to()).unwrap_or_default(),
                )
            })
            .collect()
    }

    /// Converts the graph into a petgraph [DiGraph](petgraph::graph::DiGraph) for further traversal.
    ///
    /// Node indices of the result match the [NodeId]s of this graph.
    #[cfg(feature = "petgraph")]
    fn to_petgraph(&self) -> petgraph::graph::DiGraph<NodeWeight, crate::EdgeKind> {
        use petgraph::graph::{
            DiGraph,
            NodeIndex,
        };

        let mut graph = DiGraph::with_capacity(self.nodes().len(), self.edges().len());
        for (index, node) in self.nodes().iter().enumerate() {
            graph.add_node(NodeWeight {
                kind: node.kind(),
                label: self
                    .label(NodeId::new_const(index as u32))
                    .unwrap_or_default()
                    .to_string(),
            });
        }

        for edge in self.edges() {
            graph.add_edge(
                NodeIndex::new(edge.from().index()),
                NodeIndex::new(edge.to().index()),
                edge.kind(),
            );
        }

        graph
    }
}

fn find_kind<G: ModuleGraph + ?Sized>(graph: &G, kind: NodeKind) -> Option<NodeId> {
    graph
        .nodes()
        .iter()
        .position(|node| node.kind() == kind)
        .map(|index| NodeId::new_const(index as u32))
}

/// Node weight of a graph exported via [ModuleGraph::to_petgraph].
#[cfg(feature = "petgraph")]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeWeight {
    pub kind: NodeKind,
    pub label: String,
}

#[cfg(feature = "petgraph")]
impl core::fmt::Display for NodeWeight {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.label)
    }
}

/// An implementation of the [ModuleGraph] interface that borrows its nodes, edges and labels.
///
/// This struct is primarily used alongside the `module_graph!` macro to embed graphs at compile time.
#[derive(Debug, Clone, Copy)]
pub struct BorrowedModuleGraph<'a> {
    nodes: &'a [Node],
    edges: &'a [Edge],
    labels: &'a str,
}

impl<'a> BorrowedModuleGraph<'a> {
    pub const fn new(nodes: &'a [Node], edges: &'a [Edge], labels: &'a str) -> Self {
        Self {
            nodes,
            edges,
            labels,
        }
    }
}

impl ModuleGraph for BorrowedModuleGraph<'_> {
    fn nodes(&self) -> &[Node] {
        self.nodes
    }

    fn edges(&self) -> &[Edge] {
        self.edges
    }

    fn labels(&self) -> &str {
        self.labels
    }
}

/// An implementation of the [ModuleGraph] interface that owns its nodes, edges and labels.
///
/// This struct is produced by [build_graph](crate::build_graph) at runtime.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OwnedModuleGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    labels: String,
}

impl OwnedModuleGraph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>, labels: String) -> Self {
        Self {
            labels,
            edges,
            nodes,
        }
    }

    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>, String) {
        (self.nodes, self.edges, self.labels)
    }
}

impl ModuleGraph for OwnedModuleGraph {
    fn labels(&self) -> &str {
        &self.labels
    }

    fn edges(&self) -> &[Edge] {
        &self.edges
    }

    fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}

/// Serializes a graph as `{ nodes: [{ id, kind, label }], edges: [{ from, to, kind }] }`.
#[cfg(feature = "serde")]
fn serialize_graph<G, S>(graph: &G, serializer: S) -> Result<S::Ok, S::Error>
where
    G: ModuleGraph + ?Sized,
    S: serde::Serializer,
{
    use serde::ser::SerializeStruct;

    #[derive(serde::Serialize)]
    struct LabeledNode<'a> {
        id: NodeId,
        kind: NodeKind,
        label: &'a str,
    }

    let nodes = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(index, node)| LabeledNode {
            id: NodeId::new_const(index as u32),
            kind: node.kind(),
            label: graph.labels().get(node.label_range()).unwrap_or_default(),
        })
        .collect::<Vec<_>>();

    let mut state = serializer.serialize_struct("ModuleGraph", 2)?;
    state.serialize_field("nodes", &nodes)?;
    state.serialize_field("edges", graph.edges())?;
    state.end()
}

#[cfg(feature = "serde")]
impl serde::Serialize for OwnedModuleGraph {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_graph(self, serializer)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BorrowedModuleGraph<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_graph(self, serializer)
    }
}
