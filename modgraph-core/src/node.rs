use core::{
    fmt,
    ops::Range,
};

/// Label of the synthetic entry node.
pub const SOURCE_LABEL: &str = "source";

/// Label of the synthetic exit node.
pub const SINK_LABEL: &str = "sink";

/// Identity of a single node occurrence within a graph.
///
/// Node ids are handed out in creation order. Two occurrences of the same
/// identifier in an expression always get two distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(u32);

impl NodeId {
    pub const fn new_const(index: u32) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NodeKind {
    /// An identifier occurrence from the module expression.
    Ortholog,

    /// The synthetic entry anchor.
    Source,
    /// The synthetic exit anchor.
    Sink,
}

impl NodeKind {
    pub const fn is_anchor(self) -> bool {
        matches!(self, Self::Source | Self::Sink)
    }
}

/// A node represents one occurrence of an identifier (or one anchor) in the graph.
///
/// The label itself lives in the label buffer of the owning graph,
/// the node only references it by range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node {
    kind: NodeKind,

    label_start: usize,
    label_end: usize,
}

impl Node {
    pub const fn new_const(kind: NodeKind, label_start: usize, label_end: usize) -> Self {
        Self {
            kind,
            label_start,
            label_end,
        }
    }

    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    pub const fn is_anchor(&self) -> bool {
        self.kind.is_anchor()
    }

    /// Range of the label within the graph's label buffer.
    pub const fn label_range(&self) -> Range<usize> {
        self.label_start..self.label_end
    }
}

/// The grammar level which created an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EdgeKind {
    /// Two consecutive stages separated by a space.
    Sequence,
    /// Two parts of a complex joined by "+".
    Conjunction,
    /// An edge from the source anchor or into the sink anchor.
    Anchor,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sequence => "sequence",
            Self::Conjunction => "conjunction",
            Self::Anchor => "anchor",
        })
    }
}

/// A directed edge: `from` has to be completed before `to`.
///
/// Edges are never merged, the same pair may occur more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Edge {
    from: NodeId,
    to: NodeId,
    kind: EdgeKind,
}

impl Edge {
    pub const fn new_const(from: NodeId, to: NodeId, kind: EdgeKind) -> Self {
        Self { from, to, kind }
    }

    pub const fn from(&self) -> NodeId {
        self.from
    }

    pub const fn to(&self) -> NodeId {
        self.to
    }

    pub const fn kind(&self) -> EdgeKind {
        self.kind
    }
}
