//! Step records: immutable, self-describing snapshots of simulation state.
//!
//! The simulator emits one [`StepRecord`] per meaningful transition. Each
//! record owns full copies of every node and edge, annotated with semantic
//! marks, plus the route table and a human-readable narration. A record never
//! references engine state or other records, so a viewer can render
//! `steps[i]` for any `i` without recomputation.
//!
//! Marks are deliberately semantic rather than visual: the engine says *what
//! happened* to an element ("just finalized", "part of the tree"); mapping
//! that to colors, border widths, or arrowheads is the presentation layer's
//! concern.

use crate::id::{EdgeId, NodeId};
use crate::table::RouteTable;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Marks
// ---------------------------------------------------------------------------

/// Per-step annotation on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeMark {
    /// Still in the frontier, nothing notable this step.
    Neutral,
    /// Already finalized in an earlier iteration.
    Finalized,
    /// Finalized by this step.
    JustFinalized,
    /// Examined as a neighbour during this step's relaxation pass.
    JustExamined,
}

/// Per-step annotation on an edge.
///
/// `Tree` and `JustExamined` never apply to the same edge in the same step:
/// an examined edge always leads to a frontier node, while both endpoints of
/// a tree edge are finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeMark {
    /// Not part of anything notable this step.
    Neutral,
    /// Part of the shortest-path tree, oriented away from the start:
    /// `toward` is the endpoint this edge reaches (the child side).
    Tree { toward: NodeId },
    /// Examined during this step's relaxation pass, whether or not the
    /// relaxation improved a distance.
    JustExamined,
}

// ---------------------------------------------------------------------------
// Snapshot views
// ---------------------------------------------------------------------------

/// An owned, annotated copy of a node for one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeView {
    pub id: NodeId,
    pub label: String,
    pub mark: NodeMark,
}

/// An owned, annotated copy of an edge for one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeView {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    /// Parsed weight. Validation happens before the first step is emitted,
    /// so views always carry a parsed value.
    pub weight: u64,
    pub mark: EdgeMark,
}

// ---------------------------------------------------------------------------
// StepRecord
// ---------------------------------------------------------------------------

/// What kind of transition a step records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    /// A node was finalized (removed from the frontier).
    Visit { node: NodeId },
    /// Frontier neighbours of the newly finalized node were examined.
    Explore { examined: Vec<NodeId> },
    /// The run finished; the least-cost tree is complete.
    Complete,
}

/// One immutable snapshot of simulation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub kind: StepKind,
    /// Every node, in graph insertion order, with this step's marks.
    pub nodes: Vec<NodeView>,
    /// Every edge, in graph insertion order, with this step's marks.
    pub edges: Vec<EdgeView>,
    /// The route table as of this step.
    pub table: RouteTable,
    /// Human-readable narration of what happened.
    pub description: String,
}

impl StepRecord {
    /// The mark on `node` in this step, if the node exists.
    pub fn node_mark(&self, node: NodeId) -> Option<NodeMark> {
        self.nodes.iter().find(|v| v.id == node).map(|v| v.mark)
    }

    /// The mark on `edge` in this step, if the edge exists.
    pub fn edge_mark(&self, edge: EdgeId) -> Option<EdgeMark> {
        self.edges.iter().find(|v| v.id == edge).map(|v| v.mark)
    }
}
