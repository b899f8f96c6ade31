//! The network graph: nodes with display labels and undirected weighted
//! links, with explicit insertion-order iteration.
//!
//! Iteration order is part of this type's contract. [`NetworkGraph::nodes`]
//! and [`NetworkGraph::edges`] yield elements in insertion order, and removal
//! preserves the relative order of the survivors. The simulator's frontier
//! tie-break and its table column/row layout are defined in terms of this
//! order, so it must stay deterministic.

use crate::id::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),
    #[error("edge not found: {0:?}")]
    EdgeNotFound(EdgeId),
}

// ---------------------------------------------------------------------------
// Core data structures
// ---------------------------------------------------------------------------

/// Per-node data stored in the network graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    /// User-editable display label.
    pub label: String,
}

/// Per-edge data stored in the network graph.
///
/// Edges are undirected; `from`/`to` only record which endpoint was named
/// first when the edge was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeData {
    /// First endpoint.
    pub from: NodeId,
    /// Second endpoint.
    pub to: NodeId,
    /// User-editable distance label. Parsed by [`parse_weight`] when a
    /// simulation starts.
    pub label: String,
}

impl EdgeData {
    /// Whether this edge has `node` as an endpoint.
    pub fn touches(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }

    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint
    /// or the edge is a self-loop.
    pub fn other_endpoint(&self, node: NodeId) -> Option<NodeId> {
        if self.from == self.to {
            None
        } else if self.from == node {
            Some(self.to)
        } else if self.to == node {
            Some(self.from)
        } else {
            None
        }
    }

    /// Whether this edge connects `a` and `b`, in either orientation.
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

/// Parse a distance label into a weight.
///
/// Accepts a base-10 non-negative integer, surrounded by optional whitespace.
/// Anything else (empty, signs, fractions, trailing text, values beyond
/// `u64::MAX`) is unparseable and yields `None`.
pub fn parse_weight(label: &str) -> Option<u64> {
    let trimmed = label.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

// ---------------------------------------------------------------------------
// NetworkGraph
// ---------------------------------------------------------------------------

/// The user-built network: nodes and undirected weighted links.
///
/// Storage follows the slotmap pattern: element data lives in `SlotMap`s and
/// the insertion order is tracked in explicit vectors, since `SlotMap`
/// iteration order is unspecified after removals. Parallel edges between the
/// same endpoint pair are representable and independently addressable; the
/// session layer is the place that refuses to create them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkGraph {
    nodes: SlotMap<NodeId, NodeData>,
    edges: SlotMap<EdgeId, EdgeData>,
    /// Node ids in insertion order.
    node_order: Vec<NodeId>,
    /// Edge ids in insertion order.
    edge_order: Vec<EdgeId>,
}

impl NetworkGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // -- Mutation --

    /// Add a node with the given display label.
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeId {
        let id = self.nodes.insert(NodeData {
            label: label.into(),
        });
        self.node_order.push(id);
        id
    }

    /// Add an undirected link between two existing nodes.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        label: impl Into<String>,
    ) -> Result<EdgeId, GraphError> {
        if !self.nodes.contains_key(from) {
            return Err(GraphError::NodeNotFound(from));
        }
        if !self.nodes.contains_key(to) {
            return Err(GraphError::NodeNotFound(to));
        }
        let id = self.edges.insert(EdgeData {
            from,
            to,
            label: label.into(),
        });
        self.edge_order.push(id);
        Ok(id)
    }

    /// Remove a node and every edge touching it.
    pub fn remove_node(&mut self, node: NodeId) -> Result<(), GraphError> {
        if self.nodes.remove(node).is_none() {
            return Err(GraphError::NodeNotFound(node));
        }
        self.node_order.retain(|&n| n != node);
        let edges = &mut self.edges;
        self.edge_order.retain(|&e| {
            if edges[e].touches(node) {
                edges.remove(e);
                false
            } else {
                true
            }
        });
        Ok(())
    }

    /// Remove a single edge.
    pub fn remove_edge(&mut self, edge: EdgeId) -> Result<(), GraphError> {
        if self.edges.remove(edge).is_none() {
            return Err(GraphError::EdgeNotFound(edge));
        }
        self.edge_order.retain(|&e| e != edge);
        Ok(())
    }

    /// Replace a node's display label.
    pub fn set_node_label(
        &mut self,
        node: NodeId,
        label: impl Into<String>,
    ) -> Result<(), GraphError> {
        let data = self
            .nodes
            .get_mut(node)
            .ok_or(GraphError::NodeNotFound(node))?;
        data.label = label.into();
        Ok(())
    }

    /// Replace an edge's distance label.
    pub fn set_edge_label(
        &mut self,
        edge: EdgeId,
        label: impl Into<String>,
    ) -> Result<(), GraphError> {
        let data = self
            .edges
            .get_mut(edge)
            .ok_or(GraphError::EdgeNotFound(edge))?;
        data.label = label.into();
        Ok(())
    }

    // -- Lookup --

    /// Node data by id.
    pub fn node(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node)
    }

    /// Edge data by id.
    pub fn edge(&self, edge: EdgeId) -> Option<&EdgeData> {
        self.edges.get(edge)
    }

    /// Whether the graph contains `node`.
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    /// Whether the graph contains `edge`.
    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        self.edges.contains_key(edge)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.node_order.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edge_order.len()
    }

    // -- Ordered iteration --

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.node_order.iter().map(|&id| (id, &self.nodes[id]))
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeData)> {
        self.edge_order.iter().map(|&id| (id, &self.edges[id]))
    }

    /// Edges touching `node`, in insertion order.
    pub fn edges_touching(&self, node: NodeId) -> impl Iterator<Item = (EdgeId, &EdgeData)> {
        self.edges().filter(move |(_, e)| e.touches(node))
    }

    /// The first edge connecting `a` and `b` in either orientation, if any.
    /// Used by the session layer for duplicate-link detection.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.edges()
            .find(|(_, e)| e.connects(a, b))
            .map(|(id, _)| id)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> (NetworkGraph, NodeId, NodeId, NodeId) {
        let mut g = NetworkGraph::new();
        let a = g.add_node("A");
        let b = g.add_node("B");
        let c = g.add_node("C");
        (g, a, b, c)
    }

    #[test]
    fn nodes_iterate_in_insertion_order() {
        let (g, a, b, c) = abc();
        let order: Vec<NodeId> = g.nodes().map(|(id, _)| id).collect();
        assert_eq!(order, vec![a, b, c]);
    }

    #[test]
    fn insertion_order_survives_removal() {
        let (mut g, a, b, c) = abc();
        let d = g.add_node("D");
        g.remove_node(b).unwrap();
        let order: Vec<NodeId> = g.nodes().map(|(id, _)| id).collect();
        assert_eq!(order, vec![a, c, d]);
    }

    #[test]
    fn add_edge_requires_existing_endpoints() {
        let (mut g, a, b, _) = abc();
        let mut other = NetworkGraph::new();
        let foreign = other.add_node("X");

        assert!(g.add_edge(a, b, "3").is_ok());
        assert!(matches!(
            g.add_edge(a, foreign, "3"),
            Err(GraphError::NodeNotFound(_))
        ));
    }

    #[test]
    fn remove_node_cascades_to_edges() {
        let (mut g, a, b, c) = abc();
        let ab = g.add_edge(a, b, "1").unwrap();
        let bc = g.add_edge(b, c, "2").unwrap();
        let ac = g.add_edge(a, c, "3").unwrap();

        g.remove_node(b).unwrap();

        assert!(!g.contains_edge(ab));
        assert!(!g.contains_edge(bc));
        assert!(g.contains_edge(ac));
        let order: Vec<EdgeId> = g.edges().map(|(id, _)| id).collect();
        assert_eq!(order, vec![ac]);
    }

    #[test]
    fn edge_between_matches_either_orientation() {
        let (mut g, a, b, c) = abc();
        let ab = g.add_edge(a, b, "1").unwrap();
        assert_eq!(g.edge_between(a, b), Some(ab));
        assert_eq!(g.edge_between(b, a), Some(ab));
        assert_eq!(g.edge_between(a, c), None);
    }

    #[test]
    fn parallel_edges_are_independently_addressable() {
        let (mut g, a, b, _) = abc();
        let e1 = g.add_edge(a, b, "1").unwrap();
        let e2 = g.add_edge(a, b, "7").unwrap();
        assert_ne!(e1, e2);
        assert_eq!(g.edge_count(), 2);
        g.remove_edge(e1).unwrap();
        assert!(g.contains_edge(e2));
    }

    #[test]
    fn other_endpoint_handles_self_loops() {
        let (mut g, a, b, _) = abc();
        let loop_edge = g.add_edge(a, a, "1").unwrap();
        let ab = g.add_edge(a, b, "1").unwrap();
        assert_eq!(g.edge(loop_edge).unwrap().other_endpoint(a), None);
        assert_eq!(g.edge(ab).unwrap().other_endpoint(a), Some(b));
        assert_eq!(g.edge(ab).unwrap().other_endpoint(b), Some(a));
    }

    #[test]
    fn parse_weight_accepts_plain_integers() {
        assert_eq!(parse_weight("0"), Some(0));
        assert_eq!(parse_weight("12"), Some(12));
        assert_eq!(parse_weight(" 7 "), Some(7));
    }

    #[test]
    fn parse_weight_rejects_everything_else() {
        assert_eq!(parse_weight(""), None);
        assert_eq!(parse_weight("  "), None);
        assert_eq!(parse_weight("-3"), None);
        assert_eq!(parse_weight("+3"), None);
        assert_eq!(parse_weight("3.5"), None);
        assert_eq!(parse_weight("12x"), None);
        assert_eq!(parse_weight("x12"), None);
        // One past u64::MAX.
        assert_eq!(parse_weight("18446744073709551616"), None);
    }
}
