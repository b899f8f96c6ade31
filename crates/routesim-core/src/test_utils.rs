//! Shared test helpers for unit, integration, and property tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available to in-crate tests, `tests/` suites, benchmarks, and
//! downstream crates' tests (via the `test-utils` feature).

use crate::graph::NetworkGraph;
use crate::id::{EdgeId, NodeId};

/// The classic six-node teaching network:
///
/// ```text
/// A-D:9  A-F:12  B-C:5  B-E:1  B-F:4  C-F:10  D-E:6  E-F:2
/// ```
///
/// Running from B yields distances B=0, E=1, F=3, C=5, D=7, A=15.
pub fn classic_network() -> NetworkGraph {
    let mut g = NetworkGraph::new();
    let a = g.add_node("A");
    let b = g.add_node("B");
    let c = g.add_node("C");
    let d = g.add_node("D");
    let e = g.add_node("E");
    let f = g.add_node("F");
    link(&mut g, a, d, 9);
    link(&mut g, a, f, 12);
    link(&mut g, b, c, 5);
    link(&mut g, b, e, 1);
    link(&mut g, b, f, 4);
    link(&mut g, c, f, 10);
    link(&mut g, d, e, 6);
    link(&mut g, e, f, 2);
    g
}

/// Add a link with a numeric weight label.
pub fn link(g: &mut NetworkGraph, a: NodeId, b: NodeId, weight: u64) -> EdgeId {
    g.add_edge(a, b, weight.to_string())
        .expect("link endpoints should exist")
}

/// Look up a node by its display label.
pub fn node_by_label(g: &NetworkGraph, label: &str) -> NodeId {
    g.nodes()
        .find(|(_, data)| data.label == label)
        .map(|(id, _)| id)
        .unwrap_or_else(|| panic!("no node labelled {label:?}"))
}

/// The table column index of the node with the given label.
pub fn column_index(g: &NetworkGraph, label: &str) -> usize {
    g.nodes()
        .position(|(_, data)| data.label == label)
        .unwrap_or_else(|| panic!("no node labelled {label:?}"))
}
