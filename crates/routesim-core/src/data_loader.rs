//! Data-driven network loading from JSON.
//!
//! Feature-gated behind `data-loader`. Provides JSON deserialization into
//! [`NetworkGraph`] for sample networks defined in data files. Edges
//! reference nodes by label; labels must be unique within a description.

use crate::graph::{GraphError, NetworkGraph};
use crate::id::NodeId;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during network loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("duplicate node label: {0}")]
    DuplicateLabel(String),
    #[error("unknown node reference: {0}")]
    UnknownNodeRef(String),
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

// ---------------------------------------------------------------------------
// JSON data structures
// ---------------------------------------------------------------------------

/// Top-level network description for JSON deserialization.
#[derive(Debug, serde::Deserialize)]
pub struct NetworkData {
    #[serde(default)]
    pub nodes: Vec<NetworkNodeData>,
    #[serde(default)]
    pub edges: Vec<NetworkEdgeData>,
}

/// JSON representation of a node.
#[derive(Debug, serde::Deserialize)]
pub struct NetworkNodeData {
    pub label: String,
}

/// JSON representation of a link. Endpoints reference nodes by label.
#[derive(Debug, serde::Deserialize)]
pub struct NetworkEdgeData {
    pub from: String,
    pub to: String,
    pub distance: u64,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parse a JSON network description and build the graph, preserving the
/// description's node and edge order.
pub fn load_network(json: &str) -> Result<NetworkGraph, DataLoadError> {
    let data: NetworkData = serde_json::from_str(json)?;
    build_network(&data)
}

/// Build a graph from an already-parsed description.
pub fn build_network(data: &NetworkData) -> Result<NetworkGraph, DataLoadError> {
    let mut graph = NetworkGraph::new();
    let mut by_label: HashMap<&str, NodeId> = HashMap::new();

    for node in &data.nodes {
        if by_label.contains_key(node.label.as_str()) {
            return Err(DataLoadError::DuplicateLabel(node.label.clone()));
        }
        let id = graph.add_node(node.label.clone());
        by_label.insert(node.label.as_str(), id);
    }

    for edge in &data.edges {
        let from = *by_label
            .get(edge.from.as_str())
            .ok_or_else(|| DataLoadError::UnknownNodeRef(edge.from.clone()))?;
        let to = *by_label
            .get(edge.to.as_str())
            .ok_or_else(|| DataLoadError::UnknownNodeRef(edge.to.clone()))?;
        graph.add_edge(from, to, edge.distance.to_string())?;
    }

    Ok(graph)
}

// ===========================================================================
// Tests
// ===========================================================================
