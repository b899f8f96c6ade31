//! The default sample network shown when a fresh session opens.
//!
//! Six routers with the classic link weights; running the algorithm from B
//! yields distances B=0, E=1, F=3, C=5, D=7, A=15.

use routesim_core::data_loader::{DataLoadError, load_network};
use routesim_core::graph::NetworkGraph;

const SAMPLE_JSON: &str = r#"{
    "nodes": [
        {"label": "A"}, {"label": "B"}, {"label": "C"},
        {"label": "D"}, {"label": "E"}, {"label": "F"}
    ],
    "edges": [
        {"from": "A", "to": "D", "distance": 9},
        {"from": "A", "to": "F", "distance": 12},
        {"from": "B", "to": "C", "distance": 5},
        {"from": "B", "to": "E", "distance": 1},
        {"from": "B", "to": "F", "distance": 4},
        {"from": "C", "to": "F", "distance": 10},
        {"from": "D", "to": "E", "distance": 6},
        {"from": "E", "to": "F", "distance": 2}
    ]
}"#;

/// Build the default six-node sample network.
pub fn sample_network() -> Result<NetworkGraph, DataLoadError> {
    load_network(SAMPLE_JSON)
}
