//! Routesim Core -- the step-recording engine behind the link-state routing
//! teaching tool.
//!
//! This crate provides the network graph model and the simulator that runs
//! Dijkstra's single-source shortest-path algorithm over it, recording an
//! immutable, replayable sequence of step snapshots for a viewer to page
//! through.
//!
//! # Simulation Shape
//!
//! One call to [`simulate::simulate`] executes the whole run synchronously:
//! it snapshots the graph (validating every distance label up front), then
//! per iteration finalizes the closest frontier node and relaxes its
//! neighbours, emitting a *visit* step and, when neighbours were examined,
//! an *explore* step, and closes with a single *complete* step. The caller
//! receives the ordered step list and owns all navigation; the engine holds
//! no state between calls.
//!
//! # Key Types
//!
//! - [`graph::NetworkGraph`] -- nodes with display labels and undirected
//!   weighted links, iterated strictly in insertion order (the documented
//!   tie-break order for the frontier).
//! - [`step::StepRecord`] -- one self-contained snapshot: marked node/edge
//!   copies, the route table, and a narration.
//! - [`step::NodeMark`] / [`step::EdgeMark`] -- semantic annotations
//!   (`JustFinalized`, `Tree`, ...) that the presentation layer maps to
//!   styling.
//! - [`table::RouteTable`] -- per-node best routes and distances, one row
//!   per finished iteration.
//! - [`validation`] -- run hashing and run-to-run divergence diffs for
//!   determinism checks.

pub mod graph;
pub mod id;
pub mod simulate;
pub mod step;
pub mod table;
pub mod validation;

#[cfg(feature = "data-loader")]
pub mod data_loader;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
