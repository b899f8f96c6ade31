//! The interactive session: graph editing with run-time locking, run
//! lifecycle, and step navigation.
//!
//! A [`Session`] is the engine's external collaborator. It owns the network
//! graph and guarantees the engine's input contract: while a simulation is
//! active every edit is rejected (so the recorded steps always describe the
//! graph on screen), every link has a digits-only distance label before a
//! run starts, and the session alone moves the current-step cursor. The
//! engine is invoked exactly once per run; stepping through the result is
//! pure index navigation over the recorded sequence.

use crate::error::SessionError;
use routesim_core::graph::NetworkGraph;
use routesim_core::id::{EdgeId, NodeId};
use routesim_core::simulate::simulate;
use routesim_core::step::StepRecord;

/// State of one active run.
#[derive(Debug)]
struct ActiveRun {
    start: NodeId,
    steps: Vec<StepRecord>,
    current: usize,
}

/// An interactive editing-and-viewing session over one network graph.
#[derive(Debug, Default)]
pub struct Session {
    graph: NetworkGraph,
    run: Option<ActiveRun>,
}

impl Session {
    /// Create a session with an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session around an existing graph.
    pub fn with_network(graph: NetworkGraph) -> Self {
        Self { graph, run: None }
    }

    /// Read access to the graph. Mutation goes through the session methods
    /// so the edit lock can be enforced.
    pub fn graph(&self) -> &NetworkGraph {
        &self.graph
    }

    /// Whether a simulation is currently active.
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    fn ensure_editable(&self) -> Result<(), SessionError> {
        if self.run.is_some() {
            Err(SessionError::SimulationActive)
        } else {
            Ok(())
        }
    }

    // -- Editing --

    /// Add a node. With no label given, nodes are named "Node 1", "Node 2",
    /// ... after the new node count.
    pub fn add_node(&mut self, label: Option<&str>) -> Result<NodeId, SessionError> {
        self.ensure_editable()?;
        let label = match label {
            Some(l) => l.to_string(),
            None => format!("Node {}", self.graph.node_count() + 1),
        };
        Ok(self.graph.add_node(label))
    }

    /// Add a link between two distinct nodes with the default distance "1".
    /// Rejects self-links and duplicates in either orientation.
    pub fn add_link(&mut self, a: NodeId, b: NodeId) -> Result<EdgeId, SessionError> {
        self.ensure_editable()?;
        if a == b {
            return Err(SessionError::SelfLink);
        }
        if self.graph.edge_between(a, b).is_some() {
            return Err(SessionError::DuplicateLink { a, b });
        }
        Ok(self.graph.add_edge(a, b, "1")?)
    }

    /// Remove a node and every link touching it.
    pub fn remove_node(&mut self, node: NodeId) -> Result<(), SessionError> {
        self.ensure_editable()?;
        Ok(self.graph.remove_node(node)?)
    }

    /// Remove a single link.
    pub fn remove_link(&mut self, edge: EdgeId) -> Result<(), SessionError> {
        self.ensure_editable()?;
        Ok(self.graph.remove_edge(edge)?)
    }

    /// Replace a node's display label.
    pub fn rename_node(&mut self, node: NodeId, label: &str) -> Result<(), SessionError> {
        self.ensure_editable()?;
        Ok(self.graph.set_node_label(node, label)?)
    }

    /// Replace a link's distance label. Only digits are accepted; an empty
    /// label is allowed mid-edit but blocks [`Session::start`].
    pub fn set_link_distance(&mut self, edge: EdgeId, label: &str) -> Result<(), SessionError> {
        self.ensure_editable()?;
        if !label.chars().all(|c| c.is_ascii_digit()) {
            return Err(SessionError::InvalidDistance {
                label: label.to_string(),
            });
        }
        Ok(self.graph.set_edge_label(edge, label)?)
    }

    // -- Run lifecycle --

    /// Freeze the graph and run the simulation from `start`. On success the
    /// cursor is positioned on the first step and editing stays locked until
    /// [`Session::stop`].
    pub fn start(&mut self, start: NodeId) -> Result<(), SessionError> {
        if self.run.is_some() {
            return Err(SessionError::AlreadyRunning);
        }
        for (id, edge) in self.graph.edges() {
            if edge.label.trim().is_empty() {
                return Err(SessionError::MissingDistance { edge: id });
            }
        }
        let steps = simulate(&self.graph, start)?;
        self.run = Some(ActiveRun {
            start,
            steps,
            current: 0,
        });
        Ok(())
    }

    /// End the run: the step sequence is discarded and editing unlocks.
    /// A no-op when idle.
    pub fn stop(&mut self) {
        self.run = None;
    }

    /// The starting node of the active run.
    pub fn start_node(&self) -> Result<NodeId, SessionError> {
        Ok(self.active()?.start)
    }

    // -- Step navigation --

    /// Number of recorded steps in the active run.
    pub fn step_count(&self) -> Result<usize, SessionError> {
        Ok(self.active()?.steps.len())
    }

    /// The step the cursor is on.
    pub fn current(&self) -> Result<&StepRecord, SessionError> {
        let run = self.active()?;
        Ok(&run.steps[run.current])
    }

    /// The cursor position.
    pub fn current_index(&self) -> Result<usize, SessionError> {
        Ok(self.active()?.current)
    }

    /// Move one step forward, staying on the last step at the end.
    pub fn next(&mut self) -> Result<&StepRecord, SessionError> {
        let run = self.active_mut()?;
        if run.current + 1 < run.steps.len() {
            run.current += 1;
        }
        Ok(&run.steps[run.current])
    }

    /// Move one step back, staying on the first step at the start.
    pub fn prev(&mut self) -> Result<&StepRecord, SessionError> {
        let run = self.active_mut()?;
        run.current = run.current.saturating_sub(1);
        Ok(&run.steps[run.current])
    }

    /// Jump to an arbitrary step.
    pub fn jump_to(&mut self, index: usize) -> Result<&StepRecord, SessionError> {
        let run = self.active_mut()?;
        if index >= run.steps.len() {
            return Err(SessionError::StepOutOfRange {
                index,
                len: run.steps.len(),
            });
        }
        run.current = index;
        Ok(&run.steps[run.current])
    }

    /// Jump to the first step.
    pub fn first(&mut self) -> Result<&StepRecord, SessionError> {
        self.jump_to(0)
    }

    /// Jump to the final step.
    pub fn last(&mut self) -> Result<&StepRecord, SessionError> {
        let len = self.step_count()?;
        self.jump_to(len - 1)
    }

    fn active(&self) -> Result<&ActiveRun, SessionError> {
        self.run.as_ref().ok_or(SessionError::NoSimulation)
    }

    fn active_mut(&mut self) -> Result<&mut ActiveRun, SessionError> {
        self.run.as_mut().ok_or(SessionError::NoSimulation)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
