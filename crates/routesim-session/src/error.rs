use routesim_core::graph::GraphError;
use routesim_core::id::{EdgeId, NodeId};
use routesim_core::simulate::SimulateError;

/// Errors surfaced by the interactive session.
///
/// The `Display` text of each variant is the user-visible notice the viewer
/// shows when the operation is rejected.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A graph edit was attempted while a simulation is active.
    #[error("cannot edit the network while a simulation is active")]
    SimulationActive,

    /// `start` was called while a simulation is already active.
    #[error("a simulation is already active")]
    AlreadyRunning,

    /// A navigation or query call was made with no active simulation.
    #[error("no simulation is currently active")]
    NoSimulation,

    /// A link between these nodes already exists, in either orientation.
    #[error("a link between {a:?} and {b:?} already exists")]
    DuplicateLink { a: NodeId, b: NodeId },

    /// Both ends of the requested link are the same node.
    #[error("a link must connect two different nodes")]
    SelfLink,

    /// A distance label contained something other than digits.
    #[error("link distances may only contain digits, got {label:?}")]
    InvalidDistance { label: String },

    /// A link has no distance label yet, so the simulation cannot start.
    #[error("every link needs a distance before the simulation can start")]
    MissingDistance { edge: EdgeId },

    /// A step index outside the recorded sequence.
    #[error("step index {index} out of range (run has {len} steps)")]
    StepOutOfRange { index: usize, len: usize },

    /// An underlying graph operation failed.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The simulator rejected the run.
    #[error(transparent)]
    Simulate(#[from] SimulateError),
}
