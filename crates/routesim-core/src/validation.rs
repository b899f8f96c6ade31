//! Determinism tooling: run hashing and run-to-run comparison.
//!
//! The simulator promises byte-for-byte reproducible output for identical
//! inputs. These utilities make that promise cheap to check: [`run_hash`]
//! folds the semantic content of a step sequence into a single value, and
//! [`compare_runs`] reports where two sequences first diverge.

use crate::id::{EdgeId, NodeId};
use crate::step::{EdgeMark, NodeMark, StepKind, StepRecord};
use slotmap::Key;

// ---------------------------------------------------------------------------
// RunHash
// ---------------------------------------------------------------------------

/// A deterministic hash over simulation output. FNV-1a (64-bit), chosen for
/// speed and simplicity. Not cryptographic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunHash(u64);

impl RunHash {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    /// Start a new hash.
    pub fn new() -> Self {
        Self(Self::FNV_OFFSET)
    }

    /// Feed bytes into the hash.
    pub fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(Self::FNV_PRIME);
        }
    }

    /// Feed a u64 into the hash.
    pub fn write_u64(&mut self, v: u64) {
        self.write(&v.to_le_bytes());
    }

    /// Feed a string into the hash, length-prefixed so adjacent strings
    /// cannot alias.
    pub fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write(s.as_bytes());
    }

    /// Feed a node id into the hash.
    pub fn write_node(&mut self, id: NodeId) {
        self.write_u64(id.data().as_ffi());
    }

    /// Feed an edge id into the hash.
    pub fn write_edge(&mut self, id: EdgeId) {
        self.write_u64(id.data().as_ffi());
    }

    /// Finalize and return the hash value.
    pub fn finish(self) -> u64 {
        self.0
    }
}

impl Default for RunHash {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash the semantic content of a step sequence: kinds, marks, tables, and
/// narrations. Equal runs hash equal; diverging runs hash differently with
/// overwhelming probability.
pub fn run_hash(steps: &[StepRecord]) -> u64 {
    let mut h = RunHash::new();
    h.write_u64(steps.len() as u64);
    for step in steps {
        match &step.kind {
            StepKind::Visit { node } => {
                h.write_u64(0);
                h.write_node(*node);
            }
            StepKind::Explore { examined } => {
                h.write_u64(1);
                h.write_u64(examined.len() as u64);
                for &n in examined {
                    h.write_node(n);
                }
            }
            StepKind::Complete => h.write_u64(2),
        }
        h.write_str(&step.description);
        for node in &step.nodes {
            h.write_node(node.id);
            h.write_str(&node.label);
            h.write_u64(node_mark_tag(node.mark));
        }
        for edge in &step.edges {
            h.write_edge(edge.id);
            h.write_node(edge.from);
            h.write_node(edge.to);
            h.write_u64(edge.weight);
            match edge.mark {
                EdgeMark::Neutral => h.write_u64(0),
                EdgeMark::Tree { toward } => {
                    h.write_u64(1);
                    h.write_node(toward);
                }
                EdgeMark::JustExamined => h.write_u64(2),
            }
        }
        for column in &step.table.columns {
            h.write_str(column);
        }
        for row in &step.table.rows {
            h.write_str(&row.traversed);
            h.write_u64(row.traversed_highlighted as u64);
            for cell in &row.cells {
                h.write_str(&cell.route);
                match cell.distance {
                    Some(d) => {
                        h.write_u64(1);
                        h.write_u64(d);
                    }
                    None => h.write_u64(0),
                }
                h.write_u64(cell.highlighted as u64);
            }
        }
    }
    h.finish()
}

fn node_mark_tag(mark: NodeMark) -> u64 {
    match mark {
        NodeMark::Neutral => 0,
        NodeMark::Finalized => 1,
        NodeMark::JustFinalized => 2,
        NodeMark::JustExamined => 3,
    }
}

// ---------------------------------------------------------------------------
// Run comparison
// ---------------------------------------------------------------------------

/// Where two runs first diverge.
#[derive(Debug, Clone)]
pub struct StepDivergence {
    /// Index of the first step that differs (or the shorter run's length
    /// when one run is a prefix of the other).
    pub step_index: usize,
    /// Which parts of the step differ.
    pub detail: String,
}

/// The result of comparing two runs.
#[derive(Debug, Clone)]
pub struct RunDiff {
    pub is_identical: bool,
    pub first_divergence: Option<StepDivergence>,
}

/// Compare two step sequences and report the first divergence.
pub fn compare_runs(a: &[StepRecord], b: &[StepRecord]) -> RunDiff {
    for (i, (sa, sb)) in a.iter().zip(b.iter()).enumerate() {
        let mut mismatches = Vec::new();
        if sa.kind != sb.kind {
            mismatches.push("kind");
        }
        if sa.description != sb.description {
            mismatches.push("description");
        }
        if sa.nodes != sb.nodes {
            mismatches.push("nodes");
        }
        if sa.edges != sb.edges {
            mismatches.push("edges");
        }
        if sa.table != sb.table {
            mismatches.push("table");
        }
        if !mismatches.is_empty() {
            return RunDiff {
                is_identical: false,
                first_divergence: Some(StepDivergence {
                    step_index: i,
                    detail: mismatches.join(", "),
                }),
            };
        }
    }
    if a.len() != b.len() {
        return RunDiff {
            is_identical: false,
            first_divergence: Some(StepDivergence {
                step_index: a.len().min(b.len()),
                detail: format!("step count differs: {} vs {}", a.len(), b.len()),
            }),
        };
    }
    RunDiff {
        is_identical: true,
        first_divergence: None,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
