//! The route table: per-node best-known routes and distances, one row per
//! algorithm iteration.
//!
//! Cells keep route text and distance as separate fields so viewers can
//! style them independently; the `Display` impls reproduce the classic
//! rendering (`"B→E [1]"`, `"- [∞]"` for an unreached node).

use serde::{Deserialize, Serialize};
use std::fmt;

/// No route known yet.
pub const NO_ROUTE: &str = "-";

/// One table cell: the best-known route and distance for a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteCell {
    /// Node labels along the route, joined by `→`, or [`NO_ROUTE`].
    pub route: String,
    /// Best-known distance; `None` means infinite (unreached).
    pub distance: Option<u64>,
    /// Whether this cell is emphasized in this step.
    pub highlighted: bool,
}

impl fmt::Display for RouteCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.distance {
            Some(d) => write!(f, "{} [{}]", self.route, d),
            None => write!(f, "{} [∞]", self.route),
        }
    }
}

/// One table row, reflecting state after one algorithm iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Labels of finalized nodes so far, comma-joined in traversal order.
    pub traversed: String,
    /// Whether the traversed cell is emphasized in this step.
    pub traversed_highlighted: bool,
    /// One cell per node, in the table's column order.
    pub cells: Vec<RouteCell>,
}

/// The full route table carried by a step record.
///
/// `columns` holds the node labels in graph insertion order so a viewer can
/// render the header without consulting anything beyond the step itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl RouteTable {
    /// Create an empty table with the given column headers.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }
}
