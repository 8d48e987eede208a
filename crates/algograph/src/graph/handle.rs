//! Caller-visible node and edge references.
//!
//! A [`NodeHandle`] names a slot in the graph's slot arena plus the generation the slot had when
//! the node was created. Removing the node bumps the generation, so an old handle can never alias a
//! node that later reuses the slot.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_GRAPH_ID: AtomicU32 = AtomicU32::new(1);

pub(in crate::graph) fn next_graph_id() -> u32 {
    NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle {
    pub(in crate::graph) graph: u32,
    pub(in crate::graph) slot: u32,
    pub(in crate::graph) generation: u32,
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}#{}", self.slot, self.generation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: NodeHandle,
    pub to: NodeHandle,
    pub weight: i64,
}

impl Edge {
    pub fn new(from: NodeHandle, to: NodeHandle, weight: i64) -> Self {
        Self { from, to, weight }
    }

    /// Whether this edge joins `a` and `b`, ignoring direction.
    pub fn joins(&self, a: NodeHandle, b: NodeHandle) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}
