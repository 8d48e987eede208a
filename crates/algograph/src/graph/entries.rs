//! Internal storage entries for [`Graph`](super::Graph).

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

/// Neighbor table position -> edge weight, in connection order.
pub(crate) type EdgeMap = IndexMap<usize, i64, FxBuildHasher>;

#[derive(Debug, Clone)]
pub(in crate::graph) struct NodeEntry<N> {
    pub(in crate::graph) slot: u32,
    pub(in crate::graph) label: N,
    pub(in crate::graph) out: EdgeMap,
}

impl<N> NodeEntry<N> {
    pub(in crate::graph) fn new(slot: u32, label: N) -> Self {
        Self {
            slot,
            label,
            out: EdgeMap::default(),
        }
    }
}

/// One arena slot. `position` is `None` while the slot sits on the free list.
#[derive(Debug, Clone, Copy)]
pub(in crate::graph) struct Slot {
    pub(in crate::graph) generation: u32,
    pub(in crate::graph) position: Option<usize>,
}
