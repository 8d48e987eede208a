//! Reverse adjacency cache used by [`Graph`](super::Graph).
//!
//! Directed graphs only store outgoing edges. SCC and `predecessors` need the incoming side, so
//! it is rebuilt lazily from the forward maps and tagged with the mutation generation it was built
//! for. Any mutation bumps the graph generation, which makes the cached copy stale.

use super::entries::NodeEntry;

#[derive(Debug, Clone)]
pub(in crate::graph) struct TransposeCache {
    pub(in crate::graph) generation: u64,
    /// `incoming[w]` lists `(v, weight)` for every stored edge `v -> w`, in `v` table order.
    pub(in crate::graph) incoming: Vec<Vec<(usize, i64)>>,
}

impl TransposeCache {
    pub(in crate::graph) fn build<N>(generation: u64, nodes: &[NodeEntry<N>]) -> Self {
        let mut incoming: Vec<Vec<(usize, i64)>> = vec![Vec::new(); nodes.len()];
        for (v_ix, node) in nodes.iter().enumerate() {
            for (&w_ix, &weight) in &node.out {
                incoming[w_ix].push((v_ix, weight));
            }
        }
        Self {
            generation,
            incoming,
        }
    }

    pub(in crate::graph) fn incoming(&self, w_ix: usize) -> &[(usize, i64)] {
        &self.incoming[w_ix]
    }
}
