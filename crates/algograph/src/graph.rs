//! Handle-addressed adjacency-list graph store.
//!
//! Nodes live in a compact table; a node's table position is its index, and every algorithm
//! works on those indices. Callers never see indices directly: they hold [`NodeHandle`]s, which
//! resolve through a slot arena in O(1) and stay valid while other nodes are removed and the table
//! is compacted. Edges are stored per node as an insertion-ordered map from neighbor index to
//! weight, so re-connecting a pair updates the weight in place.

mod adj_cache;
mod entries;
mod handle;
mod options;

use adj_cache::TransposeCache;
use entries::{NodeEntry, Slot};
use std::cell::RefCell;
use std::fmt;

pub(crate) use entries::EdgeMap;
pub use handle::{Edge, NodeHandle};
pub use options::GraphKind;

use crate::error::{Error, Result};

pub struct Graph<N = ()> {
    id: u32,
    kind: GraphKind,

    nodes: Vec<NodeEntry<N>>,
    slots: Vec<Slot>,
    free_slots: Vec<u32>,
    edge_count: usize,

    // Bumped on every mutation. The transpose cache is only trusted when its generation matches.
    generation: u64,
    transpose_cache: RefCell<Option<TransposeCache>>,
}

impl<N> Graph<N> {
    pub fn new(kind: GraphKind) -> Self {
        Self {
            id: handle::next_graph_id(),
            kind,
            nodes: Vec::new(),
            slots: Vec::new(),
            free_slots: Vec::new(),
            edge_count: 0,
            generation: 0,
            transpose_cache: RefCell::new(None),
        }
    }

    pub fn directed() -> Self {
        Self::new(GraphKind::Directed)
    }

    pub fn undirected() -> Self {
        Self::new(GraphKind::Undirected)
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn is_directed(&self) -> bool {
        self.kind.is_directed()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored edges. Undirected edges are counted once.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        *self.transpose_cache.get_mut() = None;
    }

    /// Resolves a handle to its current table position.
    pub(crate) fn resolve(&self, handle: NodeHandle) -> Result<usize> {
        let invalid = || Error::InvalidHandle { handle };
        if handle.graph != self.id {
            return Err(invalid());
        }
        let slot = self.slots.get(handle.slot as usize).ok_or_else(invalid)?;
        if slot.generation != handle.generation {
            return Err(invalid());
        }
        slot.position.ok_or_else(invalid)
    }

    /// Handle for the node currently at table position `ix`.
    pub(crate) fn handle_for(&self, ix: usize) -> NodeHandle {
        let slot = self.nodes[ix].slot;
        NodeHandle {
            graph: self.id,
            slot,
            generation: self.slots[slot as usize].generation,
        }
    }

    pub(crate) fn out_map(&self, ix: usize) -> &EdgeMap {
        &self.nodes[ix].out
    }

    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Current position of the node in the node table.
    pub fn index_of(&self, handle: NodeHandle) -> Result<usize> {
        self.resolve(handle)
    }

    pub fn handle_at(&self, index: usize) -> Option<NodeHandle> {
        (index < self.nodes.len()).then(|| self.handle_for(index))
    }

    /// Handles of every node, in table order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeHandle> + '_ {
        (0..self.nodes.len()).map(|ix| self.handle_for(ix))
    }

    pub fn make_node(&mut self) -> NodeHandle
    where
        N: Default,
    {
        self.make_node_with(N::default())
    }

    pub fn make_node_with(&mut self, label: N) -> NodeHandle {
        let position = self.nodes.len();
        let slot = match self.free_slots.pop() {
            Some(slot) => {
                self.slots[slot as usize].position = Some(position);
                slot
            }
            None => {
                let slot = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    position: Some(position),
                });
                slot
            }
        };
        self.nodes.push(NodeEntry::new(slot, label));
        self.invalidate();
        self.handle_for(position)
    }

    pub fn node(&self, handle: NodeHandle) -> Result<&N> {
        let ix = self.resolve(handle)?;
        Ok(&self.nodes[ix].label)
    }

    pub fn node_mut(&mut self, handle: NodeHandle) -> Result<&mut N> {
        let ix = self.resolve(handle)?;
        Ok(&mut self.nodes[ix].label)
    }

    /// Connects `from` to `to` with weight 0.
    pub fn connect(&mut self, from: NodeHandle, to: NodeHandle) -> Result<()> {
        self.connect_weight(from, to, 0)
    }

    /// Connects `from` to `to`, or updates the weight if the edge already exists.
    ///
    /// Undirected graphs store the edge on both endpoints with the same weight.
    pub fn connect_weight(&mut self, from: NodeHandle, to: NodeHandle, weight: i64) -> Result<()> {
        let v_ix = self.resolve(from)?;
        let w_ix = self.resolve(to)?;

        let previous = self.nodes[v_ix].out.insert(w_ix, weight);
        if !self.is_directed() && v_ix != w_ix {
            self.nodes[w_ix].out.insert(v_ix, weight);
        }
        if previous.is_none() {
            self.edge_count += 1;
        }
        self.invalidate();
        Ok(())
    }

    /// Removes the edge between `from` and `to`. Returns whether an edge was removed.
    pub fn remove_edge(&mut self, from: NodeHandle, to: NodeHandle) -> Result<bool> {
        let v_ix = self.resolve(from)?;
        let w_ix = self.resolve(to)?;

        let removed = self.nodes[v_ix].out.shift_remove(&w_ix).is_some();
        if !removed {
            return Ok(false);
        }
        if !self.is_directed() && v_ix != w_ix {
            self.nodes[w_ix].out.shift_remove(&v_ix);
        }
        self.edge_count -= 1;
        self.invalidate();
        Ok(true)
    }

    /// Removes a node and every edge incident to it, returning its label.
    ///
    /// Nodes after it in the table move down one position. Their handles stay valid; the removed
    /// handle (and any copy of it) is rejected from now on. O(V + E).
    pub fn remove_node(&mut self, handle: NodeHandle) -> Result<N> {
        let ix = self.resolve(handle)?;

        let entry = self.nodes.remove(ix);
        let mut removed_edges = entry.out.len();

        let directed = self.is_directed();
        for node in &mut self.nodes {
            // An undirected mirror was already counted through the removed node's own map.
            if node.out.shift_remove(&ix).is_some() && directed {
                removed_edges += 1;
            }
            if node.out.keys().any(|&k| k > ix) {
                node.out = node
                    .out
                    .drain(..)
                    .map(|(k, w)| (if k > ix { k - 1 } else { k }, w))
                    .collect();
            }
        }

        for (position, node) in self.nodes.iter().enumerate().skip(ix) {
            self.slots[node.slot as usize].position = Some(position);
        }

        let slot = &mut self.slots[entry.slot as usize];
        slot.position = None;
        // A slot whose generation cannot advance is retired so no stale handle matches it again.
        if let Some(next) = slot.generation.checked_add(1) {
            slot.generation = next;
            self.free_slots.push(entry.slot);
        }

        self.edge_count -= removed_edges;
        self.invalidate();
        tracing::debug!(
            index = ix,
            removed_edges,
            remaining = self.nodes.len(),
            "removed node"
        );
        Ok(entry.label)
    }

    /// Snapshot of the nodes `handle` has an edge to.
    pub fn neighbors(&self, handle: NodeHandle) -> Result<Vec<NodeHandle>> {
        let ix = self.resolve(handle)?;
        Ok(self.nodes[ix]
            .out
            .keys()
            .map(|&w_ix| self.handle_for(w_ix))
            .collect())
    }

    /// Snapshot of the nodes with an edge to `handle`.
    pub fn predecessors(&self, handle: NodeHandle) -> Result<Vec<NodeHandle>> {
        let ix = self.resolve(handle)?;
        let mut out = Vec::new();
        self.for_each_incoming(ix, |v_ix, _| out.push(self.handle_for(v_ix)));
        Ok(out)
    }

    pub fn out_edges(&self, handle: NodeHandle) -> Result<Vec<Edge>> {
        let ix = self.resolve(handle)?;
        Ok(self.nodes[ix]
            .out
            .iter()
            .map(|(&w_ix, &weight)| Edge::new(handle, self.handle_for(w_ix), weight))
            .collect())
    }

    pub fn has_edge(&self, from: NodeHandle, to: NodeHandle) -> Result<bool> {
        Ok(self.edge_weight(from, to)?.is_some())
    }

    pub fn edge_weight(&self, from: NodeHandle, to: NodeHandle) -> Result<Option<i64>> {
        let v_ix = self.resolve(from)?;
        let w_ix = self.resolve(to)?;
        Ok(self.nodes[v_ix].out.get(&w_ix).copied())
    }

    /// Every stored edge. Undirected edges appear once, from the lower index to the higher one.
    pub fn edges(&self) -> Vec<Edge> {
        let mut out = Vec::with_capacity(self.edge_count);
        for (v_ix, node) in self.nodes.iter().enumerate() {
            for (&w_ix, &weight) in &node.out {
                if !self.is_directed() && w_ix < v_ix {
                    continue;
                }
                out.push(Edge::new(
                    self.handle_for(v_ix),
                    self.handle_for(w_ix),
                    weight,
                ));
            }
        }
        out
    }

    /// Calls `f(v, weight)` for every edge `v -> w_ix`.
    pub(crate) fn for_each_incoming<F>(&self, w_ix: usize, mut f: F)
    where
        F: FnMut(usize, i64),
    {
        if !self.is_directed() {
            for (&v_ix, &weight) in &self.nodes[w_ix].out {
                f(v_ix, weight);
            }
            return;
        }

        {
            let mut cache = self.transpose_cache.borrow_mut();
            let stale = cache
                .as_ref()
                .map(|c| c.generation != self.generation)
                .unwrap_or(true);
            if stale {
                *cache = Some(TransposeCache::build(self.generation, &self.nodes));
            }
        }

        let cache = self.transpose_cache.borrow();
        let Some(cache) = cache.as_ref() else {
            debug_assert!(false, "transpose cache missing after rebuild");
            return;
        };
        for &(v_ix, weight) in cache.incoming(w_ix) {
            f(v_ix, weight);
        }
    }

    /// A directed copy with every edge reversed. Undirected graphs are copied as-is.
    ///
    /// The copy is a separate graph: handles of `self` do not resolve in it. Use
    /// [`Graph::handle_at`] with [`Graph::index_of`] to translate, since positions are preserved.
    pub fn transpose(&self) -> Graph<N>
    where
        N: Clone,
    {
        let mut reversed = Graph::new(self.kind);
        for node in &self.nodes {
            reversed.make_node_with(node.label.clone());
        }
        for (v_ix, node) in self.nodes.iter().enumerate() {
            for (&w_ix, &weight) in &node.out {
                let (from, to) = if self.is_directed() {
                    (w_ix, v_ix)
                } else {
                    (v_ix, w_ix)
                };
                reversed.nodes[from].out.insert(to, weight);
            }
        }
        reversed.edge_count = self.edge_count;
        reversed.invalidate();
        reversed
    }
}

impl<N> Default for Graph<N> {
    fn default() -> Self {
        Self::new(GraphKind::default())
    }
}

impl<N> fmt::Debug for Graph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("kind", &self.kind)
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edge_count)
            .finish()
    }
}

impl<N> fmt::Display for Graph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "g->{{")?;
        for (v_ix, node) in self.nodes.iter().enumerate() {
            write!(f, "\t{v_ix}->{{")?;
            for w_ix in node.out.keys() {
                write!(f, "{w_ix},")?;
            }
            writeln!(f, "}}")?;
        }
        write!(f, "}}")
    }
}
