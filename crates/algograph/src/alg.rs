//! Graph algorithms.
//!
//! Every algorithm is an inherent method on [`Graph`](crate::Graph). Per-run state (visitation
//! marks, tentative keys, parents, heap positions) lives in vectors indexed by node table position
//! and is dropped when the call returns; nothing is written back into the graph.

mod dijkstra;
mod mincut;
mod prim;
mod scc;
mod topo;

pub use dijkstra::{Distance, Path, ShortestPaths};
pub use mincut::{Cut, MinCutOptions, recommended_trials};
pub use prim::SpanningTree;
pub use topo::postorder;
