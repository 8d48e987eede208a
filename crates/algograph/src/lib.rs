#![forbid(unsafe_code)]

//! Mutable adjacency-list graph with a handful of classic algorithms.
//!
//! Nodes are addressed through [`NodeHandle`]s that survive the removal of other nodes and are
//! rejected once their own node is removed. On top of the store the crate provides topological sort,
//! Kosaraju SCC, Dijkstra, Prim, and a Karger min-cut estimator that runs independent trials on a
//! bounded worker pool.
//!
//! ```
//! use algograph::{Graph, MinCutOptions};
//!
//! let mut g: Graph = Graph::undirected();
//! let a = g.make_node();
//! let b = g.make_node();
//! let c = g.make_node();
//! g.connect_weight(a, b, 4)?;
//! g.connect_weight(b, c, 1)?;
//! g.connect_weight(a, c, 2)?;
//!
//! assert_eq!(g.minimum_spanning_tree()?.total_weight(), 3);
//! let cut = g.rand_minimum_cut(&MinCutOptions::default().with_seed(1).with_trials(20))?;
//! assert_eq!(cut.size(), 2);
//! # Ok::<(), algograph::Error>(())
//! ```

pub mod alg;
pub mod error;
pub mod graph;
pub mod heap;

pub use alg::{Cut, Distance, MinCutOptions, Path, ShortestPaths, SpanningTree};
pub use error::{Error, Result};
pub use graph::{Edge, Graph, GraphKind, NodeHandle};
