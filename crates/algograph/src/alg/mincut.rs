//! Randomized global minimum cut (Karger contraction).
//!
//! One trial shuffles a private copy of the edge list and contracts edges in that order until two
//! supernodes remain. A trial finds a true minimum cut with probability at least 2 / (n(n-1)), so
//! the engine runs many independent trials, optionally on a bounded worker pool, and keeps the
//! smallest cut seen. The base edge list is shared read-only; the best-so-far record is the only
//! shared mutable state and sits behind a mutex.

use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, NodeHandle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone)]
pub struct MinCutOptions {
    /// Number of independent trials. `None` uses [`recommended_trials`] for the node count.
    pub trials: Option<usize>,
    /// Maximum trials running at once. `0` and `1` run every trial on the calling thread.
    pub concurrency: usize,
    /// Base seed; trial `i` is seeded with `seed + i`. `None` draws a seed from OS entropy.
    pub seed: Option<u64>,
}

impl Default for MinCutOptions {
    fn default() -> Self {
        Self {
            trials: None,
            concurrency: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            seed: None,
        }
    }
}

impl MinCutOptions {
    /// Defaults overlaid with `ALGOGRAPH_MINCUT_TRIALS`, `ALGOGRAPH_MINCUT_CONCURRENCY` and
    /// `ALGOGRAPH_MINCUT_SEED`. Values that fail to parse are ignored.
    pub fn from_env() -> Self {
        fn var<T: std::str::FromStr>(name: &str) -> Option<T> {
            std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
        }

        let mut opts = Self::default();
        if let Some(trials) = var("ALGOGRAPH_MINCUT_TRIALS") {
            opts.trials = Some(trials);
        }
        if let Some(concurrency) = var("ALGOGRAPH_MINCUT_CONCURRENCY") {
            opts.concurrency = concurrency;
        }
        if let Some(seed) = var("ALGOGRAPH_MINCUT_SEED") {
            opts.seed = Some(seed);
        }
        opts
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = Some(trials);
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Trials needed for roughly `1 - 1/n` confidence: `ceil(n(n-1)/2 * ln n)`, at least 1.
pub fn recommended_trials(node_count: usize) -> usize {
    if node_count < 2 {
        return 1;
    }
    let n = node_count as f64;
    ((n * (n - 1.0) / 2.0) * n.ln()).ceil().max(1.0) as usize
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cut {
    /// Edges crossing the cut.
    pub edges: Vec<Edge>,
    /// Nodes on the side that contains the first node in the table.
    pub side: Vec<NodeHandle>,
    /// Index of the trial that produced this cut.
    pub trial: usize,
}

impl Cut {
    /// Number of crossing edges, the quantity being minimized.
    pub fn size(&self) -> usize {
        self.edges.len()
    }

    pub fn weight(&self) -> i64 {
        self.edges.iter().map(|e| e.weight).sum()
    }
}

#[derive(Debug, Clone, Copy)]
struct CompactEdge {
    u: usize,
    v: usize,
    weight: i64,
}

#[derive(Debug)]
struct TrialCut {
    trial: usize,
    edges: Vec<CompactEdge>,
    side: Vec<usize>,
}

impl TrialCut {
    fn beats(&self, other: &TrialCut) -> bool {
        (self.edges.len(), self.trial) < (other.edges.len(), other.trial)
    }
}

/// Union-find over node indices; each root is one supernode.
struct Supernodes {
    parent: Vec<usize>,
    live: usize,
}

impl Supernodes {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            live: n,
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merges `v`'s supernode into `u`'s. Returns `false` for an edge inside one supernode.
    fn merge(&mut self, u: usize, v: usize) -> bool {
        let ru = self.find(u);
        let rv = self.find(v);
        if ru == rv {
            return false;
        }
        self.parent[rv] = ru;
        self.live -= 1;
        true
    }
}

/// Fisher-Yates: for `i` from `len - 1` down to 1, swap `i` with a uniform pick in `[0, i]`.
fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

fn contract<R: Rng + ?Sized>(
    base: &[CompactEdge],
    node_count: usize,
    trial: usize,
    rng: &mut R,
) -> TrialCut {
    let mut edges = base.to_vec();
    shuffle(&mut edges, rng);

    let mut supernodes = Supernodes::new(node_count);
    for e in &edges {
        if supernodes.live <= 2 {
            break;
        }
        supernodes.merge(e.u, e.v);
    }

    // With more than two supernodes left the graph was disconnected and no edge crosses.
    let anchor = supernodes.find(0);
    let side: Vec<usize> = (0..node_count)
        .filter(|&x| supernodes.find(x) == anchor)
        .collect();
    let edges: Vec<CompactEdge> = edges
        .into_iter()
        .filter(|e| supernodes.find(e.u) != supernodes.find(e.v))
        .collect();

    TrialCut { trial, edges, side }
}

fn record(best: &Mutex<Option<TrialCut>>, candidate: TrialCut) {
    tracing::trace!(
        trial = candidate.trial,
        size = candidate.edges.len(),
        "min-cut trial finished"
    );
    let mut slot = best.lock().unwrap_or_else(PoisonError::into_inner);
    let better = slot
        .as_ref()
        .map(|current| candidate.beats(current))
        .unwrap_or(true);
    if better {
        *slot = Some(candidate);
    }
}

impl<N> Graph<N> {
    /// Edges as index pairs, self-loops dropped. Undirected edges appear once; directed arcs are
    /// treated as undirected connections.
    fn compact_edges(&self) -> Vec<CompactEdge> {
        let mut out = Vec::with_capacity(self.edge_count());
        for u in 0..self.node_count() {
            for (&v, &weight) in self.out_map(u) {
                if u == v || (!self.is_directed() && v < u) {
                    continue;
                }
                out.push(CompactEdge { u, v, weight });
            }
        }
        out
    }

    /// Estimates the global minimum cut with seeded `StdRng` trials configured by `options`.
    pub fn rand_minimum_cut(&self, options: &MinCutOptions) -> Result<Cut> {
        let trials = options
            .trials
            .unwrap_or_else(|| recommended_trials(self.node_count()));
        let base_seed = options.seed.unwrap_or_else(rand::random);
        self.rand_minimum_cut_with(trials, options.concurrency, |trial| {
            StdRng::seed_from_u64(base_seed.wrapping_add(trial as u64))
        })
    }

    /// Runs `trials` contraction trials, trial `i` drawing from `make_rng(i)`, and returns the
    /// smallest cut. Ties go to the lowest trial index, so the result does not depend on which
    /// worker finishes first.
    ///
    /// Blocks until every trial has run. Requires at least two nodes.
    #[tracing::instrument(
        skip_all,
        fields(nodes = self.node_count(), trials = trials, concurrency = concurrency)
    )]
    pub fn rand_minimum_cut_with<R, F>(
        &self,
        trials: usize,
        concurrency: usize,
        make_rng: F,
    ) -> Result<Cut>
    where
        R: Rng,
        F: Fn(usize) -> R + Sync,
    {
        let n = self.node_count();
        if n < 2 {
            return Err(Error::unsupported(
                "rand_minimum_cut",
                "graph has fewer than 2 nodes",
            ));
        }

        let timing_enabled = std::env::var("ALGOGRAPH_MINCUT_TIMING").ok().as_deref() == Some("1");
        let start = timing_enabled.then(std::time::Instant::now);

        let trials = trials.max(1);
        let base = self.compact_edges();
        let best: Mutex<Option<TrialCut>> = Mutex::new(None);
        let run_trial = |trial: usize| {
            let mut rng = make_rng(trial);
            record(&best, contract(&base, n, trial, &mut rng));
        };

        // Workers beyond the trial count would sit idle.
        let workers = concurrency.min(trials);
        if workers <= 1 {
            (0..trials).for_each(run_trial);
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()?;
            pool.install(|| (0..trials).into_par_iter().for_each(run_trial));
        }

        let best = best.into_inner().unwrap_or_else(PoisonError::into_inner);
        let Some(best) = best else {
            debug_assert!(false, "min-cut finished without a trial result");
            return Err(Error::unsupported(
                "rand_minimum_cut",
                "no trial produced a result",
            ));
        };

        tracing::debug!(
            trials,
            workers,
            size = best.edges.len(),
            trial = best.trial,
            "min-cut finished"
        );
        if let Some(s) = start {
            tracing::debug!(elapsed_ms = s.elapsed().as_millis() as u64, "min-cut timing");
        }

        Ok(Cut {
            edges: best
                .edges
                .iter()
                .map(|e| Edge::new(self.handle_for(e.u), self.handle_for(e.v), e.weight))
                .collect(),
            side: best.side.iter().map(|&x| self.handle_for(x)).collect(),
            trial: best.trial,
        })
    }
}
