/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::CentralityError;
use dsi_progress_logger::ProgressLog;
use kdt::graphs::{DiGraph, Direction, GraphError, Selector};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

/// Options of [`betweenness`].
///
/// Sources are processed in batches of consecutive vertices; the size of a
/// batch is the number of rows of a dense batch × *n* matrix fitting in the
/// memory budget, that is,
///
/// > ⌊[`memory_per_worker`](Self::memory_per_worker) ·
/// > [`memory_fraction`](Self::memory_fraction) /
/// > [`bytes_per_edge`](Self::bytes_per_edge) ·
/// > [`workers`](Self::workers) / *n*⌋,
///
/// but at least one.
#[derive(Debug, Clone, PartialEq)]
pub struct BetweennessOptions {
    sample: f64,
    normalize: bool,
    memory_fraction: f64,
    memory_per_worker: f64,
    bytes_per_edge: f64,
    workers: usize,
    seed: Option<u64>,
}

impl Default for BetweennessOptions {
    fn default() -> Self {
        Self {
            sample: Self::DEFAULT_SAMPLE,
            normalize: true,
            memory_fraction: Self::DEFAULT_MEMORY_FRACTION,
            memory_per_worker: Self::DEFAULT_MEMORY_PER_WORKER,
            bytes_per_edge: Self::DEFAULT_BYTES_PER_EDGE,
            workers: rayon::current_num_threads(),
            seed: None,
        }
    }
}

impl BetweennessOptions {
    pub const DEFAULT_SAMPLE: f64 = 0.05;
    pub const DEFAULT_MEMORY_FRACTION: f64 = 0.1;
    pub const DEFAULT_MEMORY_PER_WORKER: f64 = 2E9;
    pub const DEFAULT_BYTES_PER_EDGE: f64 = 18.0;

    /// Sets the fraction of vertices used as sources, in (0 . . 1].
    ///
    /// With 1 all vertices are used, and the result is exact.
    pub fn sample(&mut self, sample: f64) -> &mut Self {
        self.sample = sample;
        self
    }

    /// Sets whether scores are divided by the number of pairs of vertices
    /// (*n* − 1)(*n* − 2) and rescaled to the fraction of sampled sources.
    pub fn normalize(&mut self, normalize: bool) -> &mut Self {
        self.normalize = normalize;
        self
    }

    /// Sets the fraction of the memory of a worker available to a batch.
    pub fn memory_fraction(&mut self, memory_fraction: f64) -> &mut Self {
        self.memory_fraction = memory_fraction;
        self
    }

    /// Sets the memory of a worker, in bytes.
    pub fn memory_per_worker(&mut self, memory_per_worker: f64) -> &mut Self {
        self.memory_per_worker = memory_per_worker;
        self
    }

    /// Sets the estimated memory occupied by an edge, in bytes.
    pub fn bytes_per_edge(&mut self, bytes_per_edge: f64) -> &mut Self {
        self.bytes_per_edge = bytes_per_edge;
        self
    }

    /// Sets the number of workers sharing the memory budget.
    pub fn workers(&mut self, workers: usize) -> &mut Self {
        self.workers = workers;
        self
    }

    /// Sets the seed of the generator choosing sampled batches, or `None` for
    /// a seed from the operating system.
    pub fn seed(&mut self, seed: Option<u64>) -> &mut Self {
        self.seed = seed;
        self
    }

    fn validate(&self) -> Result<(), CentralityError> {
        let invalid = |name, message: String| Err(CentralityError::InvalidOption { name, message });
        if !(self.sample > 0.0 && self.sample <= 1.0) {
            return invalid("sample", format!("must be in (0 . . 1], got {}", self.sample));
        }
        for (name, value) in [
            ("memory_fraction", self.memory_fraction),
            ("memory_per_worker", self.memory_per_worker),
            ("bytes_per_edge", self.bytes_per_edge),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return invalid(name, format!("must be positive, got {value}"));
            }
        }
        if self.workers == 0 {
            return invalid("workers", "must be positive".to_owned());
        }
        Ok(())
    }

    /// Returns the number of sources processed together on a graph with `n`
    /// vertices.
    pub fn batch_size(&self, n: usize) -> usize {
        let budget = self.memory_per_worker * self.memory_fraction / self.bytes_per_edge
            * self.workers as f64;
        ((budget / n.max(1) as f64) as usize).max(1)
    }

    /// Returns the batches of sources to process on a graph with `n`
    /// vertices.
    ///
    /// If the sample fraction is one, the batches partition the vertices.
    /// Otherwise, enough batches to cover ⌊*n* · sample⌋ vertices (at least
    /// one) are chosen uniformly at random, with replacement, among the
    /// batches partitioning the vertices.
    pub fn plan(&self, n: usize) -> Vec<Range<usize>> {
        let batch_size = self.batch_size(n);
        let partition = |i: usize| i * batch_size..((i + 1) * batch_size).min(n);
        let num_possible = n.div_ceil(batch_size);
        if self.sample >= 1.0 {
            return (0..num_possible).map(partition).collect();
        }
        if n == 0 {
            return Vec::new();
        }

        let to_calc = ((n as f64 * self.sample) as usize).max(1);
        let num_batches = to_calc.div_ceil(batch_size);
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        (0..num_batches)
            .map(|_| partition(rng.random_range(0..num_possible)))
            .collect()
    }
}

/// Computes the betweenness centrality of every vertex.
///
/// The betweenness of *v* is the sum, over all ordered pairs of distinct
/// vertices *s*, *t* different from *v*, of the fraction of shortest paths
/// from *s* to *t* passing through *v*. Edge weights are ignored and
/// self-loops never lie on shortest paths: the computation happens on a
/// private copy of the graph with unit weights and no self-loops.
///
/// Sources are processed in [batches](BetweennessOptions::plan). For each
/// batch, a multi-source breadth-first visit computes the number of shortest
/// paths from each source to each vertex, keeping the frontier of each
/// level; then dependencies are accumulated level by level, from the deepest
/// one, as in Brandes's algorithm. All operations are sparse matrix
/// products and element-wise operations on batch × *n* matrices.
///
/// If the sample fraction is one the result is exact; otherwise, it is an
/// estimate whose expectation, once normalized, is the normalized
/// betweenness. If [`normalize`](BetweennessOptions::normalize) is set and
/// the graph has at least three vertices, scores are multiplied by
/// *n* / (*k* (*n* − 1)(*n* − 2)), where *k* is the number of sources
/// processed.
///
/// # Errors
///
/// Returns [`CentralityError::InvalidOption`] if some option is out of range,
/// and [`GraphError::NotSquare`] (wrapped) on graphs with different numbers of
/// out- and in-vertices.
pub fn betweenness(
    graph: &DiGraph,
    options: &BetweennessOptions,
    pl: &mut impl ProgressLog,
) -> Result<Box<[f64]>, CentralityError> {
    options.validate()?;
    if !graph.is_square() {
        return Err(GraphError::NotSquare(graph.num_vertices()).into());
    }
    let n = graph.num_vertices().num_out();

    let mut a = graph.clone();
    a.remove_self_loops();
    a.ones();

    let batches = options.plan(n);
    log::info!(
        "Betweenness on {n} vertices: {} batches of at most {} sources (sample {})",
        batches.len(),
        options.batch_size(n),
        options.sample
    );

    pl.item_name("batch");
    pl.expected_updates(Some(batches.len()));
    pl.start("Computing betweenness centrality...");

    let mut bc = vec![0.0; n].into_boxed_slice();
    let mut num_sources = 0;
    for batch in batches {
        num_sources += batch.len();
        let update = batch_update(&a, batch)?;
        for (b, u) in bc.iter_mut().zip(update.iter()) {
            *b += u;
        }
        pl.update();
    }
    pl.done();

    // Each source contributes one to every vertex in the dependency matrix
    for b in bc.iter_mut() {
        *b -= num_sources as f64;
    }
    if options.normalize && n >= 3 {
        let scale = n as f64 / (num_sources as f64 * (n - 1) as f64 * (n - 2) as f64);
        for b in bc.iter_mut() {
            *b *= scale;
        }
    }
    Ok(bc)
}

/// Returns, for each vertex *v*, the sum over the sources *s* of the batch of
/// 1 + δ(*s*, *v*), where δ is the dependency of *s* on *v*.
///
/// `a` must have unit weights and no self-loops.
fn batch_update(a: &DiGraph, batch: Range<usize>) -> Result<Box<[f64]>, GraphError> {
    let n = a.num_vertices().num_out();
    let size = batch.len();
    let rows: Vec<usize> = (0..size).collect();
    let cols: Vec<usize> = batch.clone().collect();

    // Number of shortest paths from each source of the batch (rows) to each
    // vertex (columns); sources reach themselves with one path
    let mut num_paths = DiGraph::from_triples_rect(&rows, &cols, 1.0, size, n)?;
    let mut frontier = a.index(batch, Selector::All)?;
    let mut levels = Vec::new();
    while frontier.num_edges() > 0 {
        num_paths.accumulate_add(&frontier)?;
        let mut level = frontier.clone();
        level.ones();
        levels.push(level);
        frontier = frontier.spmm(a)?.mul_not(&num_paths)?;
    }

    let mut dependency = DiGraph::fully_connected(size, Some(n));
    for depth in (1..levels.len()).rev() {
        let mut w = levels[depth]
            .ewise_div(&num_paths)?
            .ewise_mul(&dependency)?;
        // Sum over the successors of each vertex
        w = a.spmm(&w.transposed())?.transposed();
        w.accumulate_mul(&levels[depth - 1])?;
        w.accumulate_mul(&num_paths)?;
        dependency.accumulate_add(&w)?;
    }

    dependency.sum(Direction::In)
}
