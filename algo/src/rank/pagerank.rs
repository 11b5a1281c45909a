/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! PageRank by power iteration on the adjacency matrix.
//!
//! # The formula
//!
//! Let *P* be the row-normalized adjacency matrix of the graph after removing
//! self-loops (every out-edge of *v* weighs 1/outdegree(*v*)), and let *S* be
//! the _sink matrix_, in which every vertex without out-edges (a _sink_) has
//! an edge of weight 1/*n* towards every vertex. With damping factor α, the
//! iteration is
//!
//! > **x**⁽*ᵗ* ⁺ ¹⁾ = α (*P*ᵀ + *S*ᵀ) **x**⁽*ᵗ*⁾ + (1 − α) / *n* · **1**,
//!
//! starting from the uniform vector, where the products are computed over the
//! (+, ×) [semiring](kdt::sparse::PlusTimes). Since *P* + *S* is stochastic,
//! every approximation is a probability distribution.
//!
//! The sink matrix is not materialized: *S*ᵀ **x** is the vector whose entries
//! are all equal to the rank of the sinks divided by *n*.
//!
//! # Stopping Criteria
//!
//! The [`run`](PageRank::run) method accepts a composable [`Predicate`] that
//! is evaluated after each iteration. The predicate receives the current
//! iteration number and the _norm delta_ ‖**x**⁽*ᵗ*⁾ − **x**⁽*ᵗ* ⁻ ¹⁾‖₁.

pub mod preds {
    //! Stopping criteria for [`PageRank::run`](super::PageRank::run).
    //!
    //! A criterion is a [`Predicate`] on [`PredParams`] that becomes true
    //! when the power iteration should stop; criteria compose with the `and`
    //! and `or` methods of [`PredicateBooleanExt`](predicates::prelude::PredicateBooleanExt).
    //!
    //! ```
    //! # fn main() -> Result<(), Box<dyn std::error::Error>> {
    //! use predicates::prelude::*;
    //! use kdt_algo::rank::pagerank::preds::{L1Norm, MaxIter};
    //!
    //! // Converge to 10⁻⁸, but never iterate more than 50 times
    //! let predicate = L1Norm::try_from(1E-8)?.or(MaxIter::from(50));
    //! #     Ok(())
    //! # }
    //! ```

    use anyhow::ensure;
    use predicates::{Predicate, reflection::PredicateReflection};
    use std::fmt::Display;

    #[doc(hidden)]
    /// The state of the iteration seen by a stopping criterion.
    #[derive(Debug)]
    pub struct PredParams {
        pub iteration: usize,
        pub norm_delta: f64,
    }

    /// Stops once the given number of iterations has been performed.
    #[derive(Debug, Clone)]
    pub struct MaxIter {
        max_iter: usize,
    }

    impl MaxIter {
        pub const DEFAULT_MAX_ITER: usize = 1000;
    }

    impl From<usize> for MaxIter {
        fn from(max_iter: usize) -> Self {
            MaxIter { max_iter }
        }
    }

    impl Default for MaxIter {
        fn default() -> Self {
            Self::from(Self::DEFAULT_MAX_ITER)
        }
    }

    impl Display for MaxIter {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_fmt(format_args!("(max iter: {})", self.max_iter))
        }
    }

    impl PredicateReflection for MaxIter {}

    impl Predicate<PredParams> for MaxIter {
        fn eval(&self, pred_params: &PredParams) -> bool {
            pred_params.iteration >= self.max_iter
        }
    }

    /// Stops when the 𝓁₁ norm of the difference between successive
    /// approximations falls strictly below a given threshold.
    #[derive(Debug, Clone)]
    pub struct L1Norm {
        threshold: f64,
    }

    impl L1Norm {
        pub const DEFAULT_THRESHOLD: f64 = 0.1;
    }

    impl TryFrom<Option<f64>> for L1Norm {
        type Error = anyhow::Error;
        fn try_from(threshold: Option<f64>) -> anyhow::Result<Self> {
            Ok(match threshold {
                Some(threshold) => {
                    ensure!(!threshold.is_nan());
                    ensure!(threshold > 0.0, "The threshold must be positive");
                    L1Norm { threshold }
                }
                None => Self::default(),
            })
        }
    }

    impl TryFrom<f64> for L1Norm {
        type Error = anyhow::Error;
        fn try_from(threshold: f64) -> anyhow::Result<Self> {
            Some(threshold).try_into()
        }
    }

    impl Default for L1Norm {
        fn default() -> Self {
            L1Norm {
                threshold: Self::DEFAULT_THRESHOLD,
            }
        }
    }

    impl Display for L1Norm {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_fmt(format_args!("(norm: {})", self.threshold))
        }
    }

    impl PredicateReflection for L1Norm {}
    impl Predicate<PredParams> for L1Norm {
        fn eval(&self, pred_params: &PredParams) -> bool {
            pred_params.norm_delta < self.threshold
        }
    }
}

use anyhow::ensure;
use dsi_progress_logger::{ProgressLog, no_logging};
use kahan::KahanSum;
use kdt::graphs::{DiGraph, GraphError};
use kdt::sparse::PlusTimes;
use kdt::utils::{RAYON_MIN_LEN, l1_distance};
use predicates::Predicate;
use predicates::prelude::*;
use rayon::prelude::*;

/// Computes PageRank by power iteration.
///
/// The struct is configured via setters and then executed via
/// [`run`](Self::run). After completion the rank vector is available via the
/// [`rank`](Self::rank) method.
///
/// The graph is never modified: self-loop removal and normalization happen on
/// a private copy.
///
/// # Examples
///
/// ```
/// use kdt::graphs::DiGraph;
/// use kdt_algo::rank::pagerank::{PageRank, preds};
///
/// // 0 → 1, 0 → 2, 1 → 2, 2 → 0, 3 → 0, 4 → 3
/// let g = DiGraph::from_triples(&[0, 0, 1, 2, 3, 4], &[1, 2, 2, 0, 0, 3], 1.0, 5)?;
///
/// let mut pr = PageRank::new(&g)?;
/// pr.damping(0.85);
/// pr.run(preds::L1Norm::try_from(1E-9)?);
///
/// assert_eq!(pr.rank().len(), 5);
/// assert!((pr.rank().iter().sum::<f64>() - 1.0).abs() < 1E-9);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct PageRank<'a> {
    graph: &'a DiGraph,
    damping: f64,
    norm_delta: f64,

    rank: Box<[f64]>,
    iteration: usize,
}

impl std::fmt::Debug for PageRank<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRank")
            .field("damping", &self.damping)
            .field("norm_delta", &self.norm_delta)
            .field("iteration", &self.iteration)
            .finish_non_exhaustive()
    }
}

impl<'a> PageRank<'a> {
    pub const DEFAULT_DAMPING: f64 = 0.85;

    /// Creates a new PageRank computation.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotSquare`] on graphs with different numbers of
    /// out- and in-vertices.
    pub fn new(graph: &'a DiGraph) -> Result<Self, GraphError> {
        if !graph.is_square() {
            return Err(GraphError::NotSquare(graph.num_vertices()));
        }
        let n = graph.num_vertices().num_out();
        Ok(Self {
            graph,
            damping: Self::DEFAULT_DAMPING,
            norm_delta: f64::INFINITY,
            rank: vec![0.0; n].into_boxed_slice(),
            iteration: 0,
        })
    }

    /// Sets the damping factor α.
    ///
    /// # Panics
    ///
    /// Panics if `damping` is not in the interval [0 . . 1).
    pub fn damping(&mut self, damping: f64) -> &mut Self {
        assert!(
            // Note that 0.0..1.0 is [0.0..1.0) in mathematical notation
            (0.0..1.0).contains(&damping),
            "The damping factor must be in [0 . . 1), got {damping}"
        );
        self.damping = damping;
        self
    }

    /// Returns the rank vector.
    ///
    /// After calling [`run`](Self::run), this contains the computed PageRank
    /// values.
    pub fn rank(&self) -> &[f64] {
        &self.rank
    }

    /// Returns the number of iterations performed by the last call to
    /// [`run`](Self::run).
    pub fn iterations(&self) -> usize {
        self.iteration
    }

    /// Returns the 𝓁₁ norm of the difference between the last two
    /// approximations.
    pub fn norm_delta(&self) -> f64 {
        self.norm_delta
    }

    /// Runs the PageRank computation until the given predicate is satisfied.
    pub fn run(&mut self, predicate: impl Predicate<preds::PredParams>) {
        self.run_with_logging(predicate, no_logging![]);
    }

    /// Runs the PageRank computation until the given predicate is satisfied,
    /// logging progress.
    ///
    /// The options of `pl` will be preserved, making thus possible to
    /// customize the logs.
    pub fn run_with_logging(
        &mut self,
        predicate: impl Predicate<preds::PredParams>,
        pl: &mut impl ProgressLog,
    ) {
        let n = self.rank.len();
        self.iteration = 0;
        self.norm_delta = f64::INFINITY;
        if n == 0 {
            return;
        }

        log::info!("Damping factor: {}", self.damping);
        log::info!("Stopping criterion: {}", predicate);

        let mut g = self.graph.clone();
        g.remove_self_loops();
        g.normalize_edge_weights();
        let sinks: Vec<usize> = g
            .matrix()
            .reduce_rows(|w| if w != 0.0 { 1.0 } else { 0.0 }, |a, b| a + b)
            .iter()
            .enumerate()
            .filter_map(|(v, &d)| (d == 0.0).then_some(v))
            .collect();
        log::info!("{} sinks", sinks.len());
        let transposed = g.transposed();
        drop(g);

        let inv_n = 1.0 / n as f64;
        let teleport = (1.0 - self.damping) * inv_n;
        self.rank.fill(inv_n);

        pl.item_name("iteration");
        pl.expected_updates(None);
        pl.start(format!("Computing PageRank (damping={})...", self.damping));

        loop {
            let sink_rank = sinks
                .iter()
                .fold(KahanSum::<f64>::new(), |acc, &v| acc + self.rank[v])
                .sum();
            let sink_share = sink_rank * inv_n;

            let mut next = transposed.matrix().mxv_dense(&self.rank, &PlusTimes);
            let damping = self.damping;
            next.par_iter_mut()
                .with_min_len(RAYON_MIN_LEN)
                .for_each(|x| *x = damping * (*x + sink_share) + teleport);

            self.norm_delta = l1_distance(&next, &self.rank);
            self.rank = next;
            self.iteration += 1;

            pl.update();
            log::debug!(
                "Iteration {}: norm delta {}",
                self.iteration,
                self.norm_delta
            );

            if predicate.eval(&preds::PredParams {
                iteration: self.iteration,
                norm_delta: self.norm_delta,
            }) {
                break;
            }
        }

        pl.done();
        log::info!(
            "PageRank stopped after {} iterations with norm delta {}",
            self.iteration,
            self.norm_delta
        );
    }
}

/// Computes PageRank with the given threshold on the 𝓁₁ norm of the
/// difference between successive approximations and the given damping factor.
///
/// The iteration also stops after [`MaxIter::DEFAULT_MAX_ITER`](preds::MaxIter::DEFAULT_MAX_ITER)
/// iterations.
///
/// # Errors
///
/// Returns an error if `epsilon` is not positive, if `damping` is not in
/// [0 . . 1), or if the graph is not square.
pub fn page_rank(graph: &DiGraph, epsilon: f64, damping: f64) -> anyhow::Result<Box<[f64]>> {
    ensure!(
        (0.0..1.0).contains(&damping),
        "The damping factor must be in [0 . . 1), got {damping}"
    );
    let predicate = preds::L1Norm::try_from(epsilon)?.or(preds::MaxIter::default());
    let mut pr = PageRank::new(graph)?;
    pr.damping(damping);
    pr.run(predicate);
    Ok(pr.rank().into())
}
