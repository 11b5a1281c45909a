/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Centrality measures.
//!
//! [`centrality`] dispatches on an [`Algorithm`], which can also be parsed
//! from the usual names (`exactBC`, `approxBC`, `kBC`, `degree`). Only
//! betweenness centrality is available: the other algorithms return
//! [`CentralityError::NotImplemented`].
//!
//! # Examples
//!
//! ```
//! use dsi_progress_logger::no_logging;
//! use kdt::graphs::DiGraph;
//! use kdt_algo::centrality::{Algorithm, BetweennessOptions, centrality};
//!
//! // 0 → 1 → 2 → 3
//! let g = DiGraph::from_triples(&[0, 1, 2], &[1, 2, 3], 1.0, 4)?;
//! let algorithm: Algorithm = "exactBC".parse()?;
//! let bc = centrality(&g, algorithm, &BetweennessOptions::default(), no_logging![])?;
//! assert!(bc[1] > bc[0] && bc[2] > bc[3]);
//! # Ok::<(), kdt_algo::centrality::CentralityError>(())
//! ```

use dsi_progress_logger::ProgressLog;
use kdt::graphs::{DiGraph, GraphError};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

mod betweenness;
pub use betweenness::*;

/// Centrality algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Exact betweenness centrality (`exactBC`).
    ExactBetweenness,
    /// Betweenness centrality estimated on a sample of the sources
    /// (`approxBC`).
    ApproxBetweenness,
    /// *k*-betweenness centrality (`kBC`); not implemented.
    KBetweenness,
    /// Degree centrality (`degree`); not implemented.
    Degree,
}

impl Algorithm {
    /// Returns the usual name of the algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::ExactBetweenness => "exactBC",
            Algorithm::ApproxBetweenness => "approxBC",
            Algorithm::KBetweenness => "kBC",
            Algorithm::Degree => "degree",
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = CentralityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "exactBC" => Algorithm::ExactBetweenness,
            "approxBC" => Algorithm::ApproxBetweenness,
            "kBC" => Algorithm::KBetweenness,
            "degree" => Algorithm::Degree,
            _ => return Err(CentralityError::UnknownAlgorithm(s.to_owned())),
        })
    }
}

/// Errors raised by centrality computations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CentralityError {
    /// The algorithm exists but is not implemented.
    #[error("Centrality algorithm {0} is not implemented")]
    NotImplemented(Algorithm),
    /// The name does not denote a centrality algorithm.
    #[error("Unknown centrality algorithm {0:?}")]
    UnknownAlgorithm(String),
    /// An option has an invalid value.
    #[error("Invalid option {name}: {message}")]
    InvalidOption {
        name: &'static str,
        message: String,
    },
    /// The graph is not suitable for the computation.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Computes a centrality measure on every vertex of the graph.
///
/// For [`Algorithm::ExactBetweenness`] the sample fraction of `options` is
/// ignored and all vertices are used as sources.
pub fn centrality(
    graph: &DiGraph,
    algorithm: Algorithm,
    options: &BetweennessOptions,
    pl: &mut impl ProgressLog,
) -> Result<Box<[f64]>, CentralityError> {
    match algorithm {
        Algorithm::ExactBetweenness => {
            let mut options = options.clone();
            options.sample(1.0);
            betweenness(graph, &options, pl)
        }
        Algorithm::ApproxBetweenness => betweenness(graph, options, pl),
        Algorithm::KBetweenness | Algorithm::Degree => {
            Err(CentralityError::NotImplemented(algorithm))
        }
    }
}
