/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Clustering.
//!
//! No clustering algorithm is available yet: [`cluster`] always returns
//! [`ClusterError::NotImplemented`].

use kdt::graphs::DiGraph;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Clustering algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClusterAlgorithm {
    /// Markov clustering (`Markov`).
    Markov,
    /// *k*-nearest-neighbor clustering (`kNN`).
    Knn,
}

impl Display for ClusterAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClusterAlgorithm::Markov => f.write_str("Markov"),
            ClusterAlgorithm::Knn => f.write_str("kNN"),
        }
    }
}

impl FromStr for ClusterAlgorithm {
    type Err = ClusterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Markov" | "markov" => Ok(ClusterAlgorithm::Markov),
            "kNN" | "knn" => Ok(ClusterAlgorithm::Knn),
            _ => Err(ClusterError::UnknownAlgorithm(s.to_owned())),
        }
    }
}

/// Errors raised by clustering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClusterError {
    /// The algorithm exists but is not implemented.
    #[error("Clustering algorithm {0} is not implemented")]
    NotImplemented(ClusterAlgorithm),
    /// The name does not denote a clustering algorithm.
    #[error("Unknown clustering algorithm {0:?}")]
    UnknownAlgorithm(String),
}

/// Assigns each vertex to a cluster.
pub fn cluster(
    _graph: &DiGraph,
    algorithm: ClusterAlgorithm,
) -> Result<Box<[usize]>, ClusterError> {
    Err(ClusterError::NotImplemented(algorithm))
}
