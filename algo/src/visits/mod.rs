/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Frontier-based visits.
//!
//! All visits propagate a sparse frontier through the graph with the
//! [select-max semiring](kdt::sparse::SelectMax): at each step, every vertex
//! reached by the frontier receives the greatest identifier among the frontier
//! vertices reaching it. Ties are thus resolved deterministically, and
//! independently of the number of threads.
//!
//! Since rows of the adjacency matrix contain out-edges, propagation uses the
//! transpose of the graph, which is computed on a private copy. If the graph
//! is known to be symmetric, passing `symmetric = true` skips the transpose.
//! The graph passed by the caller is never modified.

use kdt::graphs::{DiGraph, GraphError};
use kdt::sparse::SparseMatrix;
use std::borrow::Cow;

mod bfs_tree;
pub use bfs_tree::*;

mod hops;
pub use hops::*;

/// Returns the matrix whose rows contain the in-edges of each vertex.
fn propagation_matrix(
    graph: &DiGraph,
    symmetric: bool,
) -> Result<Cow<'_, SparseMatrix>, GraphError> {
    if !graph.is_square() {
        return Err(GraphError::NotSquare(graph.num_vertices()));
    }
    Ok(if symmetric {
        Cow::Borrowed(graph.matrix())
    } else {
        Cow::Owned(graph.matrix().transpose())
    })
}

fn check_vertex(vertex: usize, n: usize) -> Result<(), GraphError> {
    if vertex >= n {
        return Err(GraphError::VertexOutOfRange { vertex, n });
    }
    Ok(())
}

fn check_len(got: usize, expected: usize) -> Result<(), GraphError> {
    if got != expected {
        return Err(GraphError::VectorLength { got, expected });
    }
    Ok(())
}
