/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::DiGraph;
use crate::sparse::SparseMatrix;

impl DiGraph {
    /// Creates a complete graph with `n` out-vertices and `m` in-vertices
    /// (`n` if `None`), in which every out-vertex has an edge of unit weight
    /// to every in-vertex, self-loops included.
    ///
    /// # Examples
    ///
    /// ```
    /// use kdt::graphs::{DiGraph, Direction};
    ///
    /// let g = DiGraph::fully_connected(3, None);
    /// assert_eq!(g.num_edges(), 9);
    /// assert_eq!(&*g.degree(Direction::Out)?, &[3, 3, 3]);
    /// # Ok::<(), kdt::graphs::GraphError>(())
    /// ```
    pub fn fully_connected(n: usize, m: Option<usize>) -> Self {
        let m = m.unwrap_or(n);
        let rows = (0..n).map(|_| (0..m).map(|j| (j, 1.0)).collect()).collect();
        Self::from_matrix(SparseMatrix::from_rows(n, m, rows))
    }

    /// Creates a two-dimensional torus with `n` vertices per side.
    ///
    /// The graph has `n`² vertices; vertex *r* · `n` + *c* sits at row *r*
    /// and column *c*, and has an edge of unit weight to each of its north,
    /// south, west and east neighbors, wrapping around at the borders. When
    /// `n` < 3 some neighbors coincide, and the weights of the coinciding
    /// edges are summed, so that every vertex has out- and in-weight four.
    pub fn torus(n: usize) -> Self {
        let num_vertices = n * n;
        let mut sources = Vec::with_capacity(4 * num_vertices);
        let mut dests = Vec::with_capacity(4 * num_vertices);
        for r in 0..n {
            for c in 0..n {
                let v = r * n + c;
                for (nr, nc) in [
                    ((r + n - 1) % n, c),
                    ((r + 1) % n, c),
                    (r, (c + n - 1) % n),
                    (r, (c + 1) % n),
                ] {
                    sources.push(v);
                    dests.push(nr * n + nc);
                }
            }
        }
        let weights = vec![1.0; sources.len()];
        Self::from_matrix(SparseMatrix::from_triples(
            num_vertices,
            num_vertices,
            &sources,
            &dests,
            &weights,
        ))
    }
}
