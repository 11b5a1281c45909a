/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{check_len, propagation_matrix};
use kdt::graphs::{DiGraph, GraphError};
use kdt::sparse::{SelectMax, SparseVec};

/// Returns the vertices reachable from the `sources` with at least one and at
/// most `hops` edges.
///
/// `sources` is a mask with one entry per vertex. A source belongs to the
/// result only if it is reachable from some source, possibly itself, within
/// `hops` edges.
///
/// # Errors
///
/// Returns [`GraphError::VectorLength`] if `sources` has not one entry per
/// vertex, and [`GraphError::NotSquare`] on graphs with different numbers of
/// out- and in-vertices.
///
/// # Examples
///
/// ```
/// use kdt::graphs::DiGraph;
/// use kdt_algo::visits::neighbors;
///
/// // 0 → 1 → 2 → 3
/// let g = DiGraph::from_triples(&[0, 1, 2], &[1, 2, 3], 1.0, 4)?;
/// let sources = [true, false, false, false];
/// assert_eq!(&*neighbors(&g, &sources, 2, false)?, &[false, true, true, false]);
/// # Ok::<(), kdt::graphs::GraphError>(())
/// ```
pub fn neighbors(
    graph: &DiGraph,
    sources: &[bool],
    hops: usize,
    symmetric: bool,
) -> Result<Box<[bool]>, GraphError> {
    let n = graph.num_vertices().num_out();
    check_len(sources.len(), n)?;
    let matrix = propagation_matrix(graph, symmetric)?;

    let mut result = vec![false; n].into_boxed_slice();
    let mut frontier = SparseVec::from_mask(sources, ()).to_index_values();
    for _ in 0..hops {
        if frontier.is_empty() {
            break;
        }
        frontier = matrix.mxv(&frontier, &SelectMax).to_index_values();
        for &v in frontier.indices() {
            result[v] = true;
        }
    }
    Ok(result)
}

/// Extends by one edge a set of paths ending at the `sources`.
///
/// The result contains, for each vertex reached by an edge from a source,
/// the source it was reached from, or `None` if no source reaches it. When
/// several sources reach a vertex, the greatest one is chosen, so that at
/// most one path is extended to each vertex.
///
/// See [`neighbors`] for the errors.
///
/// # Examples
///
/// ```
/// use kdt::graphs::DiGraph;
/// use kdt_algo::visits::paths_hop;
///
/// // 0 → 2, 1 → 2, 1 → 3
/// let g = DiGraph::from_triples(&[0, 1, 1], &[2, 2, 3], 1.0, 4)?;
/// let sources = [true, true, false, false];
/// assert_eq!(&*paths_hop(&g, &sources, false)?, &[None, None, Some(1), Some(1)]);
/// # Ok::<(), kdt::graphs::GraphError>(())
/// ```
pub fn paths_hop(
    graph: &DiGraph,
    sources: &[bool],
    symmetric: bool,
) -> Result<Box<[Option<usize>]>, GraphError> {
    let n = graph.num_vertices().num_out();
    check_len(sources.len(), n)?;
    let matrix = propagation_matrix(graph, symmetric)?;

    let frontier = SparseVec::from_mask(sources, ()).to_index_values();
    Ok(matrix.mxv(&frontier, &SelectMax).to_options())
}
