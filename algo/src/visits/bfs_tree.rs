/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{check_len, check_vertex, propagation_matrix};
use dsi_progress_logger::ProgressLog;
use kdt::graphs::{DiGraph, GraphError};
use kdt::sparse::{PlusTimes, SelectMax, SparseMatrix, SparseVec};
use sux::bits::BitVec;

/// Builds a breadth-first tree of the vertices reachable from `root`.
///
/// The result contains, for each vertex, its parent in the tree, or `None` if
/// the vertex is not reachable; the root is its own parent. When several
/// vertices of the same level reach a vertex, the one with the greatest
/// identifier becomes its parent.
///
/// The number of iterations is the depth of the tree plus one.
///
/// # Errors
///
/// Returns [`GraphError::VertexOutOfRange`] if `root` is not a vertex, and
/// [`GraphError::NotSquare`] on graphs with different numbers of out- and
/// in-vertices.
///
/// # Examples
///
/// ```
/// use dsi_progress_logger::no_logging;
/// use kdt::graphs::DiGraph;
/// use kdt_algo::visits::bfs_tree;
///
/// // 0 → 1, 0 → 2, 1 → 3, 2 → 3
/// let g = DiGraph::from_triples(&[0, 0, 1, 2], &[1, 2, 3, 3], 1.0, 5)?;
/// let parents = bfs_tree(&g, 0, false, no_logging![])?;
/// assert_eq!(&*parents, &[Some(0), Some(0), Some(0), Some(2), None]);
/// # Ok::<(), kdt::graphs::GraphError>(())
/// ```
pub fn bfs_tree(
    graph: &DiGraph,
    root: usize,
    symmetric: bool,
    pl: &mut impl ProgressLog,
) -> Result<Box<[Option<usize>]>, GraphError> {
    let (parents, _) = visit(graph, root, symmetric, "Building BFS tree...", pl)?;
    Ok(parents)
}

/// Returns the distance of each vertex from `root`, or `None` if the vertex
/// is not reachable.
///
/// See [`bfs_tree`] for the errors.
pub fn bfs_levels(
    graph: &DiGraph,
    root: usize,
    symmetric: bool,
    pl: &mut impl ProgressLog,
) -> Result<Box<[Option<usize>]>, GraphError> {
    let (_, levels) = visit(graph, root, symmetric, "Computing BFS levels...", pl)?;
    Ok(levels)
}

fn visit(
    graph: &DiGraph,
    root: usize,
    symmetric: bool,
    msg: &str,
    pl: &mut impl ProgressLog,
) -> Result<(Box<[Option<usize>]>, Box<[Option<usize>]>), GraphError> {
    let n = graph.num_vertices().num_out();
    check_vertex(root, n)?;
    let matrix = propagation_matrix(graph, symmetric)?;

    let mut parents = vec![None; n].into_boxed_slice();
    let mut levels = vec![None; n].into_boxed_slice();
    parents[root] = Some(root);
    levels[root] = Some(0);
    let mut frontier = SparseVec::singleton(n, root, root);

    pl.item_name("vertex");
    pl.expected_updates(Some(n));
    pl.start(msg);
    pl.light_update();

    let mut level = 1;
    while !frontier.is_empty() {
        let mut next = matrix.mxv(&frontier, &SelectMax);
        next.retain(|v, _| parents[v].is_none());
        for (v, &p) in next.iter() {
            parents[v] = Some(p);
            levels[v] = Some(level);
        }
        pl.update_with_count(next.nnz());
        frontier = next.to_index_values();
        level += 1;
    }

    pl.done();
    log::debug!("BFS from {root} reached depth {}", level - 2);
    Ok((parents, levels))
}

/// The outcome of [`validate_bfs_tree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BfsTreeCheck {
    /// The parent vector is a breadth-first tree; `levels` contains the
    /// distance of each vertex from the root, or `None` for unreachable
    /// vertices.
    Valid { levels: Box<[Option<usize>]> },
    /// The parent vector is not a tree rooted at the root: the root is the
    /// child of some vertex, there is a cycle, a vertex has more than one
    /// parent, or a vertex with a parent cannot be reached from the root.
    NotATree,
    /// Some tree edge joins vertices whose levels do not differ by one.
    LevelMismatch,
}

impl BfsTreeCheck {
    /// Returns the numeric code of the outcome: 1 if valid, −1 if the parent
    /// vector is not a tree, −2 if the levels of the endpoints of some tree
    /// edge do not differ by one.
    pub fn code(&self) -> i32 {
        match self {
            BfsTreeCheck::Valid { .. } => 1,
            BfsTreeCheck::NotATree => -1,
            BfsTreeCheck::LevelMismatch => -2,
        }
    }

    /// Returns true if the parent vector was found to be valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, BfsTreeCheck::Valid { .. })
    }
}

/// Checks that `parents` is a breadth-first tree of the graph rooted at
/// `root`, in the style of [`bfs_tree`].
///
/// Two tests are performed, and the first failing one determines the
/// outcome:
///
/// 1. tree edges (the pairs (`parents[v]`, *v*) with *v* ≠ `root`) must form a
///    tree: the root is not the child of any vertex, walking tree edges
///    outward from the root never visits a vertex twice, and every vertex
///    with a parent is reached by the walk; otherwise the result is
///    [`BfsTreeCheck::NotATree`];
/// 2. the distances from the root, recomputed on the graph, of the endpoints
///    of each tree edge must differ by exactly one; otherwise the result is
///    [`BfsTreeCheck::LevelMismatch`].
///
/// Parents that are not vertices of the graph make the vector fail the first
/// test.
///
/// # Errors
///
/// Returns [`GraphError::VectorLength`] if `parents` has not one entry per
/// vertex; see [`bfs_tree`] for the other errors.
pub fn validate_bfs_tree(
    graph: &DiGraph,
    root: usize,
    parents: &[Option<usize>],
    symmetric: bool,
    pl: &mut impl ProgressLog,
) -> Result<BfsTreeCheck, GraphError> {
    let n = graph.num_vertices().num_out();
    check_vertex(root, n)?;
    check_len(parents.len(), n)?;
    let levels = bfs_levels(graph, root, symmetric, pl)?;

    let mut tree_parents = Vec::new();
    let mut tree_children = Vec::new();
    for (v, &p) in parents.iter().enumerate() {
        match p {
            Some(p) if p >= n => return Ok(BfsTreeCheck::NotATree),
            Some(p) if v != root => {
                tree_parents.push(p);
                tree_children.push(v);
            }
            _ => {}
        }
    }
    if tree_children.contains(&root) || parents[root].is_some_and(|p| p != root) {
        return Ok(BfsTreeCheck::NotATree);
    }

    // Rows of the tree matrix are children, so that a product moves the
    // frontier one level down
    let ones = vec![1.0; tree_children.len()];
    let tree = SparseMatrix::from_triples(n, n, &tree_children, &tree_parents, &ones);
    let mut visited = BitVec::new(n);
    visited.set(root, true);
    let mut frontier = SparseVec::singleton(n, root, 1.0);
    while !frontier.is_empty() {
        let next = tree.mxv(&frontier, &PlusTimes);
        if next.indices().iter().any(|&v| visited[v]) || next.values().iter().any(|&c| c > 1.0) {
            return Ok(BfsTreeCheck::NotATree);
        }
        for &v in next.indices() {
            visited.set(v, true);
        }
        frontier = next.map(|_, _| 1.0);
    }
    if parents
        .iter()
        .enumerate()
        .any(|(v, p)| p.is_some() && !visited[v])
    {
        return Ok(BfsTreeCheck::NotATree);
    }

    let consistent = tree_parents
        .iter()
        .zip(&tree_children)
        .all(|(&p, &v)| match (levels[p], levels[v]) {
            (Some(lp), Some(lv)) => lv == lp + 1,
            _ => false,
        });
    if !consistent {
        return Ok(BfsTreeCheck::LevelMismatch);
    }

    Ok(BfsTreeCheck::Valid { levels })
}
