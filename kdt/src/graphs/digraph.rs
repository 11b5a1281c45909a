/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{Direction, EdgeWeights, GraphError, Selector, VertexCount};
use crate::sparse::{SparseMatrix, SparseVec};
use std::fmt::Display;
use std::ops::{DivAssign, MulAssign};

/// A directed graph with `f64` edge weights, stored as a sparse adjacency
/// matrix.
///
/// The entry at row *i* and column *j* is the weight of the edge from vertex
/// *i* to vertex *j*: rows contain out-edges, columns in-edges. Vertices are
/// numbered from zero.
///
/// Graphs are created from triples ([`from_triples`](Self::from_triples)),
/// by combining other graphs ([`add`](Self::add), [`ewise_mul`](Self::ewise_mul),
/// [`mul_not`](Self::mul_not), …), by [indexing](Self::index), or by
/// generators such as [`fully_connected`](Self::fully_connected) and
/// [`torus`](Self::torus). Methods taking `&mut self` modify the graph in
/// place; all other methods leave it untouched. Cloning yields a deep,
/// independent copy.
///
/// By setting the feature `serde`, this struct can be serialized using
/// [serde](https://crates.io/crates/serde).
///
/// # Examples
///
/// ```
/// use kdt::graphs::{DiGraph, Direction, Selector};
///
/// // A directed 4-cycle with unit weights
/// let g = DiGraph::from_triples(&[0, 1, 2, 3], &[1, 2, 3, 0], 1.0, 4)?;
/// assert_eq!(g.num_edges(), 4);
///
/// // The subgraph induced by vertices 1..3 keeps the edge 1 → 2 only
/// let s = g.subgraph(1..3_usize)?;
/// assert_eq!(s.decompose(), (vec![0], vec![1], vec![1.0]));
///
/// // Every edge is masked by itself
/// assert_eq!(g.mul_not(&g)?.num_edges(), 0);
/// # Ok::<(), kdt::graphs::GraphError>(())
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiGraph {
    matrix: SparseMatrix,
}

impl DiGraph {
    /// Only graphs with fewer edges are listed by [`Display`].
    pub const DISPLAY_MAX_EDGES: usize = 100;

    /// Creates a graph with no vertices and no edges.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph with `n` vertices and no edges.
    pub fn empty(n: usize) -> Self {
        Self {
            matrix: SparseMatrix::new(n, n),
        }
    }

    /// Wraps an adjacency matrix.
    pub fn from_matrix(matrix: SparseMatrix) -> Self {
        Self { matrix }
    }

    /// Returns the adjacency matrix.
    pub fn matrix(&self) -> &SparseMatrix {
        &self.matrix
    }

    /// Consumes the graph, returning its adjacency matrix.
    pub fn into_matrix(self) -> SparseMatrix {
        self.matrix
    }

    /// Creates a graph with `n` vertices from a list of edges.
    ///
    /// The edge from `sources[k]` to `dests[k]` has weight `weights[k]`, or
    /// the given weight if a scalar is passed. Weights of duplicate edges are
    /// summed.
    pub fn from_triples<'a>(
        sources: &[usize],
        dests: &[usize],
        weights: impl Into<EdgeWeights<'a>>,
        n: usize,
    ) -> Result<Self, GraphError> {
        Self::from_triples_rect(sources, dests, weights, n, n)
    }

    /// Creates a graph with `num_out` out-vertices and `num_in` in-vertices
    /// from a list of edges.
    ///
    /// See [`from_triples`](Self::from_triples).
    pub fn from_triples_rect<'a>(
        sources: &[usize],
        dests: &[usize],
        weights: impl Into<EdgeWeights<'a>>,
        num_out: usize,
        num_in: usize,
    ) -> Result<Self, GraphError> {
        let weights = weights.into();
        let num_weights = match weights {
            EdgeWeights::Scalar(_) => sources.len(),
            EdgeWeights::PerEdge(w) => w.len(),
        };
        if sources.len() != dests.len() || sources.len() != num_weights {
            return Err(GraphError::TripleLengths {
                sources: sources.len(),
                dests: dests.len(),
                weights: num_weights,
            });
        }
        if let Some(&vertex) = sources.iter().find(|&&s| s >= num_out) {
            return Err(GraphError::SourceOutOfRange { vertex, num_out });
        }
        if let Some(&vertex) = dests.iter().find(|&&d| d >= num_in) {
            return Err(GraphError::DestinationOutOfRange { vertex, num_in });
        }

        let broadcast;
        let weights = match weights {
            EdgeWeights::Scalar(w) => {
                broadcast = vec![w; sources.len()];
                &broadcast[..]
            }
            EdgeWeights::PerEdge(w) => w,
        };
        Ok(Self {
            matrix: SparseMatrix::from_triples(num_out, num_in, sources, dests, weights),
        })
    }

    /// Returns the number of vertices.
    pub fn num_vertices(&self) -> VertexCount {
        VertexCount::new(self.matrix.num_rows(), self.matrix.num_cols())
    }

    /// Returns the number of stored edges.
    pub fn num_edges(&self) -> usize {
        self.matrix.nnz()
    }

    /// Returns true if the graph has the same number of out- and
    /// in-vertices.
    pub fn is_square(&self) -> bool {
        matches!(self.num_vertices(), VertexCount::Square(_))
    }

    fn check_same_vertices(&self, other: &Self) -> Result<(), GraphError> {
        let (first, second) = (self.num_vertices(), other.num_vertices());
        if first != second {
            return Err(GraphError::VertexCountMismatch { first, second });
        }
        Ok(())
    }

    /// Returns the sum of two graphs.
    ///
    /// The result has an edge wherever at least one of the graphs has one,
    /// with missing edges counting as zero.
    pub fn add(&self, other: &Self) -> Result<Self, GraphError> {
        self.check_same_vertices(other)?;
        Ok(Self {
            matrix: self.matrix.ewise_union(&other.matrix, |a, b| a + b),
        })
    }

    /// Adds another graph to this one, in place.
    ///
    /// See [`add`](Self::add).
    pub fn accumulate_add(&mut self, other: &Self) -> Result<(), GraphError> {
        *self = self.add(other)?;
        Ok(())
    }

    /// Returns the element-wise product of two graphs.
    ///
    /// The result has an edge only where both graphs have one.
    pub fn ewise_mul(&self, other: &Self) -> Result<Self, GraphError> {
        self.check_same_vertices(other)?;
        Ok(Self {
            matrix: self.matrix.ewise_intersection(&other.matrix, |a, b| a * b),
        })
    }

    /// Multiplies this graph element-wise by another one, in place.
    ///
    /// See [`ewise_mul`](Self::ewise_mul).
    pub fn accumulate_mul(&mut self, other: &Self) -> Result<(), GraphError> {
        *self = self.ewise_mul(other)?;
        Ok(())
    }

    /// Returns the element-wise quotient of two graphs.
    ///
    /// The result has an edge only where both graphs have one.
    pub fn ewise_div(&self, other: &Self) -> Result<Self, GraphError> {
        self.check_same_vertices(other)?;
        Ok(Self {
            matrix: self.matrix.ewise_intersection(&other.matrix, |a, b| a / b),
        })
    }

    /// Multiplies every edge weight by a scalar, in place.
    pub fn scale_by_scalar(&mut self, scalar: f64) {
        self.matrix.apply(|w| w * scalar);
    }

    /// Divides every edge weight by a scalar, in place.
    pub fn divide_by_scalar(&mut self, scalar: f64) {
        self.matrix.apply(|w| w / scalar);
    }

    /// Returns this graph without the edges at positions where `other` has a
    /// nonzero edge.
    pub fn mul_not(&self, other: &Self) -> Result<Self, GraphError> {
        self.check_same_vertices(other)?;
        Ok(Self {
            matrix: self.matrix.ewise_mask_not(&other.matrix),
        })
    }

    /// Returns the graph induced by a selection of out-vertices and a
    /// selection of in-vertices.
    ///
    /// Selected vertices are renumbered from zero, and the result contains
    /// exactly the edges whose source and destination are both selected.
    /// Explicit lists of vertices must be contiguous increasing ranges, or
    /// [`GraphError::NotARange`] is returned.
    pub fn index<'a, 'b>(
        &self,
        rows: impl Into<Selector<'a>>,
        cols: impl Into<Selector<'b>>,
    ) -> Result<Self, GraphError> {
        let rows = rows.into().resolve(self.matrix.num_rows())?;
        let cols = cols.into().resolve(self.matrix.num_cols())?;
        Ok(Self {
            matrix: self.matrix.submatrix(rows, cols),
        })
    }

    /// Returns the subgraph induced by a selection of vertices, used on both
    /// sides.
    ///
    /// See [`index`](Self::index).
    pub fn subgraph<'a>(&self, vertices: impl Into<Selector<'a>>) -> Result<Self, GraphError> {
        let vertices = vertices.into();
        self.index(vertices.clone(), vertices)
    }

    fn reduce(
        &self,
        dir: Direction,
        transform: impl Fn(f64) -> f64 + Sync + Copy,
        add: impl Fn(f64, f64) -> f64 + Sync + Copy,
    ) -> Result<Box<[f64]>, GraphError> {
        match dir {
            Direction::Out => Ok(self.matrix.reduce_rows(transform, add)),
            Direction::In => Ok(self.matrix.reduce_cols(transform, add)),
            Direction::InOut => {
                if !self.is_square() {
                    return Err(GraphError::NotSquare(self.num_vertices()));
                }
                let mut out = self.matrix.reduce_rows(transform, add);
                let inn = self.matrix.reduce_cols(transform, add);
                for (o, i) in out.iter_mut().zip(inn.iter()) {
                    *o = add(*o, *i);
                }
                Ok(out)
            }
        }
    }

    /// Returns, for each vertex, the number of edges with nonzero weight in
    /// the given direction.
    ///
    /// With [`Direction::InOut`] the out- and in-degree are summed, so a
    /// self-loop counts twice.
    pub fn degree(&self, dir: Direction) -> Result<Box<[usize]>, GraphError> {
        Ok(self
            .reduce(dir, |w| if w != 0.0 { 1.0 } else { 0.0 }, |a, b| a + b)?
            .iter()
            .map(|&d| d as usize)
            .collect())
    }

    /// Returns, for each vertex, the sum of the weights of its edges in the
    /// given direction.
    pub fn sum(&self, dir: Direction) -> Result<Box<[f64]>, GraphError> {
        self.reduce(dir, |w| w, |a, b| a + b)
    }

    /// Returns, for each vertex, the maximum weight of its edges in the given
    /// direction, or zero if it has no such edges.
    pub fn max(&self, dir: Direction) -> Result<Box<[f64]>, GraphError> {
        self.reduce(dir, |w| w, f64::max)
    }

    /// Returns, for each vertex, the minimum weight of its edges in the given
    /// direction, or zero if it has no such edges.
    pub fn min(&self, dir: Direction) -> Result<Box<[f64]>, GraphError> {
        self.reduce(dir, |w| w, f64::min)
    }

    /// Removes all self-loops, in place.
    pub fn remove_self_loops(&mut self) {
        self.matrix.remove_diagonal();
    }

    /// Returns the graph with all edges reversed.
    pub fn transposed(&self) -> Self {
        Self {
            matrix: self.matrix.transpose(),
        }
    }

    /// Reverses all edges, in place. Applying it twice yields the original
    /// graph.
    pub fn transpose_in_place(&mut self) {
        self.matrix = self.matrix.transpose();
    }

    /// Alias for [`transpose_in_place`](Self::transpose_in_place).
    pub fn reverse_edges(&mut self) {
        self.transpose_in_place();
    }

    /// Multiplies, in place, the weights of the out-edges (or in-edges) of
    /// each vertex *v* by `factors[v]`.
    ///
    /// Edges of vertices without an entry in `factors` are left untouched.
    /// [`Direction::InOut`] is not accepted.
    pub fn scale_edges(
        &mut self,
        factors: &SparseVec<f64>,
        dir: Direction,
    ) -> Result<(), GraphError> {
        let expected = match dir {
            Direction::Out => self.matrix.num_rows(),
            Direction::In => self.matrix.num_cols(),
            Direction::InOut => return Err(GraphError::InvalidDirection(dir)),
        };
        if factors.len() != expected {
            return Err(GraphError::VectorLength {
                got: factors.len(),
                expected,
            });
        }
        let factors = factors.to_options();
        match dir {
            Direction::Out => self.matrix.scale_rows(&factors),
            _ => self.matrix.scale_cols(&factors),
        }
        Ok(())
    }

    /// Sets the weight of each nonzero out-edge of each vertex *v* to
    /// 1 / outdegree(*v*), in place.
    pub fn normalize_edge_weights(&mut self) {
        let inv_degrees: Vec<Option<f64>> = self
            .matrix
            .reduce_rows(|w| if w != 0.0 { 1.0 } else { 0.0 }, |a, b| a + b)
            .iter()
            .map(|&d| (d != 0.0).then(|| 1.0 / d))
            .collect();
        self.matrix.apply(|w| if w != 0.0 { 1.0 } else { 0.0 });
        self.matrix.scale_rows(&inv_degrees);
    }

    /// Drops the edge weights, keeping only the presence of edges: every edge
    /// weighs one afterwards.
    pub fn to_boolean_weights(&mut self) {
        self.matrix.to_boolean();
    }

    /// Returns true if only the presence of edges is stored.
    pub fn has_boolean_weights(&self) -> bool {
        self.matrix.is_boolean()
    }

    /// Sets the weight of every edge to the given value, in place.
    pub fn set_all_weights(&mut self, weight: f64) {
        self.matrix.fill_weights(weight);
    }

    /// Sets the weight of every edge to one, in place.
    pub fn ones(&mut self) {
        self.set_all_weights(1.0);
    }

    /// Returns the edges as (sources, destinations, weights), in the
    /// row-major order of the adjacency matrix.
    pub fn decompose(&self) -> (Vec<usize>, Vec<usize>, Vec<f64>) {
        self.matrix.triples()
    }

    /// Returns the product of the adjacency matrices of two graphs over the
    /// (+, ×) semiring.
    ///
    /// The weight of the edge from *i* to *j* in the result is the sum, over
    /// all two-edge paths *i* → *k* → *j* with the first edge in `self` and the
    /// second in `other`, of the product of the weights.
    pub fn spmm(&self, other: &Self) -> Result<Self, GraphError> {
        if self.matrix.num_cols() != other.matrix.num_rows() {
            return Err(GraphError::InnerDimensionMismatch {
                first: self.matrix.num_cols(),
                second: other.matrix.num_rows(),
            });
        }
        Ok(Self {
            matrix: self.matrix.spmm(&other.matrix),
        })
    }
}

impl MulAssign<f64> for DiGraph {
    fn mul_assign(&mut self, rhs: f64) {
        self.scale_by_scalar(rhs);
    }
}

impl DivAssign<f64> for DiGraph {
    fn div_assign(&mut self, rhs: f64) {
        self.divide_by_scalar(rhs);
    }
}

impl Display for DiGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.matrix.num_rows() == 0 && self.matrix.num_cols() == 0 {
            return f.write_str("Null DiGraph object");
        }
        write!(
            f,
            "DiGraph with {} vertices and {} edges",
            self.num_vertices(),
            self.num_edges()
        )?;
        if self.num_edges() < Self::DISPLAY_MAX_EDGES {
            let (sources, dests, weights) = self.decompose();
            for ((s, d), w) in sources.iter().zip(&dests).zip(&weights) {
                write!(f, "\n{s} {d} {w}")?;
            }
        }
        Ok(())
    }
}
