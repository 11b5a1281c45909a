/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Directed graphs backed by sparse matrices.

use std::fmt::Display;
use std::ops::Range;
use thiserror::Error;

mod digraph;
pub use digraph::*;

mod generators;

pub mod matrix_market;

/// A direction of edges, used by reductions and scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Out-edges (rows of the adjacency matrix).
    Out,
    /// In-edges (columns of the adjacency matrix).
    In,
    /// Both directions; the per-direction results are combined. Only valid on
    /// square graphs.
    InOut,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Out => f.write_str("out"),
            Direction::In => f.write_str("in"),
            Direction::InOut => f.write_str("in-out"),
        }
    }
}

/// The number of vertices of a graph.
///
/// Graphs are usually square, that is, the same vertices can have out- and
/// in-edges; graphs built by [indexing](DiGraph::index) with different
/// selectors, or by rectangular constructors, have distinct numbers of
/// vertices on the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexCount {
    /// The same number of out- and in-vertices.
    Square(usize),
    /// Different numbers of out-vertices (rows) and in-vertices (columns).
    Rectangular { num_out: usize, num_in: usize },
}

impl VertexCount {
    pub(crate) fn new(num_out: usize, num_in: usize) -> Self {
        if num_out == num_in {
            VertexCount::Square(num_out)
        } else {
            VertexCount::Rectangular { num_out, num_in }
        }
    }

    /// Returns the number of out-vertices.
    pub fn num_out(&self) -> usize {
        match *self {
            VertexCount::Square(n) => n,
            VertexCount::Rectangular { num_out, .. } => num_out,
        }
    }

    /// Returns the number of in-vertices.
    pub fn num_in(&self) -> usize {
        match *self {
            VertexCount::Square(n) => n,
            VertexCount::Rectangular { num_in, .. } => num_in,
        }
    }
}

impl Display for VertexCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VertexCount::Square(n) => write!(f, "{n}"),
            VertexCount::Rectangular { num_out, num_in } => write!(f, "({num_out}, {num_in})"),
        }
    }
}

/// Edge weights passed to [`DiGraph::from_triples`]: either a single value
/// for all edges, or one value per edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeWeights<'a> {
    /// The same weight for every edge.
    Scalar(f64),
    /// One weight per edge.
    PerEdge(&'a [f64]),
}

impl From<f64> for EdgeWeights<'_> {
    fn from(value: f64) -> Self {
        EdgeWeights::Scalar(value)
    }
}

impl<'a> From<&'a [f64]> for EdgeWeights<'a> {
    fn from(value: &'a [f64]) -> Self {
        EdgeWeights::PerEdge(value)
    }
}

impl<'a> From<&'a Vec<f64>> for EdgeWeights<'a> {
    fn from(value: &'a Vec<f64>) -> Self {
        EdgeWeights::PerEdge(value)
    }
}

impl<'a, const N: usize> From<&'a [f64; N]> for EdgeWeights<'a> {
    fn from(value: &'a [f64; N]) -> Self {
        EdgeWeights::PerEdge(value)
    }
}

/// Selects the vertices on one side of a graph for [indexing](DiGraph::index).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector<'a> {
    /// All vertices.
    All,
    /// A single vertex.
    Vertex(usize),
    /// A range of vertices.
    Range(Range<usize>),
    /// An explicit list of vertices, which must be a contiguous, strictly
    /// increasing sequence.
    List(&'a [usize]),
}

impl Selector<'_> {
    /// Resolves the selector to a range of vertices in a side with `n`
    /// vertices.
    pub(crate) fn resolve(&self, n: usize) -> Result<Range<usize>, GraphError> {
        let range = match self {
            Selector::All => 0..n,
            Selector::Vertex(v) => *v..v.saturating_add(1),
            Selector::Range(range) => range.clone(),
            Selector::List(list) => {
                let Some(&first) = list.first() else {
                    return Ok(0..0);
                };
                let Some(end) = first.checked_add(list.len()) else {
                    return Err(GraphError::SelectorOutOfRange {
                        range: first..usize::MAX,
                        n,
                    });
                };
                if list.iter().zip(first..end).any(|(&v, w)| v != w) {
                    return Err(GraphError::NotARange);
                }
                first..end
            }
        };
        if range.start > range.end || range.end > n {
            return Err(GraphError::SelectorOutOfRange { range, n });
        }
        Ok(range)
    }
}

impl From<usize> for Selector<'_> {
    fn from(value: usize) -> Self {
        Selector::Vertex(value)
    }
}

impl From<Range<usize>> for Selector<'_> {
    fn from(value: Range<usize>) -> Self {
        Selector::Range(value)
    }
}

impl<'a> From<&'a [usize]> for Selector<'a> {
    fn from(value: &'a [usize]) -> Self {
        Selector::List(value)
    }
}

/// Errors raised by graph operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A source vertex is not smaller than the number of out-vertices.
    #[error("Source vertex {vertex} out of range (the graph has {num_out} out-vertices)")]
    SourceOutOfRange { vertex: usize, num_out: usize },

    /// A destination vertex is not smaller than the number of in-vertices.
    #[error("Destination vertex {vertex} out of range (the graph has {num_in} in-vertices)")]
    DestinationOutOfRange { vertex: usize, num_in: usize },

    /// The source, destination and weight lists have different lengths.
    #[error("Triple lists differ in length: {sources}/{dests}/{weights} sources/dests/weights")]
    TripleLengths {
        sources: usize,
        dests: usize,
        weights: usize,
    },

    /// The operands of an element-wise operation have different numbers of
    /// vertices.
    #[error("Graphs must have equal numbers of vertices: {first} != {second}")]
    VertexCountMismatch {
        first: VertexCount,
        second: VertexCount,
    },

    /// The in-vertices of the first operand of a product are not the
    /// out-vertices of the second one.
    #[error("Inner dimensions differ: {first} in-vertices vs {second} out-vertices")]
    InnerDimensionMismatch { first: usize, second: usize },

    /// A vertex list used as selector is not a contiguous increasing range.
    #[error("Vertex list is not a contiguous increasing range")]
    NotARange,

    /// A selector exceeds the vertices of the graph.
    #[error("Selected vertices {range:?} out of range (the side has {n} vertices)")]
    SelectorOutOfRange { range: Range<usize>, n: usize },

    /// The direction is not valid for the operation.
    #[error("Invalid edge direction for this operation: {0}")]
    InvalidDirection(Direction),

    /// The [`InOut`](Direction::InOut) direction was used on a non-square
    /// graph.
    #[error("Direction in-out requires a square graph, but the graph has {0} vertices")]
    NotSquare(VertexCount),

    /// A vector of per-vertex values has the wrong length.
    #[error("Vector length ({got}) does not match the number of vertices ({expected})")]
    VectorLength { got: usize, expected: usize },

    /// A vertex passed as argument is out of range.
    #[error("Vertex {vertex} out of range (the graph has {n} vertices)")]
    VertexOutOfRange { vertex: usize, n: usize },
}
