/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Semirings for matrix products.
//!
//! A semiring replaces the ordinary (+, ×) pair in a matrix product: the
//! product of a matrix *A* and a vector **x** computes, for each row *i*,
//!
//! > *yᵢ* = ⊕_(*j*) *aᵢⱼ* ⊗ *xⱼ*,
//!
//! where the sum ranges over the stored entries of row *i*. The left operand
//! of ⊗ is always an edge weight; the right operand and the result live in
//! the [value type](Semiring::Value) of the semiring.
//!
//! | Semiring       | ⊗                | ⊕     | Zero | Use                         |
//! |----------------|------------------|-------|------|-----------------------------|
//! | [`PlusTimes`]  | *a* · *x*        | +     | 0    | path counting, PageRank     |
//! | [`SelectMax`]  | *x* (select 2nd) | max   | 0    | first-arrival propagation   |

/// A semiring used by matrix products.
///
/// Products on sparse operands only combine stored entries, so
/// [`zero`](Semiring::zero) is used just by dense products, as the value of
/// rows without contributions.
pub trait Semiring: Sync {
    /// The type of vector entries and of results.
    type Value: Copy + Send + Sync;

    /// The identity of [`add`](Semiring::add).
    fn zero(&self) -> Self::Value;

    /// Combines an edge weight with a vector entry (⊗).
    fn multiply(&self, weight: f64, x: Self::Value) -> Self::Value;

    /// Aggregates two partial results (⊕).
    fn add(&self, a: Self::Value, b: Self::Value) -> Self::Value;
}

/// The usual arithmetic semiring over `f64`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlusTimes;

impl Semiring for PlusTimes {
    type Value = f64;

    #[inline(always)]
    fn zero(&self) -> f64 {
        0.0
    }

    #[inline(always)]
    fn multiply(&self, weight: f64, x: f64) -> f64 {
        weight * x
    }

    #[inline(always)]
    fn add(&self, a: f64, b: f64) -> f64 {
        a + b
    }
}

/// The select-max semiring over vertex identifiers.
///
/// Multiplication ignores the edge weight and selects the vector entry;
/// addition keeps the maximum. Propagating a frontier whose values are vertex
/// identifiers thus assigns to each reached vertex the greatest identifier
/// among the frontier vertices reaching it. The result does not depend on
/// the order in which rows are split among threads, so ties are always
/// resolved in the same way.
///
/// Since ⊗ ignores weights, the semiring behaves identically on real and on
/// [boolean](crate::sparse::Weights::Boolean) matrices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectMax;

impl Semiring for SelectMax {
    type Value = usize;

    #[inline(always)]
    fn zero(&self) -> usize {
        0
    }

    #[inline(always)]
    fn multiply(&self, _weight: f64, x: usize) -> usize {
        x
    }

    #[inline(always)]
    fn add(&self, a: usize, b: usize) -> usize {
        a.max(b)
    }
}
