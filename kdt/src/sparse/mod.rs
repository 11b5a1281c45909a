/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The sparse linear-algebra substrate.
//!
//! [`SparseMatrix`] is a compressed-sparse-row matrix of `f64` weights
//! supporting semiring products with [sparse](SparseMatrix::mxv) and
//! [dense](SparseMatrix::mxv_dense) vectors, the (+, ×) [matrix
//! product](SparseMatrix::spmm), row and column reductions, element-wise
//! combinations and transposition. [`SparseVec`] is the sparse vector used as
//! traversal frontier.

mod csr;
pub use csr::*;

mod semiring;
pub use semiring::*;

mod vector;
pub use vector::*;
