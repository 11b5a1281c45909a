/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Miscellaneous utilities.

/// Minimum number of rows passed to a Rayon task by row-parallel operations.
///
/// Rows of sparse graphs are short, so splitting below this size costs more
/// in scheduling than it gains in parallelism.
pub const RAYON_MIN_LEN: usize = 1000;

/// Returns the ℓ₁ distance between two vectors of the same length, summed with
/// Kahan compensation.
///
/// # Panics
///
/// Panics if the vectors have different lengths.
pub fn l1_distance(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(
        a.len(),
        b.len(),
        "Vectors have different lengths ({} != {})",
        a.len(),
        b.len()
    );
    let mut sum = kahan::KahanSum::<f64>::new();
    for (x, y) in a.iter().zip(b) {
        sum += (x - y).abs();
    }
    sum.sum()
}
