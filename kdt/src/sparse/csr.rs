/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{Semiring, SparseVec};
use crate::utils::RAYON_MIN_LEN;
use itertools::{EitherOrBoth, Itertools};
use rayon::prelude::*;
use std::ops::Range;

/// The weights of the stored entries of a [`SparseMatrix`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Weights {
    /// Only the pattern is stored, and every stored entry weighs one.
    Boolean,
    /// One weight per stored entry, parallel to the column indices.
    Real(Vec<f64>),
}

/// A Compressed Sparse Row (CSR) matrix of `f64` weights.
///
/// Rows are stored contiguously, and the column indices of each row are
/// strictly increasing, so there is at most one stored entry per position.
/// Entries may be explicitly zero (e.g., when duplicates sum to zero);
/// operations documented as counting or masking by _nonzero_ entries ignore
/// them.
///
/// Every operation producing a new matrix or vector is row-parallel and
/// returns only when all rows have been processed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    num_rows: usize,
    num_cols: usize,
    /// The first offset is always zero, and offsets contains one more element
    /// than the number of rows.
    offsets: Vec<usize>,
    cols: Vec<usize>,
    weights: Weights,
}

impl Default for SparseMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// Iterator over the (column, weight) pairs of a row of a [`SparseMatrix`].
#[derive(Debug, Clone)]
pub struct Row<'a> {
    cols: std::slice::Iter<'a, usize>,
    weights: Option<std::slice::Iter<'a, f64>>,
}

impl Iterator for Row<'_> {
    type Item = (usize, f64);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let col = *self.cols.next()?;
        let weight = match &mut self.weights {
            Some(weights) => *weights.next()?,
            None => 1.0,
        };
        Some((col, weight))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cols.size_hint()
    }
}

impl ExactSizeIterator for Row<'_> {}

impl SparseMatrix {
    /// Creates a matrix with the given dimensions and no stored entries.
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        Self {
            num_rows,
            num_cols,
            offsets: vec![0; num_rows + 1],
            cols: Vec::new(),
            weights: Weights::Real(Vec::new()),
        }
    }

    /// Creates a matrix from (row, column, weight) triples.
    ///
    /// Weights of triples with the same row and column are summed.
    ///
    /// # Panics
    ///
    /// Panics if the three slices have different lengths, or if some index
    /// is out of bounds. Callers exposing this constructor to users are
    /// expected to validate the input first.
    pub fn from_triples(
        num_rows: usize,
        num_cols: usize,
        rows: &[usize],
        cols: &[usize],
        weights: &[f64],
    ) -> Self {
        assert_eq!(rows.len(), cols.len(), "Row and column lists differ in length");
        assert_eq!(rows.len(), weights.len(), "Index and weight lists differ in length");
        assert!(
            rows.iter().all(|&r| r < num_rows),
            "Row index out of bounds (the matrix has {num_rows} rows)"
        );
        assert!(
            cols.iter().all(|&c| c < num_cols),
            "Column index out of bounds (the matrix has {num_cols} columns)"
        );

        let mut order: Vec<usize> = (0..rows.len()).collect();
        // Stable, so that duplicates are summed in input order
        order.par_sort_by_key(|&k| (rows[k], cols[k]));

        let mut offsets = vec![0; num_rows + 1];
        let mut out_cols = Vec::with_capacity(order.len());
        let mut out_weights = Vec::with_capacity(order.len());

        for ((row, col), weight) in order
            .into_iter()
            .map(|k| ((rows[k], cols[k]), weights[k]))
            .coalesce(|(p, w0), (q, w1)| {
                if p == q {
                    Ok((p, w0 + w1))
                } else {
                    Err(((p, w0), (q, w1)))
                }
            })
        {
            offsets[row + 1] += 1;
            out_cols.push(col);
            out_weights.push(weight);
        }
        for i in 0..num_rows {
            offsets[i + 1] += offsets[i];
        }

        Self {
            num_rows,
            num_cols,
            offsets,
            cols: out_cols,
            weights: Weights::Real(out_weights),
        }
    }

    /// Assembles a matrix from per-row lists of (column, weight) pairs with
    /// strictly increasing columns.
    pub(crate) fn from_rows(
        num_rows: usize,
        num_cols: usize,
        rows: Vec<Vec<(usize, f64)>>,
    ) -> Self {
        debug_assert_eq!(rows.len(), num_rows);
        let mut offsets = Vec::with_capacity(num_rows + 1);
        offsets.push(0);
        let nnz = rows.iter().map(Vec::len).sum();
        let mut cols = Vec::with_capacity(nnz);
        let mut weights = Vec::with_capacity(nnz);
        for row in rows {
            debug_assert!(row.windows(2).all(|w| w[0].0 < w[1].0));
            for (col, weight) in row {
                cols.push(col);
                weights.push(weight);
            }
            offsets.push(cols.len());
        }
        Self {
            num_rows,
            num_cols,
            offsets,
            cols,
            weights: Weights::Real(weights),
        }
    }

    /// Returns the number of rows.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns the number of stored entries.
    pub fn nnz(&self) -> usize {
        self.cols.len()
    }

    /// Returns the weight representation.
    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Returns true if only the pattern is stored.
    pub fn is_boolean(&self) -> bool {
        matches!(self.weights, Weights::Boolean)
    }

    #[inline(always)]
    fn row_range(&self, row: usize) -> Range<usize> {
        self.offsets[row]..self.offsets[row + 1]
    }

    /// Returns the column indices of the stored entries of a row.
    pub fn row_cols(&self, row: usize) -> &[usize] {
        &self.cols[self.row_range(row)]
    }

    /// Iterates over the (column, weight) pairs of a row.
    pub fn row(&self, row: usize) -> Row<'_> {
        let range = self.row_range(row);
        Row {
            cols: self.cols[range.clone()].iter(),
            weights: match &self.weights {
                Weights::Boolean => None,
                Weights::Real(w) => Some(w[range].iter()),
            },
        }
    }

    /// Returns the weight stored at the given position, if any.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        let range = self.row_range(row);
        let pos = self.cols[range.clone()].binary_search(&col).ok()?;
        Some(match &self.weights {
            Weights::Boolean => 1.0,
            Weights::Real(w) => w[range.start + pos],
        })
    }

    /// Extracts the stored entries as (rows, columns, weights), in row-major
    /// order.
    pub fn triples(&self) -> (Vec<usize>, Vec<usize>, Vec<f64>) {
        let mut rows = Vec::with_capacity(self.nnz());
        let mut weights = Vec::with_capacity(self.nnz());
        for i in 0..self.num_rows {
            for (_, w) in self.row(i) {
                rows.push(i);
                weights.push(w);
            }
        }
        (rows, self.cols.clone(), weights)
    }

    /// Returns the transpose of this matrix, keeping the weight
    /// representation.
    pub fn transpose(&self) -> Self {
        let nnz = self.nnz();
        let mut offsets = vec![0; self.num_cols + 1];
        for &c in &self.cols {
            offsets[c + 1] += 1;
        }
        for j in 0..self.num_cols {
            offsets[j + 1] += offsets[j];
        }

        let mut next = offsets.clone();
        let mut cols = vec![0; nnz];
        let mut weights = match &self.weights {
            Weights::Boolean => None,
            Weights::Real(_) => Some(vec![0.0; nnz]),
        };

        // Rows are scanned in increasing order, so columns of the transpose
        // come out sorted
        for i in 0..self.num_rows {
            for k in self.row_range(i) {
                let c = self.cols[k];
                let pos = next[c];
                next[c] += 1;
                cols[pos] = i;
                if let (Some(dst), Weights::Real(src)) = (&mut weights, &self.weights) {
                    dst[pos] = src[k];
                }
            }
        }

        Self {
            num_rows: self.num_cols,
            num_cols: self.num_rows,
            offsets,
            cols,
            weights: weights.map_or(Weights::Boolean, Weights::Real),
        }
    }

    /// Returns the submatrix made of the given ranges of rows and columns,
    /// renumbered from zero.
    ///
    /// # Panics
    ///
    /// Panics if a range exceeds the corresponding dimension.
    pub fn submatrix(&self, rows: Range<usize>, cols: Range<usize>) -> Self {
        assert!(rows.end <= self.num_rows, "Row range {rows:?} out of bounds");
        assert!(cols.end <= self.num_cols, "Column range {cols:?} out of bounds");
        let num_rows = rows.len();
        let mut offsets = Vec::with_capacity(num_rows + 1);
        offsets.push(0);
        let mut out_cols = Vec::new();
        let mut out_weights = Vec::new();
        for i in rows {
            let range = self.row_range(i);
            let row_cols = &self.cols[range.clone()];
            let start = row_cols.partition_point(|&c| c < cols.start);
            let end = row_cols.partition_point(|&c| c < cols.end);
            out_cols.extend(row_cols[start..end].iter().map(|&c| c - cols.start));
            if let Weights::Real(w) = &self.weights {
                out_weights.extend_from_slice(&w[range.start + start..range.start + end]);
            }
            offsets.push(out_cols.len());
        }
        Self {
            num_rows,
            num_cols: cols.len(),
            offsets,
            cols: out_cols,
            weights: match self.weights {
                Weights::Boolean => Weights::Boolean,
                Weights::Real(_) => Weights::Real(out_weights),
            },
        }
    }

    /// Returns the weights, switching to a real representation if needed.
    fn real_weights_mut(&mut self) -> &mut Vec<f64> {
        if let Weights::Boolean = self.weights {
            self.weights = Weights::Real(vec![1.0; self.cols.len()]);
        }
        match &mut self.weights {
            Weights::Real(w) => w,
            Weights::Boolean => unreachable!(),
        }
    }

    /// Applies a function to every stored weight.
    pub fn apply(&mut self, f: impl Fn(f64) -> f64 + Sync + Send) {
        self.real_weights_mut()
            .par_iter_mut()
            .with_min_len(RAYON_MIN_LEN)
            .for_each(|w| *w = f(*w));
    }

    /// Sets every stored weight to the given value.
    pub fn fill_weights(&mut self, value: f64) {
        self.weights = Weights::Real(vec![value; self.cols.len()]);
    }

    /// Drops the weights, keeping only the pattern.
    pub fn to_boolean(&mut self) {
        self.weights = Weights::Boolean;
    }

    /// Keeps only the entries satisfying the predicate, which receives row,
    /// column and weight.
    pub fn retain(&mut self, mut f: impl FnMut(usize, usize, f64) -> bool) {
        let mut write = 0;
        let mut start = 0;
        for i in 0..self.num_rows {
            let end = self.offsets[i + 1];
            for read in start..end {
                let col = self.cols[read];
                let weight = match &self.weights {
                    Weights::Boolean => 1.0,
                    Weights::Real(w) => w[read],
                };
                if f(i, col, weight) {
                    self.cols[write] = col;
                    if let Weights::Real(w) = &mut self.weights {
                        w[write] = weight;
                    }
                    write += 1;
                }
            }
            start = end;
            self.offsets[i + 1] = write;
        }
        self.cols.truncate(write);
        if let Weights::Real(w) = &mut self.weights {
            w.truncate(write);
        }
    }

    /// Removes all diagonal entries.
    pub fn remove_diagonal(&mut self) {
        self.retain(|i, j, _| i != j);
    }

    /// Multiplies the weights of each row by a per-row factor; rows whose
    /// factor is `None` are left untouched.
    ///
    /// # Panics
    ///
    /// Panics if the number of factors differs from the number of rows.
    pub fn scale_rows(&mut self, factors: &[Option<f64>]) {
        assert_eq!(factors.len(), self.num_rows);
        let offsets = std::mem::take(&mut self.offsets);
        let weights = self.real_weights_mut();
        for (i, factor) in factors.iter().enumerate() {
            if let Some(factor) = factor {
                for w in &mut weights[offsets[i]..offsets[i + 1]] {
                    *w *= factor;
                }
            }
        }
        self.offsets = offsets;
    }

    /// Multiplies the weights of each column by a per-column factor; columns
    /// whose factor is `None` are left untouched.
    ///
    /// # Panics
    ///
    /// Panics if the number of factors differs from the number of columns.
    pub fn scale_cols(&mut self, factors: &[Option<f64>]) {
        assert_eq!(factors.len(), self.num_cols);
        let cols = std::mem::take(&mut self.cols);
        self.real_weights_mut()
            .par_iter_mut()
            .with_min_len(RAYON_MIN_LEN)
            .zip(cols.par_iter())
            .for_each(|(w, &c)| {
                if let Some(factor) = factors[c] {
                    *w *= factor;
                }
            });
        self.cols = cols;
    }

    /// Merges two matrices with the same dimensions position by position.
    ///
    /// For each position where at least one of the matrices has a stored
    /// entry, `f` receives the two weights (`None` if missing) and returns the
    /// weight of the result, or `None` to leave the position empty.
    pub fn zip_with(
        &self,
        other: &Self,
        f: impl Fn(Option<f64>, Option<f64>) -> Option<f64> + Sync,
    ) -> Self {
        assert_eq!(
            (self.num_rows, self.num_cols),
            (other.num_rows, other.num_cols),
            "Matrices have different dimensions"
        );
        let rows: Vec<Vec<(usize, f64)>> = (0..self.num_rows)
            .into_par_iter()
            .with_min_len(RAYON_MIN_LEN)
            .map(|i| {
                self.row(i)
                    .merge_join_by(other.row(i), |(a, _), (b, _)| a.cmp(b))
                    .filter_map(|either| {
                        let (col, weight) = match either {
                            EitherOrBoth::Both((c, a), (_, b)) => (c, f(Some(a), Some(b))),
                            EitherOrBoth::Left((c, a)) => (c, f(Some(a), None)),
                            EitherOrBoth::Right((c, b)) => (c, f(None, Some(b))),
                        };
                        weight.map(|w| (col, w))
                    })
                    .collect()
            })
            .collect();
        Self::from_rows(self.num_rows, self.num_cols, rows)
    }

    /// Returns the element-wise combination of two matrices on the union of
    /// their patterns, with missing entries treated as zero.
    pub fn ewise_union(&self, other: &Self, op: impl Fn(f64, f64) -> f64 + Sync) -> Self {
        self.zip_with(other, |a, b| match (a, b) {
            (None, None) => None,
            (a, b) => Some(op(a.unwrap_or(0.0), b.unwrap_or(0.0))),
        })
    }

    /// Returns the element-wise combination of two matrices on the
    /// intersection of their patterns.
    pub fn ewise_intersection(&self, other: &Self, op: impl Fn(f64, f64) -> f64 + Sync) -> Self {
        self.zip_with(other, |a, b| Some(op(a?, b?)))
    }

    /// Returns the entries of this matrix at positions where `mask` has no
    /// nonzero entry.
    pub fn ewise_mask_not(&self, mask: &Self) -> Self {
        self.zip_with(mask, |a, b| match b {
            Some(b) if b != 0.0 => None,
            _ => a,
        })
    }

    /// Reduces each row to a value: stored weights are mapped by `transform`
    /// and then combined by `add`. Rows without stored entries reduce to
    /// zero.
    pub fn reduce_rows(
        &self,
        transform: impl Fn(f64) -> f64 + Sync,
        add: impl Fn(f64, f64) -> f64 + Sync,
    ) -> Box<[f64]> {
        (0..self.num_rows)
            .into_par_iter()
            .with_min_len(RAYON_MIN_LEN)
            .map(|i| {
                self.row(i)
                    .map(|(_, w)| transform(w))
                    .reduce(&add)
                    .unwrap_or(0.0)
            })
            .collect::<Vec<_>>()
            .into_boxed_slice()
    }

    /// Reduces each column to a value, with the same conventions as
    /// [`reduce_rows`](Self::reduce_rows).
    pub fn reduce_cols(
        &self,
        transform: impl Fn(f64) -> f64 + Sync,
        add: impl Fn(f64, f64) -> f64 + Sync,
    ) -> Box<[f64]> {
        self.transpose().reduce_rows(transform, add)
    }

    /// Multiplies this matrix by a sparse vector over a semiring.
    ///
    /// The result has an entry at row *i* if and only if row *i* has a stored
    /// entry in a column where `x` has an entry.
    ///
    /// # Panics
    ///
    /// Panics if the length of `x` differs from the number of columns.
    pub fn mxv<S: Semiring>(&self, x: &SparseVec<S::Value>, semiring: &S) -> SparseVec<S::Value> {
        assert_eq!(
            x.len(),
            self.num_cols,
            "Vector length ({}) does not match the number of columns ({})",
            x.len(),
            self.num_cols
        );
        if x.is_empty() {
            return SparseVec::new(self.num_rows);
        }
        let lookup = x.to_options();
        let (indices, values): (Vec<usize>, Vec<S::Value>) = (0..self.num_rows)
            .into_par_iter()
            .with_min_len(RAYON_MIN_LEN)
            .filter_map(|i| {
                let mut acc: Option<S::Value> = None;
                for (j, w) in self.row(i) {
                    if let Some(xj) = lookup[j] {
                        let p = semiring.multiply(w, xj);
                        acc = Some(match acc {
                            None => p,
                            Some(a) => semiring.add(a, p),
                        });
                    }
                }
                acc.map(|v| (i, v))
            })
            .unzip();
        SparseVec::from_sorted_parts(self.num_rows, indices, values)
    }

    /// Multiplies this matrix by a dense vector over a semiring.
    ///
    /// Rows without stored entries yield the [zero](Semiring::zero) of the
    /// semiring.
    ///
    /// # Panics
    ///
    /// Panics if the length of `x` differs from the number of columns.
    pub fn mxv_dense<S: Semiring>(&self, x: &[S::Value], semiring: &S) -> Box<[S::Value]> {
        assert_eq!(
            x.len(),
            self.num_cols,
            "Vector length ({}) does not match the number of columns ({})",
            x.len(),
            self.num_cols
        );
        (0..self.num_rows)
            .into_par_iter()
            .with_min_len(RAYON_MIN_LEN)
            .map(|i| {
                self.row(i).fold(semiring.zero(), |acc, (j, w)| {
                    semiring.add(acc, semiring.multiply(w, x[j]))
                })
            })
            .collect::<Vec<_>>()
            .into_boxed_slice()
    }

    /// Multiplies this matrix by another one over the (+, ×) semiring.
    ///
    /// Each row of the result is accumulated independently (Gustavson's
    /// algorithm).
    ///
    /// # Panics
    ///
    /// Panics if the number of columns of this matrix differs from the number
    /// of rows of `other`.
    pub fn spmm(&self, other: &Self) -> Self {
        assert_eq!(
            self.num_cols, other.num_rows,
            "Inner dimensions do not match ({} != {})",
            self.num_cols, other.num_rows
        );
        let rows: Vec<Vec<(usize, f64)>> = (0..self.num_rows)
            .into_par_iter()
            .with_min_len(RAYON_MIN_LEN)
            .map(|i| {
                let mut acc: Vec<(usize, f64)> = self
                    .row(i)
                    .flat_map(|(k, a)| other.row(k).map(move |(j, b)| (j, a * b)))
                    .collect();
                acc.sort_by_key(|&(j, _)| j);
                acc.into_iter()
                    .coalesce(|(j0, w0), (j1, w1)| {
                        if j0 == j1 {
                            Ok((j0, w0 + w1))
                        } else {
                            Err(((j0, w0), (j1, w1)))
                        }
                    })
                    .collect()
            })
            .collect();
        Self::from_rows(self.num_rows, other.num_cols, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sparse::{PlusTimes, SelectMax};

    fn sample() -> SparseMatrix {
        // 0 → 1 (2.0), 0 → 2 (1.0), 2 → 0 (5.0), 2 → 2 (3.0)
        SparseMatrix::from_triples(3, 3, &[0, 2, 0, 2], &[2, 0, 1, 2], &[1.0, 5.0, 2.0, 3.0])
    }

    #[test]
    fn test_from_triples_sums_duplicates() {
        let m = SparseMatrix::from_triples(
            2,
            3,
            &[1, 0, 1, 1],
            &[2, 1, 2, 0],
            &[1.5, 1.0, 2.0, 4.0],
        );
        assert_eq!(m.nnz(), 3);
        assert_eq!(m.get(1, 2), Some(3.5));
        assert_eq!(m.get(1, 0), Some(4.0));
        assert_eq!(m.get(0, 0), None);
        assert_eq!(m.row_cols(1), &[0, 2]);
    }

    #[test]
    #[should_panic]
    fn test_from_triples_out_of_bounds() {
        let _ = SparseMatrix::from_triples(2, 2, &[0], &[2], &[1.0]);
    }

    #[test]
    fn test_transpose_involution() {
        let m = sample();
        let t = m.transpose();
        assert_eq!(t.get(1, 0), Some(2.0));
        assert_eq!(t.get(0, 2), Some(5.0));
        assert_eq!(t.transpose(), m);

        let mut b = sample();
        b.to_boolean();
        assert!(b.transpose().is_boolean());
        assert_eq!(b.transpose().transpose(), b);
    }

    #[test]
    fn test_triples_are_row_major() {
        let (r, c, w) = sample().triples();
        assert_eq!(r, vec![0, 0, 2, 2]);
        assert_eq!(c, vec![1, 2, 0, 2]);
        assert_eq!(w, vec![2.0, 1.0, 5.0, 3.0]);
    }

    #[test]
    fn test_submatrix() {
        let s = sample().submatrix(1..3, 0..2);
        assert_eq!((s.num_rows(), s.num_cols()), (2, 2));
        assert_eq!(s.nnz(), 1);
        assert_eq!(s.get(1, 0), Some(5.0));
    }

    #[test]
    fn test_retain_and_diagonal() {
        let mut m = sample();
        m.remove_diagonal();
        assert_eq!(m.nnz(), 3);
        assert_eq!(m.get(2, 2), None);
        assert_eq!(m.get(2, 0), Some(5.0));
    }

    #[test]
    fn test_zip_operations() {
        let a = sample();
        let b = SparseMatrix::from_triples(3, 3, &[0, 1], &[1, 1], &[4.0, 1.0]);
        let sum = a.ewise_union(&b, |x, y| x + y);
        assert_eq!(sum.nnz(), 5);
        assert_eq!(sum.get(0, 1), Some(6.0));
        assert_eq!(sum.get(1, 1), Some(1.0));
        let prod = a.ewise_intersection(&b, |x, y| x * y);
        assert_eq!(prod.nnz(), 1);
        assert_eq!(prod.get(0, 1), Some(8.0));
        let masked = a.ewise_mask_not(&b);
        assert_eq!(masked.nnz(), 3);
        assert_eq!(masked.get(0, 1), None);
        assert_eq!(a.ewise_mask_not(&a).nnz(), 0);
    }

    #[test]
    fn test_reductions() {
        let m = sample();
        assert_eq!(&*m.reduce_rows(|w| w, |a, b| a + b), &[3.0, 0.0, 8.0]);
        assert_eq!(&*m.reduce_cols(|w| w, f64::max), &[5.0, 2.0, 3.0]);
    }

    #[test]
    fn test_scaling() {
        let mut m = sample();
        m.scale_rows(&[Some(2.0), None, None]);
        assert_eq!(m.get(0, 1), Some(4.0));
        assert_eq!(m.get(2, 0), Some(5.0));
        m.scale_cols(&[Some(0.5), None, None]);
        assert_eq!(m.get(2, 0), Some(2.5));
    }

    #[test]
    fn test_mxv_select_max() {
        // Column j of the transpose lists the successors of j
        let t = sample().transpose();
        let frontier = SparseVec::from_pairs(3, [(0, 0), (2, 2)]);
        let next = t.mxv(&frontier, &SelectMax);
        // 1 is reached from 0, 0 from 2, 2 from both 0 and 2
        assert_eq!(next.indices(), &[0, 1, 2]);
        assert_eq!(next.values(), &[2, 0, 2]);
    }

    #[test]
    fn test_mxv_dense_plus_times() {
        let y = sample().mxv_dense(&[1.0, 1.0, 2.0], &PlusTimes);
        assert_eq!(&*y, &[4.0, 0.0, 11.0]);
    }

    #[test]
    fn test_spmm() {
        let m = sample();
        let p = m.spmm(&m);
        // (0 → 2 → 0) 1·5, (0 → 2 → 2) 1·3, (2 → 0 → 1) 5·2,
        // (2 → 0 → 2) 5·1 + (2 → 2 → 2) 3·3
        assert_eq!(p.get(0, 0), Some(5.0));
        assert_eq!(p.get(0, 2), Some(3.0));
        assert_eq!(p.get(2, 1), Some(10.0));
        assert_eq!(p.get(2, 2), Some(14.0));
        assert_eq!(p.get(2, 0), Some(15.0));
        assert_eq!(p.nnz(), 5);
    }
}
