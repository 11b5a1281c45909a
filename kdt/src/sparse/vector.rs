/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/// A sparse vector: a length and a list of (index, value) pairs sorted by
/// index.
///
/// Sparse vectors are the frontiers of iterative traversals: a stored entry
/// at index *v* means that *v* is active. Depending on the algorithm the value
/// is a parent or source identifier, the index of the vertex itself (see
/// [`to_index_values`](Self::to_index_values)), or irrelevant.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseVec<T> {
    len: usize,
    indices: Vec<usize>,
    values: Vec<T>,
}

impl<T> SparseVec<T> {
    /// Creates a sparse vector of the given length without entries.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Creates a sparse vector with a single entry.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not smaller than `len`.
    pub fn singleton(len: usize, index: usize, value: T) -> Self {
        assert!(
            index < len,
            "Index {index} out of bounds for a vector of length {len}"
        );
        Self {
            len,
            indices: vec![index],
            values: vec![value],
        }
    }

    /// Creates a sparse vector from a list of (index, value) pairs in any
    /// order.
    ///
    /// When an index appears more than once, the last pair wins.
    ///
    /// # Panics
    ///
    /// Panics if some index is not smaller than `len`.
    pub fn from_pairs(len: usize, pairs: impl IntoIterator<Item = (usize, T)>) -> Self {
        let mut pairs: Vec<(usize, T)> = pairs.into_iter().collect();
        for &(index, _) in &pairs {
            assert!(
                index < len,
                "Index {index} out of bounds for a vector of length {len}"
            );
        }
        // Stable, so that among duplicates the last pair comes last
        pairs.sort_by_key(|&(index, _)| index);
        let mut indices: Vec<usize> = Vec::with_capacity(pairs.len());
        let mut values: Vec<T> = Vec::with_capacity(pairs.len());
        for (index, value) in pairs {
            if indices.last() == Some(&index) {
                if let Some(last) = values.last_mut() {
                    *last = value;
                }
            } else {
                indices.push(index);
                values.push(value);
            }
        }
        Self {
            len,
            indices,
            values,
        }
    }

    /// Creates a sparse vector from pairs that are already sorted by strictly
    /// increasing index.
    pub(crate) fn from_sorted_parts(len: usize, indices: Vec<usize>, values: Vec<T>) -> Self {
        debug_assert_eq!(indices.len(), values.len());
        debug_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(indices.last().is_none_or(|&i| i < len));
        Self {
            len,
            indices,
            values,
        }
    }

    /// Returns the length of the vector (not the number of entries).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the vector has no stored entries.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns the number of stored entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Returns the indices of the stored entries, in increasing order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Returns the values of the stored entries, parallel to
    /// [`indices`](Self::indices).
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Returns the value stored at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.indices
            .binary_search(&index)
            .ok()
            .map(|pos| &self.values[pos])
    }

    /// Returns true if there is an entry at `index`.
    pub fn contains(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    /// Iterates over the stored (index, value) pairs in increasing index
    /// order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (usize, &T)> + '_ {
        self.indices.iter().copied().zip(self.values.iter())
    }

    /// Keeps only the entries satisfying the predicate.
    pub fn retain(&mut self, mut f: impl FnMut(usize, &T) -> bool) {
        let mut write = 0;
        for read in 0..self.indices.len() {
            if f(self.indices[read], &self.values[read]) {
                self.indices.swap(write, read);
                self.values.swap(write, read);
                write += 1;
            }
        }
        self.indices.truncate(write);
        self.values.truncate(write);
    }

    /// Returns a vector with the same entries and values mapped by `f`.
    pub fn map<U>(&self, mut f: impl FnMut(usize, &T) -> U) -> SparseVec<U> {
        SparseVec {
            len: self.len,
            indices: self.indices.clone(),
            values: self.iter().map(|(i, v)| f(i, v)).collect(),
        }
    }

    /// Returns a vector with the same entries whose values are their own
    /// indices.
    ///
    /// This is the encoding used to propagate vertex identities through the
    /// [select-max semiring](crate::sparse::SelectMax).
    pub fn to_index_values(&self) -> SparseVec<usize> {
        SparseVec {
            len: self.len,
            indices: self.indices.clone(),
            values: self.indices.clone(),
        }
    }

    /// Returns a dense copy of the vector, filling missing entries with
    /// `fill`.
    pub fn to_dense(&self, fill: T) -> Box<[T]>
    where
        T: Clone,
    {
        let mut dense = vec![fill; self.len].into_boxed_slice();
        for (i, v) in self.iter() {
            dense[i] = v.clone();
        }
        dense
    }

    /// Returns a dense vector of options, with `None` at missing entries.
    pub fn to_options(&self) -> Box<[Option<T>]>
    where
        T: Clone,
    {
        let mut dense = vec![None; self.len].into_boxed_slice();
        for (i, v) in self.iter() {
            dense[i] = Some(v.clone());
        }
        dense
    }
}

impl<T: Clone> SparseVec<T> {
    /// Creates a sparse vector from a boolean mask, storing `value` wherever
    /// the mask is true.
    pub fn from_mask(mask: &[bool], value: T) -> Self {
        let indices: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
            .collect();
        let values = vec![value; indices.len()];
        Self {
            len: mask.len(),
            indices,
            values,
        }
    }
}

impl SparseVec<f64> {
    /// Creates a sparse vector from a dense one, storing only nonzero
    /// entries.
    pub fn from_dense_nonzero(dense: &[f64]) -> Self {
        let (indices, values) = dense
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0.0)
            .map(|(i, &v)| (i, v))
            .unzip();
        Self {
            len: dense.len(),
            indices,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_sorts_and_dedups() {
        let v = SparseVec::from_pairs(6, [(4, 'a'), (1, 'b'), (4, 'c')]);
        assert_eq!(v.indices(), &[1, 4]);
        assert_eq!(v.values(), &['b', 'c']);
        assert_eq!(v.len(), 6);
        assert_eq!(v.nnz(), 2);
    }

    #[test]
    #[should_panic]
    fn test_from_pairs_out_of_bounds() {
        let _ = SparseVec::from_pairs(3, [(3, 1.0)]);
    }

    #[test]
    fn test_retain_and_get() {
        let mut v = SparseVec::from_pairs(10, (0..10).map(|i| (i, i * i)));
        v.retain(|i, _| i % 3 == 0);
        assert_eq!(v.indices(), &[0, 3, 6, 9]);
        assert_eq!(v.get(6), Some(&36));
        assert_eq!(v.get(7), None);
        assert!(v.contains(9));
    }

    #[test]
    fn test_dense_conversions() {
        let v = SparseVec::from_dense_nonzero(&[0.0, 2.0, 0.0, -1.0]);
        assert_eq!(v.indices(), &[1, 3]);
        assert_eq!(&*v.to_dense(0.0), &[0.0, 2.0, 0.0, -1.0]);
        assert_eq!(&*v.to_options(), &[None, Some(2.0), None, Some(-1.0)]);
        let m = SparseVec::from_mask(&[true, false, true], 1u8);
        assert_eq!(m.indices(), &[0, 2]);
        assert_eq!(m.to_index_values().values(), &[0, 2]);
    }
}
