//! Sparse matrix utilities.
//!
//! Helper functions for assembling nalgebra-sparse matrices.

use nalgebra::DMatrix;
use nalgebra_sparse::{CooMatrix, CscMatrix};

/// Create a CSC matrix from triplets (row, col, value).
///
/// Duplicates are summed together. Out-of-range triplets are dropped.
pub fn csc_from_triplets(
    nrows: usize,
    ncols: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    vals: Vec<f64>,
) -> CscMatrix<f64> {
    if rows.is_empty() {
        return CscMatrix::zeros(nrows, ncols);
    }

    let mut coo = CooMatrix::new(nrows, ncols);
    for ((row, col), val) in rows.into_iter().zip(cols).zip(vals) {
        if row < nrows && col < ncols {
            coo.push(row, col, val);
        }
    }

    CscMatrix::from(&coo)
}

/// Create a negated CSC identity matrix, used for `x >= 0` bound rows.
pub fn csc_neg_identity(n: usize) -> CscMatrix<f64> {
    csc_neg(&CscMatrix::identity(n))
}

/// Convert CSC to dense matrix.
pub fn csc_to_dense(sparse: &CscMatrix<f64>) -> DMatrix<f64> {
    let mut dense = DMatrix::zeros(sparse.nrows(), sparse.ncols());
    for (row, col, val) in sparse.triplet_iter() {
        dense[(row, col)] = *val;
    }
    dense
}

/// Stack CSC blocks vertically. The result has as many columns as the widest block.
pub fn csc_vstack(blocks: &[&CscMatrix<f64>]) -> CscMatrix<f64> {
    let mut rows = Vec::new();
    let mut cols = Vec::new();
    let mut vals = Vec::new();
    let mut row_offset = 0;
    let mut ncols = 0;

    for block in blocks {
        for (r, c, v) in block.triplet_iter() {
            rows.push(r + row_offset);
            cols.push(c);
            vals.push(*v);
        }
        row_offset += block.nrows();
        ncols = ncols.max(block.ncols());
    }

    csc_from_triplets(row_offset, ncols, rows, cols, vals)
}

/// Negate a CSC matrix, keeping its sparsity pattern.
pub fn csc_neg(a: &CscMatrix<f64>) -> CscMatrix<f64> {
    let mut negated = a.clone();
    for v in negated.values_mut() {
        *v = -*v;
    }
    negated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csc_from_triplets_sums_duplicates() {
        let m = csc_from_triplets(2, 2, vec![0, 0, 1], vec![1, 1, 0], vec![1.0, 2.0, 4.0]);
        let dense = csc_to_dense(&m);
        assert_eq!(dense[(0, 1)], 3.0);
        assert_eq!(dense[(1, 0)], 4.0);
        assert_eq!(dense[(0, 0)], 0.0);
    }

    #[test]
    fn test_csc_neg_identity() {
        let dense = csc_to_dense(&csc_neg_identity(3));
        assert_eq!(dense, -DMatrix::<f64>::identity(3, 3));
    }

    #[test]
    fn test_csc_neg_keeps_pattern() {
        let m = csc_from_triplets(2, 3, vec![0, 1], vec![2, 0], vec![4.0, -1.5]);
        let negated = csc_neg(&m);
        assert_eq!(negated.nnz(), 2);
        assert_eq!(csc_to_dense(&negated), -csc_to_dense(&m));
    }

    #[test]
    fn test_csc_vstack_offsets_rows() {
        let top = csc_from_triplets(1, 3, vec![0], vec![2], vec![5.0]);
        let bottom = csc_neg_identity(3);
        let stacked = csc_vstack(&[&top, &bottom]);
        assert_eq!(stacked.nrows(), 4);
        assert_eq!(stacked.ncols(), 3);

        let dense = csc_to_dense(&stacked);
        assert_eq!(dense[(0, 2)], 5.0);
        assert_eq!(dense[(3, 2)], -1.0);
    }

    #[test]
    fn test_csc_vstack_empty_blocks() {
        let empty = CscMatrix::<f64>::zeros(0, 4);
        let stacked = csc_vstack(&[&empty, &empty]);
        assert_eq!(stacked.nrows(), 0);
        assert_eq!(stacked.ncols(), 4);
    }
}
