//! Row driver: folds one left-operand row into a merged output row.
//!
//! The nonzeros of the left row are consumed `W` at a time through the
//! `W + 1`-way merge while more than `W` remain, then one at a time through the
//! two-way merge. Each step reads the partial row from one scratch buffer and
//! writes the next partial row into the other; the buffers swap roles after
//! every step.

use super::numeric::{merge_numeric_1, merge_numeric_n, scaled_copy};
use super::symbolic::{merge_symbolic_1, merge_symbolic_n};
use crate::util::{b_row, b_row_cols, b_row_len, i64_to_usize};
use spmerge_core::Csr;

/// Rows of the right operand merged per front step.
pub const CHUNK_WIDTH: usize = 3;

/// Ping/pong buffers for one worker, reused across rows.
///
/// Buffers only grow, and only between rows; a merge never reallocates.
#[derive(Debug, Default, Clone)]
pub struct RowScratch {
    cols_a: Vec<i64>,
    cols_b: Vec<i64>,
    vals_a: Vec<f64>,
    vals_b: Vec<f64>,
}

impl RowScratch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scratch able to hold rows of up to `bound` entries.
    #[must_use]
    pub fn with_capacity(bound: usize) -> Self {
        let mut s = Self::new();
        s.reserve(bound);
        s
    }

    /// Longest row the column buffers can currently hold.
    #[must_use]
    pub fn col_capacity(&self) -> usize {
        self.cols_a.len().min(self.cols_b.len())
    }

    /// Longest row the value buffers can currently hold.
    #[must_use]
    pub fn val_capacity(&self) -> usize {
        self.vals_a.len().min(self.vals_b.len())
    }

    /// Grow the column buffers to hold `bound` entries.
    pub fn reserve_cols(&mut self, bound: usize) {
        if self.cols_a.len() < bound {
            self.cols_a.resize(bound, 0);
            self.cols_b.resize(bound, 0);
        }
    }

    /// Grow column and value buffers to hold `bound` entries.
    pub fn reserve(&mut self, bound: usize) {
        self.reserve_cols(bound);
        if self.vals_a.len() < bound {
            self.vals_a.resize(bound, 0.0);
            self.vals_b.resize(bound, 0.0);
        }
    }
}

/// Upper bound on the merged length of the row selecting `a_cols` from `b`.
///
/// Merging only removes duplicates, so the sum of the touched rows' lengths
/// bounds every partial row as well as the final one.
#[must_use]
pub fn row_scratch_bound(a_cols: &[i64], b: &Csr<f64, i64>) -> usize {
    a_cols.iter().map(|&j| b_row_len(b, j)).sum()
}

/// Largest [`row_scratch_bound`] over all rows of `a`.
#[must_use]
pub fn max_scratch_bound(a: &Csr<f64, i64>, b: &Csr<f64, i64>) -> usize {
    a.indptr
        .windows(2)
        .map(|w| row_scratch_bound(&a.indices[i64_to_usize(w[0])..i64_to_usize(w[1])], b))
        .max()
        .unwrap_or(0)
}

/// Number of nonzeros in the product row `a_row * b`, where `a_cols` are the
/// column indices of the left row.
///
/// # Panics
/// - If a column in `a_cols` is not a row of `b`
#[must_use]
pub fn row_length_f64_i64(a_cols: &[i64], b: &Csr<f64, i64>, scratch: &mut RowScratch) -> usize {
    row_length_chunked::<CHUNK_WIDTH>(a_cols, b, scratch)
}

/// [`row_length_f64_i64`] with `W` right-operand rows merged per front step.
///
/// The result does not depend on `W`.
#[must_use]
pub fn row_length_chunked<const W: usize>(
    a_cols: &[i64],
    b: &Csr<f64, i64>,
    scratch: &mut RowScratch,
) -> usize {
    match a_cols {
        [] => return 0,
        [j] => return b_row_len(b, *j),
        _ => {}
    }
    scratch.reserve_cols(row_scratch_bound(a_cols, b));
    let RowScratch { cols_a, cols_b, .. } = scratch;
    let (mut src, mut dst) = (cols_a, cols_b);
    let mut len = 0usize;
    let mut rest = a_cols;
    while !rest.is_empty() {
        if W > 0 && rest.len() > W {
            len = merge_symbolic_n::<W>(&rest[..W], b, &src[..len], dst);
            rest = &rest[W..];
        } else {
            len = merge_symbolic_1(b_row_cols(b, rest[0]), &src[..len], dst);
            rest = &rest[1..];
        }
        std::mem::swap(&mut src, &mut dst);
    }
    len
}

/// Write the product row `a_row * b` into `out_cols` / `out_vals`.
///
/// The destination slices are the output row at its final offset; they must
/// hold at least [`row_length_f64_i64`] entries. Returns the number written.
///
/// # Panics
/// - If `a_cols.len() != a_vals.len()`
/// - If the destination is shorter than the merged row
#[must_use]
pub fn row_content_f64_i64(
    a_cols: &[i64],
    a_vals: &[f64],
    b: &Csr<f64, i64>,
    out_cols: &mut [i64],
    out_vals: &mut [f64],
    scratch: &mut RowScratch,
) -> usize {
    row_content_chunked::<CHUNK_WIDTH>(a_cols, a_vals, b, out_cols, out_vals, scratch)
}

/// [`row_content_f64_i64`] with `W` right-operand rows merged per front step.
#[must_use]
pub fn row_content_chunked<const W: usize>(
    a_cols: &[i64],
    a_vals: &[f64],
    b: &Csr<f64, i64>,
    out_cols: &mut [i64],
    out_vals: &mut [f64],
    scratch: &mut RowScratch,
) -> usize {
    assert_eq!(a_cols.len(), a_vals.len(), "a_cols and a_vals must have equal length");
    match a_cols {
        [] => return 0,
        [j] => {
            let (cols, vals) = b_row(b, *j);
            return scaled_copy(cols, vals, a_vals[0], out_cols, out_vals);
        }
        _ => {}
    }
    scratch.reserve(row_scratch_bound(a_cols, b));
    let RowScratch { cols_a, cols_b, vals_a, vals_b } = scratch;
    let (mut src_c, mut dst_c) = (cols_a, cols_b);
    let (mut src_v, mut dst_v) = (vals_a, vals_b);
    let mut len = 0usize;
    let (mut rest_c, mut rest_v) = (a_cols, a_vals);
    while !rest_c.is_empty() {
        if W > 0 && rest_c.len() > W {
            len = merge_numeric_n::<W>(
                &rest_c[..W],
                &rest_v[..W],
                b,
                &src_c[..len],
                &src_v[..len],
                dst_c,
                dst_v,
            );
            rest_c = &rest_c[W..];
            rest_v = &rest_v[W..];
        } else {
            let (cols, vals) = b_row(b, rest_c[0]);
            len = merge_numeric_1(cols, vals, rest_v[0], &src_c[..len], &src_v[..len], dst_c, dst_v);
            rest_c = &rest_c[1..];
            rest_v = &rest_v[1..];
        }
        std::mem::swap(&mut src_c, &mut dst_c);
        std::mem::swap(&mut src_v, &mut dst_v);
    }
    out_cols[..len].copy_from_slice(&src_c[..len]);
    out_vals[..len].copy_from_slice(&src_v[..len]);
    len
}
