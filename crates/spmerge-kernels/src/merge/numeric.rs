//! Numeric row merge: the symbolic merge with weighted value accumulation.

use super::front::MergeFront;
use crate::util::{b_row, usize_to_i64};
use spmerge_core::Csr;
use wide::f64x4;

/// Fold `K` rows of `b`, weighted by `a_vals`, into the carried row
/// `(in_cols, in_vals)`, writing the result to `(out_cols, out_vals)`.
///
/// Returns the number of entries written.
///
/// # Panics
/// - If `a_cols.len() != K` or `a_vals.len() != K`
/// - If the output slices are shorter than the merged row
#[allow(
    clippy::too_many_arguments,
    reason = "Kernel takes the carried and output rows as split column/value slices"
)]
#[inline]
pub(crate) fn merge_numeric_n<const K: usize>(
    a_cols: &[i64],
    a_vals: &[f64],
    b: &Csr<f64, i64>,
    in_cols: &[i64],
    in_vals: &[f64],
    out_cols: &mut [i64],
    out_vals: &mut [f64],
) -> usize {
    assert_eq!(a_cols.len(), K);
    assert_eq!(a_vals.len(), K);
    let sentinel = usize_to_i64(b.ncols);
    let mut front = MergeFront::<K>::numeric(
        core::array::from_fn(|k| {
            let (cols, vals) = b_row(b, a_cols[k]);
            (cols, vals, a_vals[k])
        }),
        (in_cols, in_vals),
        sentinel,
    );
    let mut n = 0usize;
    loop {
        let min = front.peek_min();
        if min == sentinel {
            break;
        }
        out_vals[n] = front.advance_matching_accumulate(min);
        out_cols[n] = min;
        n += 1;
    }
    n
}

/// Fold one row `(cols, vals)` scaled by `weight` into the carried row.
///
/// # Panics
/// - If the output slices are shorter than the merged row
#[allow(
    clippy::too_many_arguments,
    reason = "Kernel takes the carried and output rows as split column/value slices"
)]
#[inline]
pub(crate) fn merge_numeric_1(
    cols: &[i64],
    vals: &[f64],
    weight: f64,
    in_cols: &[i64],
    in_vals: &[f64],
    out_cols: &mut [i64],
    out_vals: &mut [f64],
) -> usize {
    let mut p = 0usize;
    let mut n = 0usize;
    for (&col, &v) in cols.iter().zip(vals) {
        while p < in_cols.len() && in_cols[p] < col {
            out_cols[n] = in_cols[p];
            out_vals[n] = in_vals[p];
            n += 1;
            p += 1;
        }
        out_cols[n] = col;
        if p < in_cols.len() && in_cols[p] == col {
            out_vals[n] = weight.mul_add(v, in_vals[p]);
            p += 1;
        } else {
            out_vals[n] = weight * v;
        }
        n += 1;
    }
    let rest = in_cols.len() - p;
    out_cols[n..n + rest].copy_from_slice(&in_cols[p..]);
    out_vals[n..n + rest].copy_from_slice(&in_vals[p..]);
    n + rest
}

/// `out = alpha * (cols, vals)`; the whole merge for a left row with one nonzero.
///
/// # Panics
/// - If the output slices are shorter than `cols`
#[inline]
pub(crate) fn scaled_copy(
    cols: &[i64],
    vals: &[f64],
    alpha: f64,
    out_cols: &mut [i64],
    out_vals: &mut [f64],
) -> usize {
    let n = cols.len();
    out_cols[..n].copy_from_slice(cols);
    let dst = &mut out_vals[..n];
    let aval = f64x4::splat(alpha);
    let limit4 = n & !3;
    let mut i = 0usize;
    while i < limit4 {
        let v = f64x4::from([vals[i], vals[i + 1], vals[i + 2], vals[i + 3]]);
        dst[i..i + 4].copy_from_slice(&(v * aval).to_array());
        i += 4;
    }
    while i < n {
        dst[i] = alpha * vals[i];
        i += 1;
    }
    n
}
