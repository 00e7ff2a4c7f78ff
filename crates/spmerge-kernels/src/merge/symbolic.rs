//! Symbolic row merge: sorted, duplicate-free union of column streams.

use super::front::MergeFront;
use crate::util::{b_row_cols, usize_to_i64};
use spmerge_core::Csr;

/// Merge the rows of `b` selected by `a_cols` (exactly `K` of them) with the
/// carried columns `input`, writing the union into `out`.
///
/// Returns the number of columns written.
///
/// # Panics
/// - If `a_cols.len() != K`
/// - If `out` is shorter than the merged row
#[inline]
pub(crate) fn merge_symbolic_n<const K: usize>(
    a_cols: &[i64],
    b: &Csr<f64, i64>,
    input: &[i64],
    out: &mut [i64],
) -> usize {
    assert_eq!(a_cols.len(), K);
    let sentinel = usize_to_i64(b.ncols);
    let mut front = MergeFront::<K>::symbolic(
        core::array::from_fn(|k| b_row_cols(b, a_cols[k])),
        input,
        sentinel,
    );
    let mut n = 0usize;
    loop {
        let min = front.peek_min();
        if min == sentinel {
            break;
        }
        front.advance_matching(min);
        out[n] = min;
        n += 1;
    }
    n
}

/// Two-way union of one row's columns `row` with the carried columns `input`.
///
/// # Panics
/// - If `out` is shorter than the merged row
#[inline]
pub(crate) fn merge_symbolic_1(row: &[i64], input: &[i64], out: &mut [i64]) -> usize {
    let mut p = 0usize;
    let mut n = 0usize;
    for &col in row {
        while p < input.len() && input[p] < col {
            out[n] = input[p];
            n += 1;
            p += 1;
        }
        out[n] = col;
        n += 1;
        if p < input.len() && input[p] == col {
            p += 1;
        }
    }
    let rest = &input[p..];
    out[n..n + rest.len()].copy_from_slice(rest);
    n + rest.len()
}
