//! Utility constants and index conversions shared by the merge kernels

use spmerge_core::Csr;

/// Below this many left-operand rows the SpGEMM phases run sequentially
pub const SMALL_DIM_LIMIT: usize = 2048;
/// Below this many left-operand nonzeros the SpGEMM phases run sequentially
pub const SMALL_NNZ_LIMIT: usize = 32 * 1024;

/// Convert i64 to usize, asserting non-negativity.
#[inline]
#[must_use]
pub fn i64_to_usize(x: i64) -> usize {
    debug_assert!(x >= 0);
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    {
        x as usize
    }
}

/// Converts usize to i64 with debug assertions for range validity.
#[inline]
#[must_use]
pub fn usize_to_i64(x: usize) -> i64 {
    debug_assert!(i64::try_from(x).is_ok());
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    {
        x as i64
    }
}

/// Column indices of row `j` of `b`, where `j` comes from a column of the left operand.
#[inline]
pub(crate) fn b_row_cols(b: &Csr<f64, i64>, j: i64) -> &[i64] {
    let j = i64_to_usize(j);
    let s = i64_to_usize(b.indptr[j]);
    let e = i64_to_usize(b.indptr[j + 1]);
    &b.indices[s..e]
}

/// Column indices and values of row `j` of `b`.
#[inline]
pub(crate) fn b_row(b: &Csr<f64, i64>, j: i64) -> (&[i64], &[f64]) {
    let j = i64_to_usize(j);
    let s = i64_to_usize(b.indptr[j]);
    let e = i64_to_usize(b.indptr[j + 1]);
    (&b.indices[s..e], &b.data[s..e])
}

/// Nonzero count of row `j` of `b`.
#[inline]
pub(crate) fn b_row_len(b: &Csr<f64, i64>, j: i64) -> usize {
    let j = i64_to_usize(j);
    i64_to_usize(b.indptr[j + 1] - b.indptr[j])
}
