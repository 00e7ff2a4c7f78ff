//! Two-phase sparse × sparse product C = A @ B for CSR operands.
//!
//! - **Phase 1 (symbolic)**: merge the column patterns of each output row to get
//!   its length, then prefix-sum the lengths into C's `indptr`.
//! - **Phase 2 (numeric)**: with every row's offset fixed, re-run the merge with
//!   values and write each row straight into its slice of C.
//!
//! Phase 2 re-derives the pattern instead of caching it from Phase 1; the only
//! state carried between phases is the row pointer array.
//!
//! Rows are independent. Large problems run each phase as a rayon parallel
//! iteration, with one [`RowScratch`] per worker thread held in a
//! [`ThreadLocal`].

use crate::config::SpgemmConfig;
use crate::merge::{row_content_f64_i64, row_length_f64_i64, RowScratch};
use crate::util::i64_to_usize;
use rayon::prelude::*;
use spmerge_core::{Csr, Error, Result};
use std::cell::RefCell;
use thread_local::ThreadLocal;
use tracing::{debug, instrument};

fn check_shapes(a: &Csr<f64, i64>, b: &Csr<f64, i64>) -> Result<()> {
    if a.ncols != b.nrows {
        return Err(Error::ShapeMismatch { lhs: a.shape(), rhs: b.shape() });
    }
    Ok(())
}

/// Row slices of a product's column and value arrays.
type RowSlices<'a> = Vec<(&'a mut [i64], &'a mut [f64])>;

/// Split the output arrays into disjoint per-row slices at the `indptr` offsets.
fn split_rows_mut<'a>(
    indptr: &[i64],
    mut cols: &'a mut [i64],
    mut vals: &'a mut [f64],
) -> RowSlices<'a> {
    let mut out = Vec::with_capacity(indptr.len().saturating_sub(1));
    for w in indptr.windows(2) {
        let len = i64_to_usize(w[1] - w[0]);
        let (c, rest_c) = std::mem::take(&mut cols).split_at_mut(len);
        let (v, rest_v) = std::mem::take(&mut vals).split_at_mut(len);
        out.push((c, v));
        cols = rest_c;
        vals = rest_v;
    }
    out
}

/// Sparse product with the default [`SpgemmConfig`].
///
/// # Errors
/// - [`Error::ShapeMismatch`] if `a.ncols != b.nrows`
/// - [`Error::IndexOverflow`] if the product's nnz does not fit in `i64`
pub fn spgemm_f64_i64(a: &Csr<f64, i64>, b: &Csr<f64, i64>) -> Result<Csr<f64, i64>> {
    spgemm_with_config_f64_i64(a, b, &SpgemmConfig::default())
}

/// Sparse product C = A @ B.
///
/// # Errors
/// - [`Error::ShapeMismatch`] if `a.ncols != b.nrows`
/// - [`Error::IndexOverflow`] if the product's nnz does not fit in `i64`
/// - Any CSR invariant violation when `cfg.validate_inputs` is set
#[instrument(
    level = "debug",
    skip_all,
    fields(a_shape = ?a.shape(), b_shape = ?b.shape(), a_nnz = a.nnz(), b_nnz = b.nnz())
)]
pub fn spgemm_with_config_f64_i64(
    a: &Csr<f64, i64>,
    b: &Csr<f64, i64>,
    cfg: &SpgemmConfig,
) -> Result<Csr<f64, i64>> {
    check_shapes(a, b)?;
    if cfg.validate_inputs {
        a.validate()?;
        b.validate()?;
    }
    let indptr = spgemm_symbolic_f64_i64(a, b, cfg)?;
    spgemm_numeric_f64_i64(a, b, indptr, cfg)
}

/// Phase 1: row pointer array of C = A @ B.
///
/// # Errors
/// - [`Error::ShapeMismatch`] if `a.ncols != b.nrows`
/// - [`Error::IndexOverflow`] if the product's nnz does not fit in `i64`
#[instrument(level = "debug", skip_all, fields(nrows = a.nrows))]
pub fn spgemm_symbolic_f64_i64(
    a: &Csr<f64, i64>,
    b: &Csr<f64, i64>,
    cfg: &SpgemmConfig,
) -> Result<Vec<i64>> {
    check_shapes(a, b)?;
    let nrows = a.nrows;
    let lengths: Vec<usize> = if cfg.runs_sequential(nrows, a.nnz()) {
        let mut scratch = RowScratch::new();
        (0..nrows)
            .map(|i| row_length_f64_i64(a.row(i).0, b, &mut scratch))
            .collect()
    } else {
        let tls: ThreadLocal<RefCell<RowScratch>> = ThreadLocal::new();
        (0..nrows)
            .into_par_iter()
            .map(|i| {
                let mut scratch = tls.get_or_default().borrow_mut();
                row_length_f64_i64(a.row(i).0, b, &mut scratch)
            })
            .collect()
    };

    // Prefix sum -> indptr
    let mut indptr = vec![0i64; nrows + 1];
    let mut total = 0usize;
    for (i, &len) in lengths.iter().enumerate() {
        total = total.checked_add(len).ok_or(Error::IndexOverflow { value: usize::MAX })?;
        indptr[i + 1] = i64::try_from(total).map_err(|_| Error::IndexOverflow { value: total })?;
    }
    debug!(nnz = total, "symbolic pass complete");
    Ok(indptr)
}

/// Phase 2: fill C = A @ B given its row pointer array from
/// [`spgemm_symbolic_f64_i64`].
///
/// # Errors
/// - [`Error::ShapeMismatch`] if `a.ncols != b.nrows`
/// - [`Error::LengthMismatch`] / [`Error::InvalidIndptr`] if `indptr` is malformed
///
/// # Panics
/// - If a row's merged length disagrees with `indptr`, i.e. the operands
///   changed between the phases
#[instrument(level = "debug", skip_all, fields(nrows = a.nrows))]
pub fn spgemm_numeric_f64_i64(
    a: &Csr<f64, i64>,
    b: &Csr<f64, i64>,
    indptr: Vec<i64>,
    cfg: &SpgemmConfig,
) -> Result<Csr<f64, i64>> {
    check_shapes(a, b)?;
    let nrows = a.nrows;
    if indptr.len() != nrows + 1 {
        return Err(Error::LengthMismatch { what: "indptr", expected: nrows + 1, got: indptr.len() });
    }
    if indptr[0] != 0 {
        return Err(Error::InvalidIndptr { reason: "first element must be 0" });
    }
    if indptr.windows(2).any(|w| w[0] > w[1]) {
        return Err(Error::InvalidIndptr { reason: "must be non-decreasing" });
    }
    let nnz = i64_to_usize(indptr[nrows]);
    let mut indices = vec![0i64; nnz];
    let mut data = vec![0.0f64; nnz];
    let rows = split_rows_mut(&indptr, &mut indices, &mut data);

    let fill = |i: usize, out_cols: &mut [i64], out_vals: &mut [f64], scratch: &mut RowScratch| {
        let (a_cols, a_vals) = a.row(i);
        let written = row_content_f64_i64(a_cols, a_vals, b, out_cols, out_vals, scratch);
        assert_eq!(written, out_cols.len(), "row {i}: merged length disagrees with indptr");
    };

    if cfg.runs_sequential(nrows, a.nnz()) {
        let mut scratch = RowScratch::new();
        for (i, (out_cols, out_vals)) in rows.into_iter().enumerate() {
            fill(i, out_cols, out_vals, &mut scratch);
        }
    } else {
        let tls: ThreadLocal<RefCell<RowScratch>> = ThreadLocal::new();
        rows.into_par_iter().enumerate().for_each(|(i, (out_cols, out_vals))| {
            let mut scratch = tls.get_or_default().borrow_mut();
            fill(i, out_cols, out_vals, &mut *scratch);
        });
    }
    debug!(nnz, "numeric pass complete");
    Ok(Csr { nrows, ncols: b.ncols, indptr, indices, data })
}
