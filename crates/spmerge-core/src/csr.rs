//! CSR format definitions and constructors

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Csr<T, I> {
    pub nrows: usize,
    pub ncols: usize,
    pub indptr: Vec<I>,
    pub indices: Vec<I>,
    pub data: Vec<T>,
}

impl<T, I> Csr<T, I> {
    pub fn shape(&self) -> (usize, usize) { (self.nrows, self.ncols) }
    pub fn nnz(&self) -> usize { self.data.len() }
}

impl Csr<f64, i64> {
    /// Build a CSR matrix from raw arrays.
    ///
    /// With `check = true` every row is verified to hold strictly increasing
    /// columns in `[0, ncols)`. The merge kernels rely on both: duplicates would
    /// be emitted twice and a column equal to `ncols` would be mistaken for an
    /// exhausted stream.
    pub fn from_parts(
        nrows: usize,
        ncols: usize,
        indptr: Vec<i64>,
        indices: Vec<i64>,
        data: Vec<f64>,
        check: bool,
    ) -> Result<Self> {
        if indptr.len() != nrows + 1 {
            return Err(Error::LengthMismatch { what: "indptr", expected: nrows + 1, got: indptr.len() });
        }
        if indices.len() != data.len() {
            return Err(Error::LengthMismatch { what: "indices and data", expected: indices.len(), got: data.len() });
        }
        let nnz = indices.len();
        if indptr.first().copied().unwrap_or(0) != 0 {
            return Err(Error::InvalidIndptr { reason: "first element must be 0" });
        }
        if indptr.last().copied().unwrap_or(0) != i64::try_from(nnz).map_err(|_| Error::IndexOverflow { value: nnz })? {
            return Err(Error::InvalidIndptr { reason: "last element must equal nnz" });
        }
        if i64::try_from(ncols).is_err() {
            return Err(Error::IndexOverflow { value: ncols });
        }
        let csr = Csr { nrows, ncols, indptr, indices, data };
        if check {
            csr.validate()?;
        }
        Ok(csr)
    }

    /// Verify the per-row invariants the merge kernels depend on.
    ///
    /// `indptr` must be non-negative and non-decreasing, and every row must hold
    /// strictly increasing columns in `[0, ncols)`.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn validate(&self) -> Result<()> {
        if self.indptr.len() != self.nrows + 1 {
            return Err(Error::LengthMismatch { what: "indptr", expected: self.nrows + 1, got: self.indptr.len() });
        }
        if self.indices.len() != self.data.len() {
            return Err(Error::LengthMismatch { what: "indices and data", expected: self.indices.len(), got: self.data.len() });
        }
        let nnz = self.indices.len();
        for w in self.indptr.windows(2) {
            if w[0] < 0 || w[1] < 0 { return Err(Error::InvalidIndptr { reason: "must be non-negative" }); }
            if w[0] > w[1] { return Err(Error::InvalidIndptr { reason: "must be non-decreasing" }); }
        }
        if self.indptr[0] != 0 {
            return Err(Error::InvalidIndptr { reason: "first element must be 0" });
        }
        if self.indptr[self.nrows] as usize != nnz {
            return Err(Error::InvalidIndptr { reason: "last element must equal nnz" });
        }
        for i in 0..self.nrows {
            let start = self.indptr[i] as usize;
            let end = self.indptr[i + 1] as usize;
            let mut prev_col = -1i64;
            for &j in &self.indices[start..end] {
                if j < 0 || j as usize >= self.ncols {
                    return Err(Error::ColumnOutOfBounds { row: i, col: j, ncols: self.ncols });
                }
                if j <= prev_col { return Err(Error::UnsortedColumns { row: i }); }
                prev_col = j;
            }
        }
        Ok(())
    }

    /// An `nrows x ncols` matrix with no stored entries.
    #[must_use]
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Csr { nrows, ncols, indptr: vec![0; nrows + 1], indices: Vec::new(), data: Vec::new() }
    }

    /// Column indices and values of row `i`.
    ///
    /// # Panics
    /// - If `i >= nrows`
    #[inline]
    #[must_use]
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn row(&self, i: usize) -> (&[i64], &[f64]) {
        let s = self.indptr[i] as usize;
        let e = self.indptr[i + 1] as usize;
        (&self.indices[s..e], &self.data[s..e])
    }

    /// Row-major dense copy, summing any duplicate entries.
    #[must_use]
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn to_dense(&self) -> Vec<f64> {
        let mut out = vec![0.0f64; self.nrows * self.ncols];
        for i in 0..self.nrows {
            let (cols, vals) = self.row(i);
            for (&j, &v) in cols.iter().zip(vals) {
                out[i * self.ncols + j as usize] += v;
            }
        }
        out
    }
}
