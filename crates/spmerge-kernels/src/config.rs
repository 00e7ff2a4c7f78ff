//! Tuning knobs for the two-phase SpGEMM driver.
//!
//! Thread count is not configured here; rayon reads `RAYON_NUM_THREADS`.

use crate::util::{SMALL_DIM_LIMIT, SMALL_NNZ_LIMIT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpgemmConfig {
    /// Run sequentially when the left operand has at most this many rows
    pub sequential_rows: usize,
    /// Run sequentially when the left operand has at most this many nonzeros
    pub sequential_nnz: usize,
    /// Re-check both operands' CSR invariants before multiplying
    pub validate_inputs: bool,
}

impl Default for SpgemmConfig {
    fn default() -> Self {
        Self {
            sequential_rows: SMALL_DIM_LIMIT,
            sequential_nnz: SMALL_NNZ_LIMIT,
            validate_inputs: false,
        }
    }
}

impl SpgemmConfig {
    /// Always run on the calling thread.
    #[must_use]
    pub const fn sequential() -> Self {
        Self { sequential_rows: usize::MAX, sequential_nnz: usize::MAX, validate_inputs: false }
    }

    /// Always dispatch rows to the rayon pool, whatever the problem size.
    #[must_use]
    pub const fn parallel() -> Self {
        Self { sequential_rows: 0, sequential_nnz: 0, validate_inputs: false }
    }

    #[must_use]
    pub const fn with_sequential_rows(mut self, rows: usize) -> Self {
        self.sequential_rows = rows;
        self
    }

    #[must_use]
    pub const fn with_sequential_nnz(mut self, nnz: usize) -> Self {
        self.sequential_nnz = nnz;
        self
    }

    #[must_use]
    pub const fn with_validation(mut self, validate: bool) -> Self {
        self.validate_inputs = validate;
        self
    }

    /// For small problems, avoid rayon overhead.
    #[inline]
    #[must_use]
    pub const fn runs_sequential(&self, nrows: usize, nnz: usize) -> bool {
        nrows <= self.sequential_rows || nnz <= self.sequential_nnz
    }
}
