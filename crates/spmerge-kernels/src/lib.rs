//! Row-merge SpGEMM kernels for spmerge (pure Rust, parallel ready)
//!
//! Rayon auto-detects threads by default; users may set `RAYON_NUM_THREADS`.

pub mod config;
pub mod merge;
pub mod spgemm;
pub mod util;

pub use config::SpgemmConfig;
pub use merge::{
    max_scratch_bound, row_content_f64_i64, row_length_f64_i64, row_scratch_bound, RowScratch,
};
pub use spgemm::{
    spgemm_f64_i64, spgemm_numeric_f64_i64, spgemm_symbolic_f64_i64, spgemm_with_config_f64_i64,
};
