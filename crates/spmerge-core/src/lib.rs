//! Core data structures for spmerge (pure Rust)

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod csr;
pub mod error;

pub use csr::Csr;
pub use error::{Error, Result};
