//! Bounded-memory k-way merge of sparse rows.
//!
//! - [`front`]: cursor front with peek-minimum / advance-matching
//! - `symbolic` / `numeric`: one merge step over a front
//! - [`row`]: chunked driver producing one product row

pub mod front;
mod numeric;
pub mod row;
mod symbolic;

pub use front::MergeFront;
pub use row::{
    max_scratch_bound, row_content_chunked, row_content_f64_i64, row_length_chunked,
    row_length_f64_i64, row_scratch_bound, RowScratch, CHUNK_WIDTH,
};
