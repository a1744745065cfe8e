//! movies-etl library - Transformer and Loader stages
//!
//! Raw input file → clean records → intermediate file → `movies` table.

pub mod load;
pub mod transform;

pub use transform::{clean_record, transform, TransformReport};
