//! movies-report library - static report over the store
//!
//! Console summaries of the canonical queries plus two chart images.

pub mod charts;
pub mod error;
pub mod report;

pub use error::{ReportError, Result};
