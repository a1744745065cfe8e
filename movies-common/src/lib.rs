//! # Movies Common Library
//!
//! Shared code for the movie analytics pipeline stages:
//! - Clean record model and raw CSV projection
//! - Genre text parsing
//! - Store schema, load and read access
//! - Aggregate queries used by the report and the dashboard
//! - Configuration loading and data folder resolution

pub mod config;
pub mod db;
pub mod error;
pub mod genre;
pub mod model;
pub mod queries;
pub mod stats;

pub use error::{Error, Result};
pub use model::{Movie, RawRecord};
