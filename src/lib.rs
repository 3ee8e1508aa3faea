//! dat-merge: merge delimited `.dat` files into one deduplicated CSV.
//!
//! The pipeline has three stages applied in order:
//! - [`scan`] reads every matching file in the input directory
//! - [`merge`] collects distinct header lines and distinct trimmed rows
//! - [`render`] and [`stats`] write `output.csv` and append column statistics
//!
//! [`pipeline::run_pipeline`] runs all three from a [`domain::Config`].

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod merge;
pub mod pipeline;
pub mod render;
pub mod scan;
pub mod stats;
pub mod utils;

pub use domain::Config;
pub use error::{MergeError, MergeResult};
pub use pipeline::{run_pipeline, RunSummary};
