//! Comparison of rnaQUAST transcript-assembly reports.
//!
//! Reports are loaded from their output directories, checked for a shared
//! reference database, normalized per metric class and exported as combined
//! tables and charts.

pub mod config;
pub mod error;
pub mod eval;
pub mod io;
pub mod pipeline;
pub mod visualize;

pub use config::CompareConfig;
pub use error::{CompareError, Result};
