//! Evaluation module - scaling and combining rnaQUAST metrics across assemblies

pub mod classify;
pub mod combined;
pub mod consistency;
pub mod metrics;
pub mod scale;

pub use classify::{classify, MetricClass};
pub use combined::CombinedTable;
pub use metrics::{ConvertedTable, DatabaseMetrics, MetricEntry, MetricTable, ScaledTable};
