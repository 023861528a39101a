//! Error type shared by every comparison stage

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompareError>;

/// Fatal conditions of a comparison run. None of them is retried.
#[derive(Debug, Error)]
pub enum CompareError {
    /// A required file, row or column is missing or malformed
    #[error("Input error in {path:?}: {message}")]
    InputShape { path: PathBuf, message: String },

    /// A metric needed by a table-level operation is absent
    #[error("Metric '{metric}' missing from report '{assembly}'")]
    MissingMetric { metric: String, assembly: String },

    /// Reports were evaluated against different reference databases
    #[error("Database metrics vary for some assemblies: {0}")]
    Consistency(String),

    /// Reports list different metrics and cannot share one table
    #[error("Reports list different metrics: {0}")]
    MetricSetMismatch(String),

    /// Supplied names/colors do not line up with the report directories
    #[error("Number of {what} ({given}) must match number of reports ({expected})")]
    ParameterCount {
        what: &'static str,
        given: usize,
        expected: usize,
    },

    /// A supplied parameter value is malformed
    #[error("Invalid parameter: {0}")]
    Parameter(String),

    /// A resolved divider cannot be divided by
    #[error("Invalid divider {divider} for metric '{metric}' in report '{assembly}'")]
    Divider {
        metric: String,
        assembly: String,
        divider: f64,
    },

    /// Chart drawing failed
    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error at {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CompareError {
    pub fn input_shape(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InputShape {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    pub fn missing_metric(metric: &str, assembly: &str) -> Self {
        Self::MissingMetric {
            metric: metric.to_string(),
            assembly: assembly.to_string(),
        }
    }
}
