//! Reader for rnaQUAST's `database_metrics.txt`.
//!
//! The gene count is the first number on line 2 and the isoform count the
//! first number on line 5. The remaining lines are ignored.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{CompareError, Result};
use crate::eval::DatabaseMetrics;

pub const DATABASE_METRICS: &str = "database_metrics.txt";

const GENES_LINE: usize = 1;
const ISOFORMS_LINE: usize = 4;

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[-+]?\d*\.?\d+").expect("valid number pattern"))
}

/// First integer or decimal number in `line`
pub fn find_number(line: &str) -> Option<f64> {
    number_pattern()
        .find(line)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

pub fn parse_database_metrics_str(content: &str, path: &Path) -> Result<DatabaseMetrics> {
    let lines: Vec<&str> = content.lines().collect();
    let number_at = |idx: usize, what: &str| -> Result<f64> {
        let line = lines.get(idx).ok_or_else(|| {
            CompareError::input_shape(path, format!("line {} ({what}) is missing", idx + 1))
        })?;
        find_number(line).ok_or_else(|| {
            CompareError::input_shape(path, format!("no number on line {} ({what})", idx + 1))
        })
    };

    Ok(DatabaseMetrics {
        gene_count: number_at(GENES_LINE, "genes")?,
        isoform_count: number_at(ISOFORMS_LINE, "isoforms")?,
    })
}

pub fn parse_database_metrics(path: &Path) -> Result<DatabaseMetrics> {
    let content = fs::read_to_string(path).map_err(|e| CompareError::io(path, e))?;
    parse_database_metrics_str(&content, path)
}
