//! Loader for rnaQUAST report directories.
//!
//! Layout:
//! ```text
//! <report_dir>/short_report.tsv
//! <report_dir>/<assembly>_output/database_metrics.txt
//! ```
//! where `<assembly>` is the second header column of `short_report.tsv`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::database::{parse_database_metrics, DATABASE_METRICS};
use crate::error::{CompareError, Result};
use crate::eval::{DatabaseMetrics, MetricEntry, MetricTable};

pub const SHORT_REPORT: &str = "short_report.tsv";
pub const METRICS_HEADER: &str = "METRICS/TRANSCRIPTS";

/// Everything read from one report directory
#[derive(Debug, Clone)]
pub struct Report {
    pub table: MetricTable,
    pub database: DatabaseMetrics,
}

/// Parse the contents of a `short_report.tsv`
pub fn parse_short_report_str(content: &str, path: &Path) -> Result<MetricTable> {
    let mut lines = content.lines().enumerate();

    let (_, header) = lines
        .next()
        .ok_or_else(|| CompareError::input_shape(path, "empty metrics table"))?;
    let header_cols: Vec<&str> = header.split('\t').map(str::trim).collect();
    if header_cols.len() < 2 || header_cols[1].is_empty() {
        return Err(CompareError::input_shape(
            path,
            "header needs a metric column and an assembly column",
        ));
    }
    if header_cols[0] != METRICS_HEADER {
        warn!(
            "{}: unexpected first header column '{}'",
            path.display(),
            header_cols[0]
        );
    }
    let assembly = header_cols[1].to_string();

    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let cols: Vec<&str> = line.split('\t').map(str::trim).collect();
        let name = cols[0];
        let raw = cols.get(1).copied().unwrap_or("");
        let value = raw.parse::<f64>().map_err(|_| {
            CompareError::input_shape(
                path,
                format!("line {}: '{}' has no numeric value (got '{}')", idx + 1, name, raw),
            )
        })?;
        if !seen.insert(name.to_string()) {
            return Err(CompareError::input_shape(
                path,
                format!("line {}: duplicate metric '{}'", idx + 1, name),
            ));
        }
        entries.push(MetricEntry::new(name, value));
    }

    Ok(MetricTable::new(assembly, entries))
}

pub fn parse_short_report(path: &Path) -> Result<MetricTable> {
    let content = fs::read_to_string(path).map_err(|e| CompareError::io(path, e))?;
    parse_short_report_str(&content, path)
}

/// Path of the database metrics file belonging to `assembly`
pub fn database_metrics_path(report_dir: &Path, assembly: &str) -> PathBuf {
    report_dir
        .join(format!("{assembly}_output"))
        .join(DATABASE_METRICS)
}

/// Load the metrics table and database metrics of one report directory
pub fn load_report(report_dir: &Path) -> Result<Report> {
    let table = parse_short_report(&report_dir.join(SHORT_REPORT))?;
    let database = parse_database_metrics(&database_metrics_path(report_dir, &table.assembly))?;
    info!(
        "Loaded report '{}' from {} ({} metrics)",
        table.assembly,
        report_dir.display(),
        table.len()
    );
    Ok(Report { table, database })
}

pub fn load_reports<P: AsRef<Path>>(report_dirs: &[P]) -> Result<Vec<Report>> {
    report_dirs.iter().map(|d| load_report(d.as_ref())).collect()
}
