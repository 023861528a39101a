use tracing::info;

use super::metrics::DatabaseMetrics;
use crate::error::{CompareError, Result};

/// Collapse per-report database metrics into the single shared set.
///
/// Every report must have been evaluated against the same reference, so gene
/// and isoform counts have to agree exactly.
pub fn shared_database(reports: &[(String, DatabaseMetrics)]) -> Result<DatabaseMetrics> {
    let (first_name, first) = reports
        .first()
        .ok_or_else(|| CompareError::Parameter("no reports to compare".to_string()))?;

    for (name, db) in &reports[1..] {
        if db.gene_count != first.gene_count {
            return Err(CompareError::Consistency(format!(
                "{} genes in '{}' but {} genes in '{}'",
                first.gene_count, first_name, db.gene_count, name
            )));
        }
        if db.isoform_count != first.isoform_count {
            return Err(CompareError::Consistency(format!(
                "{} isoforms in '{}' but {} isoforms in '{}'",
                first.isoform_count, first_name, db.isoform_count, name
            )));
        }
    }

    info!(
        "Reference database: {} genes, {} isoforms",
        first.gene_count, first.isoform_count
    );
    Ok(*first)
}
