//! Unit conversion and metric scaling

use tracing::debug;

use super::classify::{classify, MetricClass, TRANSCRIPTS};
use super::metrics::{
    ConvertedTable, DatabaseMetrics, MetricEntry, MetricTable, ScaledEntry, ScaledTable,
};
use crate::error::{CompareError, Result};

pub const ALIGNMENT_LENGTH: &str = "Avg. alignment length";
pub const MISMATCHES_PER_TRANSCRIPT: &str = "Avg. mismatches per transcript";
pub const MISMATCHES_PER_KB: &str = "Avg. mismatches per aligned kb";

/// Replace mismatches per transcript with mismatches per aligned kb, in place
/// of the original row.
pub fn convert_units(table: MetricTable) -> Result<ConvertedTable> {
    let alignment_len = table.require(ALIGNMENT_LENGTH)?;
    let mismatches = table.require(MISMATCHES_PER_TRANSCRIPT)?;
    let idx = table
        .position(MISMATCHES_PER_TRANSCRIPT)
        .ok_or_else(|| CompareError::missing_metric(MISMATCHES_PER_TRANSCRIPT, &table.assembly))?;

    let divider = checked_divider(alignment_len, ALIGNMENT_LENGTH, &table.assembly)?;
    let per_kb = 1000.0 * mismatches / divider;
    debug!(
        "{}: {} mismatches/transcript over {} bp -> {:.4} per kb",
        table.assembly, mismatches, alignment_len, per_kb
    );

    let assembly = table.assembly.clone();
    let mut entries = table.into_entries();
    entries[idx] = MetricEntry::new(MISMATCHES_PER_KB, per_kb);

    Ok(ConvertedTable(MetricTable::new(assembly, entries)))
}

/// Divider for `metric` in table `i`
pub fn resolve_divider(
    metric: &str,
    i: usize,
    tables: &[ConvertedTable],
    database: &DatabaseMetrics,
) -> Result<f64> {
    let divider = match classify(metric) {
        MetricClass::GeneRelative => database.gene_count,
        MetricClass::IsoformRelative => database.isoform_count,
        MetricClass::TranscriptRelative => tables[i].table().require(TRANSCRIPTS)?,
        MetricClass::AlreadyScaled => 1.0,
        MetricClass::Unclassified => {
            let max = cross_table_max(metric, tables)?;
            debug!("{} is unclassified, scaling by max {}", metric, max);
            max
        }
    };
    checked_divider(divider, metric, &tables[i].table().assembly)
}

/// Largest absolute value of `metric` over every table
fn cross_table_max(metric: &str, tables: &[ConvertedTable]) -> Result<f64> {
    let mut max = f64::NEG_INFINITY;
    for t in tables {
        max = max.max(t.table().require(metric)?);
    }
    Ok(max)
}

fn checked_divider(divider: f64, metric: &str, assembly: &str) -> Result<f64> {
    if divider == 0.0 || !divider.is_finite() {
        return Err(CompareError::Divider {
            metric: metric.to_string(),
            assembly: assembly.to_string(),
            divider,
        });
    }
    Ok(divider)
}

/// Scale every metric of every table.
///
/// Takes converted tables only; the unclassified fallback reads absolute
/// values across all of them and must see per-kb mismatches.
pub fn scale(tables: Vec<ConvertedTable>, database: &DatabaseMetrics) -> Result<Vec<ScaledTable>> {
    let mut scaled = Vec::with_capacity(tables.len());

    for (i, converted) in tables.iter().enumerate() {
        let table = converted.table();
        let mut entries = Vec::with_capacity(table.len());
        for entry in table.entries() {
            let divider = resolve_divider(&entry.name, i, &tables, database)?;
            entries.push(ScaledEntry {
                name: entry.name.clone(),
                absolute: entry.value,
                scaled: entry.value / divider,
            });
        }
        scaled.push(ScaledTable {
            assembly: table.assembly.clone(),
            entries,
        });
    }

    Ok(scaled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn converted(assembly: &str, rows: &[(&str, f64)]) -> ConvertedTable {
        let mut entries = vec![
            MetricEntry::new(ALIGNMENT_LENGTH, 500.0),
            MetricEntry::new(MISMATCHES_PER_TRANSCRIPT, 2.0),
        ];
        entries.extend(rows.iter().map(|&(n, v)| MetricEntry::new(n, v)));
        convert_units(MetricTable::new(assembly, entries)).unwrap()
    }

    const DB: DatabaseMetrics = DatabaseMetrics {
        gene_count: 900.0,
        isoform_count: 1500.0,
    };

    #[test]
    fn test_convert_keeps_position() {
        let table = MetricTable::new(
            "a",
            vec![
                MetricEntry::new("Transcripts", 10.0),
                MetricEntry::new(MISMATCHES_PER_TRANSCRIPT, 2.0),
                MetricEntry::new(ALIGNMENT_LENGTH, 500.0),
            ],
        );
        let converted = convert_units(table).unwrap();
        let t = converted.table();
        assert_eq!(t.position(MISMATCHES_PER_KB), Some(1));
        assert_eq!(t.get(MISMATCHES_PER_KB), Some(4.0));
        assert!(t.get(MISMATCHES_PER_TRANSCRIPT).is_none());
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn test_convert_requires_alignment_length() {
        let table = MetricTable::new("a", vec![MetricEntry::new(MISMATCHES_PER_TRANSCRIPT, 2.0)]);
        assert!(matches!(
            convert_units(table),
            Err(CompareError::MissingMetric { .. })
        ));
    }

    #[test]
    fn test_convert_rejects_zero_alignment_length() {
        let table = MetricTable::new(
            "a",
            vec![
                MetricEntry::new(ALIGNMENT_LENGTH, 0.0),
                MetricEntry::new(MISMATCHES_PER_TRANSCRIPT, 2.0),
            ],
        );
        assert!(matches!(convert_units(table), Err(CompareError::Divider { .. })));
    }

    #[test]
    fn test_isoform_divider() {
        let tables = vec![converted("a", &[("50%-assembled isoforms", 300.0)])];
        let d = resolve_divider("50%-assembled isoforms", 0, &tables, &DB).unwrap();
        assert_eq!(d, 1500.0);
    }

    #[test]
    fn test_transcript_divider_is_per_table() {
        let tables = vec![
            converted("a", &[("Transcripts", 100.0), ("Aligned", 50.0)]),
            converted("b", &[("Transcripts", 400.0), ("Aligned", 50.0)]),
        ];
        assert_eq!(resolve_divider("Aligned", 0, &tables, &DB).unwrap(), 100.0);
        assert_eq!(resolve_divider("Aligned", 1, &tables, &DB).unwrap(), 400.0);
    }

    #[test]
    fn test_transcript_divider_needs_transcripts_row() {
        let tables = vec![converted("a", &[("Aligned", 50.0)])];
        assert!(resolve_divider("Aligned", 0, &tables, &DB).is_err());
    }

    #[test]
    fn test_unclassified_uses_cross_table_max() {
        let tables = vec![
            converted("a", &[("N50", 10.0)]),
            converted("b", &[("N50", 20.0)]),
            converted("c", &[("N50", 5.0)]),
        ];
        let scaled = scale(tables, &DB).unwrap();
        let values: Vec<f64> = scaled.iter().map(|t| t.get("N50").unwrap().scaled).collect();
        assert_eq!(values, vec![0.5, 1.0, 0.25]);
    }

    #[test]
    fn test_unclassified_missing_in_one_table() {
        let tables = vec![converted("a", &[("N50", 10.0)]), converted("b", &[])];
        let err = scale(tables, &DB).unwrap_err();
        assert!(matches!(err, CompareError::MissingMetric { ref assembly, .. } if assembly == "b"));
    }

    #[test]
    fn test_zero_max_is_divider_error() {
        let tables = vec![converted("a", &[("N50", 0.0)]), converted("b", &[("N50", 0.0)])];
        assert!(matches!(scale(tables, &DB), Err(CompareError::Divider { .. })));
    }

    #[test]
    fn test_zero_gene_count_is_divider_error() {
        let db = DatabaseMetrics {
            gene_count: 0.0,
            isoform_count: 10.0,
        };
        let tables = vec![converted("a", &[("50%-covered genes", 1.0)])];
        assert!(matches!(scale(tables, &db), Err(CompareError::Divider { .. })));
    }

    #[test]
    fn test_scaled_rows_keep_order_and_absolute() {
        let tables = vec![converted("a", &[("Database coverage", 0.87)])];
        let scaled = scale(tables, &DB).unwrap();
        let names: Vec<&str> = scaled[0].names().collect();
        assert_eq!(names, vec![ALIGNMENT_LENGTH, MISMATCHES_PER_KB, "Database coverage"]);
        let coverage = scaled[0].get("Database coverage").unwrap();
        assert_eq!(coverage.absolute, 0.87);
        assert_eq!(coverage.scaled, 0.87);
    }
}
