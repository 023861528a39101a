use serde::Serialize;

use crate::error::{CompareError, Result};

/// Gene and isoform counts of the reference database a report was built against
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DatabaseMetrics {
    pub gene_count: f64,
    pub isoform_count: f64,
}

/// One row of an rnaQUAST short report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricEntry {
    pub name: String,
    pub value: f64,
}

impl MetricEntry {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        MetricEntry {
            name: name.into(),
            value,
        }
    }
}

/// Absolute metric values of one assembly, in report order.
///
/// `assembly` is the report's own column header and doubles as the default
/// display name. Metric names are unique; the loader rejects duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTable {
    pub assembly: String,
    entries: Vec<MetricEntry>,
}

impl MetricTable {
    pub fn new(assembly: impl Into<String>, entries: Vec<MetricEntry>) -> Self {
        MetricTable {
            assembly: assembly.into(),
            entries,
        }
    }

    pub fn entries(&self) -> &[MetricEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<MetricEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.value)
    }

    /// Value of `name`, or a missing-metric error naming this assembly
    pub fn require(&self, name: &str) -> Result<f64> {
        self.get(name)
            .ok_or_else(|| CompareError::missing_metric(name, &self.assembly))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}

/// A metric table whose mismatch metric has been converted to per-kb units.
///
/// Only `scale::convert_units` builds one, so holding a `ConvertedTable`
/// proves the conversion ran exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedTable(pub(crate) MetricTable);

impl ConvertedTable {
    pub fn table(&self) -> &MetricTable {
        &self.0
    }
}

/// Absolute and scaled value of one metric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledEntry {
    pub name: String,
    pub absolute: f64,
    pub scaled: f64,
}

/// Output of the scaling pass for one assembly
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledTable {
    pub assembly: String,
    pub entries: Vec<ScaledEntry>,
}

impl ScaledTable {
    pub fn get(&self, name: &str) -> Option<&ScaledEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}
