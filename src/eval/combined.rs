//! Combined comparison table: one row per metric, an absolute and a scaled
//! column per assembly.

use serde::Serialize;

use super::metrics::ScaledTable;
use crate::error::{CompareError, Result};

/// Values of one assembly, aligned with [`CombinedTable::metrics`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssemblyColumns {
    pub name: String,
    pub absolute: Vec<f64>,
    pub scaled: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedTable {
    pub metrics: Vec<String>,
    pub assemblies: Vec<AssemblyColumns>,
}

impl CombinedTable {
    /// Merge scaled tables under the given display names.
    ///
    /// Row order follows the first table. Every table must report exactly the
    /// same metric names.
    pub fn build(tables: &[ScaledTable], names: &[String]) -> Result<Self> {
        if tables.len() != names.len() {
            return Err(CompareError::ParameterCount {
                what: "names",
                given: names.len(),
                expected: tables.len(),
            });
        }
        let Some(first) = tables.first() else {
            return Ok(CombinedTable {
                metrics: Vec::new(),
                assemblies: Vec::new(),
            });
        };

        let metrics: Vec<String> = first.names().map(str::to_string).collect();
        let mut assemblies = Vec::with_capacity(tables.len());

        for (table, name) in tables.iter().zip(names) {
            if table.entries.len() != metrics.len() {
                return Err(CompareError::MetricSetMismatch(format!(
                    "'{}' reports {} metrics, '{}' reports {}",
                    first.assembly,
                    metrics.len(),
                    table.assembly,
                    table.entries.len()
                )));
            }
            let mut absolute = Vec::with_capacity(metrics.len());
            let mut scaled = Vec::with_capacity(metrics.len());
            for metric in &metrics {
                let entry = table
                    .get(metric)
                    .ok_or_else(|| {
                        CompareError::MetricSetMismatch(format!(
                            "'{}' has no '{}' row listed by '{}'",
                            table.assembly, metric, first.assembly
                        ))
                    })?;
                absolute.push(entry.absolute);
                scaled.push(entry.scaled);
            }
            assemblies.push(AssemblyColumns {
                name: name.clone(),
                absolute,
                scaled,
            });
        }

        Ok(CombinedTable { metrics, assemblies })
    }

    /// Column headers, starting with `metric`
    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec!["metric".to_string()];
        for a in &self.assemblies {
            headers.push(format!("{} (absolute)", a.name));
            headers.push(format!("{} (scaled)", a.name));
        }
        headers
    }

    /// Row `i` as (metric, values in header order)
    pub fn row(&self, i: usize) -> (&str, Vec<f64>) {
        let values = self
            .assemblies
            .iter()
            .flat_map(|a| [a.absolute[i], a.scaled[i]])
            .collect();
        (self.metrics[i].as_str(), values)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, Vec<f64>)> {
        (0..self.metrics.len()).map(move |i| self.row(i))
    }
}
