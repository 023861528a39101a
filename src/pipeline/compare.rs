//! End-to-end comparison of rnaQUAST reports.
//!
//! Stages run strictly in order and each one consumes the previous stage's
//! output: load → consistency check → unit conversion (all tables) →
//! scaling → combine → export.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Local;
use tracing::info;

use crate::config::CompareConfig;
use crate::error::{CompareError, Result};
use crate::eval::consistency::shared_database;
use crate::eval::scale::{convert_units, scale};
use crate::eval::{CombinedTable, ConvertedTable, DatabaseMetrics, ScaledTable};
use crate::io::export::{write_csv, write_json, write_latex, write_tsv};
use crate::io::report::{load_reports, Report};
use crate::visualize::plot::render_charts;

/// File name prefix of every output file
pub const OUTPUT_PREFIX: &str = "rnaQUAST_comparison";
/// chrono format of the output directory name
pub const OUTPUT_DIR_FORMAT: &str = "%dd%mm%Yy_%Hh%Mm%Ss";

/// Scaled results of one comparison
#[derive(Debug, Clone)]
pub struct Comparison {
    pub database: DatabaseMetrics,
    pub scaled: Vec<ScaledTable>,
    pub combined: CombinedTable,
}

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_dir: PathBuf,
    pub files: Vec<PathBuf>,
    pub comparison: Comparison,
}

/// Validate, convert, scale and combine loaded reports
pub fn compare_reports(reports: Vec<Report>, names: &[String]) -> Result<Comparison> {
    let databases: Vec<(String, DatabaseMetrics)> = reports
        .iter()
        .map(|r| (r.table.assembly.clone(), r.database))
        .collect();
    let database = shared_database(&databases)?;

    let converted: Vec<ConvertedTable> = reports
        .into_iter()
        .map(|r| convert_units(r.table))
        .collect::<Result<_>>()?;
    info!("Converted mismatch rates for {} reports", converted.len());

    let scaled = scale(converted, &database)?;
    let combined = CombinedTable::build(&scaled, names)?;

    Ok(Comparison {
        database,
        scaled,
        combined,
    })
}

/// Create `<root>/<timestamp>`; fails if it already exists
pub fn create_output_dir(root: &Path) -> Result<PathBuf> {
    fs::create_dir_all(root).map_err(|e| CompareError::io(root, e))?;
    let dir = root.join(Local::now().format(OUTPUT_DIR_FORMAT).to_string());
    fs::create_dir(&dir).map_err(|e| CompareError::io(&dir, e))?;
    Ok(dir)
}

/// Write the combined table in every export format
pub fn export_tables(combined: &CombinedTable, prefix: &Path) -> Result<Vec<PathBuf>> {
    let path = |ext: &str| prefix.with_extension(ext);
    let files = vec![path("tsv"), path("csv"), path("tex"), path("json")];

    write_tsv(combined, &files[0])?;
    write_csv(combined, &files[1])?;
    write_latex(combined, &files[2])?;
    write_json(combined, &files[3])?;

    for f in &files {
        info!("Table written to {}", f.display());
    }
    Ok(files)
}

/// Run a full comparison. Nothing is written unless every input check and
/// the scaling pass succeed.
pub fn run(config: &CompareConfig) -> Result<RunSummary> {
    let start = Instant::now();
    config.validate()?;
    let colors = config.resolve_colors()?;

    let reports = load_reports(&config.report_dirs)?;
    let names = config.resolve_names(reports.iter().map(|r| r.table.assembly.clone()).collect());
    let comparison = compare_reports(reports, &names)?;

    let output_dir = create_output_dir(&config.output_root)?;
    let prefix = output_dir.join(OUTPUT_PREFIX);

    let mut files = export_tables(&comparison.combined, &prefix)?;
    if config.render_plots {
        files.extend(render_charts(&comparison.combined, &colors, &prefix)?);
    }

    info!(
        "Compared {} assemblies in {:.2}s",
        names.len(),
        start.elapsed().as_secs_f32()
    );
    Ok(RunSummary {
        output_dir,
        files,
        comparison,
    })
}
