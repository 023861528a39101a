use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::{info, warn};

use crate::error::{CompareError, Result};
use crate::eval::{classify, CombinedTable, MetricClass};

/// Leading report rows (raw transcript counts) left out of every chart
pub const SKIPPED_ROWS: usize = 2;

const WIDTH: u32 = 1200;
const ROW_HEIGHT: u32 = 36;
const LABEL_AREA: u32 = 320;

/// One assembly's values for the charted rows
struct Series<'a> {
    name: &'a str,
    color: RGBColor,
    values: Vec<f64>,
}

/// Indices of combined-table rows that appear in charts
pub fn charted_rows(table: &CombinedTable) -> Vec<usize> {
    (SKIPPED_ROWS..table.metrics.len()).collect()
}

/// Charted rows grouped by metric class, skipping empty classes
pub fn rows_by_class(table: &CombinedTable) -> Vec<(MetricClass, Vec<usize>)> {
    let rows = charted_rows(table);
    MetricClass::ALL
        .iter()
        .map(|&class| {
            let members: Vec<usize> = rows
                .iter()
                .copied()
                .filter(|&i| classify(&table.metrics[i]) == class)
                .collect();
            (class, members)
        })
        .filter(|(_, members)| !members.is_empty())
        .collect()
}

fn series<'a>(
    table: &'a CombinedTable,
    colors: &[RGBColor],
    rows: &[usize],
    scaled: bool,
) -> Vec<Series<'a>> {
    table
        .assemblies
        .iter()
        .zip(colors)
        .map(|(a, &color)| Series {
            name: &a.name,
            color,
            values: rows
                .iter()
                .map(|&i| if scaled { a.scaled[i] } else { a.absolute[i] })
                .collect(),
        })
        .collect()
}

fn x_upper(series: &[Series], floor: f64) -> f64 {
    series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .filter(|v| v.is_finite())
        .fold(floor, f64::max)
}

fn canvas_height(rows: usize, assemblies: usize, bars: bool) -> u32 {
    let per_row = if bars {
        ROW_HEIGHT.max(12 * assemblies as u32)
    } else {
        ROW_HEIGHT
    };
    160 + per_row * rows as u32
}

fn row_label(labels: &[String], y: f64) -> String {
    let idx = y.round();
    if (y - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

fn draw_lines(
    path: &Path,
    caption: &str,
    labels: &[String],
    series: &[Series],
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let n = labels.len();
    let root = BitMapBackend::new(path, (WIDTH, canvas_height(n, series.len(), false)))
        .into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(LABEL_AREA)
        .build_cartesian_2d(0f64..x_upper(series, 1.0), -0.5f64..(n as f64 - 0.5))?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n)
        .y_label_formatter(&|y| row_label(labels, *y))
        .y_label_style(("sans-serif", 16).into_font())
        .draw()?;

    for s in series {
        let color = s.color;
        chart
            .draw_series(LineSeries::new(
                s.values.iter().enumerate().map(|(i, &v)| (v, i as f64)),
                color.stroke_width(4),
            ))?
            .label(s.name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(4)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn draw_bars(
    path: &Path,
    caption: &str,
    labels: &[String],
    series: &[Series],
    x_max: f64,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let n = labels.len();
    let root = BitMapBackend::new(path, (WIDTH, canvas_height(n, series.len(), true)))
        .into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(LABEL_AREA)
        .build_cartesian_2d(0f64..x_max, -0.5f64..(n as f64 - 0.5))?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n)
        .y_label_formatter(&|y| row_label(labels, *y))
        .y_label_style(("sans-serif", 16).into_font())
        .draw()?;

    // bars of one metric share its unit slot, one band per assembly
    let width = 1.0 / series.len() as f64;
    let offset = width / 2.0 - 0.5;

    for (j, s) in series.iter().enumerate() {
        let color = s.color;
        chart
            .draw_series(s.values.iter().enumerate().map(|(i, &v)| {
                let y = offset + i as f64 + j as f64 * width;
                Rectangle::new([(0.0, y - width / 2.0), (v, y + width / 2.0)], color.filled())
            }))?
            .label(s.name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn render_err(path: &Path, e: Box<dyn std::error::Error>) -> CompareError {
    CompareError::Render(format!("{}: {}", path.display(), e))
}

/// Write line and bar charts of scaled values plus one absolute-value bar
/// chart per metric class. Returns the written paths.
pub fn render_charts(
    table: &CombinedTable,
    colors: &[RGBColor],
    prefix: &Path,
) -> Result<Vec<PathBuf>> {
    if colors.len() != table.assemblies.len() {
        return Err(CompareError::ParameterCount {
            what: "colors",
            given: colors.len(),
            expected: table.assemblies.len(),
        });
    }
    let rows = charted_rows(table);
    if rows.is_empty() || table.assemblies.is_empty() {
        warn!("Nothing to chart: {} metric rows", table.metrics.len());
        return Ok(Vec::new());
    }

    let with_suffix = |suffix: &str| -> PathBuf {
        let mut name = prefix.as_os_str().to_owned();
        name.push(format!("_{suffix}.png"));
        PathBuf::from(name)
    };
    let mut written = Vec::new();

    let labels: Vec<String> = rows.iter().map(|&i| table.metrics[i].clone()).collect();
    let scaled = series(table, colors, &rows, true);

    let lines_path = with_suffix("lines");
    draw_lines(&lines_path, "Scaled metrics", &labels, &scaled)
        .map_err(|e| render_err(&lines_path, e))?;
    written.push(lines_path);

    let bars_path = with_suffix("bars");
    draw_bars(&bars_path, "Scaled metrics", &labels, &scaled, x_upper(&scaled, 1.0))
        .map_err(|e| render_err(&bars_path, e))?;
    written.push(bars_path);

    for (class, members) in rows_by_class(table) {
        let labels: Vec<String> = members.iter().map(|&i| table.metrics[i].clone()).collect();
        let absolute = series(table, colors, &members, false);
        let x_max = x_upper(&absolute, 0.0) * 1.05;
        let x_max = if x_max > 0.0 { x_max } else { 1.0 };

        let path = with_suffix(&format!("absolute_{}", class.slug()));
        draw_bars(&path, &format!("{class} (absolute)"), &labels, &absolute, x_max)
            .map_err(|e| render_err(&path, e))?;
        written.push(path);
    }

    for path in &written {
        info!("Chart written to {}", path.display());
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::combined::AssemblyColumns;
    use std::fs;
    use tempfile::tempdir;

    fn table(metrics: &[&str]) -> CombinedTable {
        CombinedTable {
            metrics: metrics.iter().map(|m| m.to_string()).collect(),
            assemblies: vec![AssemblyColumns {
                name: "a".to_string(),
                absolute: vec![1.0; metrics.len()],
                scaled: vec![0.5; metrics.len()],
            }],
        }
    }

    #[test]
    fn test_leading_rows_are_not_charted() {
        let t = table(&["Transcripts", "Transcripts > 500 bp", "Aligned"]);
        assert_eq!(charted_rows(&t), vec![2]);
    }

    #[test]
    fn test_rows_grouped_by_class() {
        let t = table(&[
            "Transcripts",
            "Transcripts > 500 bp",
            "Aligned",
            "Database coverage",
            "50%-covered genes",
            "Unaligned",
        ]);
        let groups = rows_by_class(&t);
        assert_eq!(
            groups,
            vec![
                (MetricClass::GeneRelative, vec![4]),
                (MetricClass::TranscriptRelative, vec![2, 5]),
                (MetricClass::AlreadyScaled, vec![3]),
            ]
        );
    }

    #[test]
    fn test_row_label_only_on_integers() {
        let labels = vec!["a".to_string(), "b".to_string()];
        assert_eq!(row_label(&labels, 1.0), "b");
        assert_eq!(row_label(&labels, 0.5), "");
        assert_eq!(row_label(&labels, -1.0), "");
        assert_eq!(row_label(&labels, 5.0), "");
    }

    #[test]
    fn test_color_count_must_match() {
        let t = table(&["Transcripts", "Transcripts > 500 bp", "Aligned"]);
        let dir = std::env::temp_dir().join("never-written");
        assert!(matches!(
            render_charts(&t, &[], &dir),
            Err(CompareError::ParameterCount { .. })
        ));
    }

    #[test]
    fn test_render_charts_writes_every_chart() {
        let metrics = [
            "Transcripts",
            "Transcripts > 500 bp",
            "Aligned",
            "Database coverage",
            "50%-covered genes",
            "Unaligned",
        ];
        let t = CombinedTable {
            metrics: metrics.iter().map(|m| m.to_string()).collect(),
            assemblies: vec![
                AssemblyColumns {
                    name: "trinity".to_string(),
                    absolute: vec![1000.0, 500.0, 800.0, 0.87, 450.0, 200.0],
                    scaled: vec![0.5, 0.5, 0.8, 0.87, 0.5, 0.2],
                },
                AssemblyColumns {
                    name: "spades".to_string(),
                    absolute: vec![2000.0, 1000.0, 1000.0, 0.64, 300.0, 1000.0],
                    scaled: vec![1.0, 1.0, 0.5, 0.64, 0.33, 0.5],
                },
            ],
        };
        let colors = vec![RGBColor(200, 30, 30), RGBColor(30, 30, 200)];
        let dir = tempdir().unwrap();
        let prefix = dir.path().join("cmp");

        let written = render_charts(&t, &colors, &prefix).unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "cmp_lines.png",
                "cmp_bars.png",
                "cmp_absolute_genes.png",
                "cmp_absolute_transcripts.png",
                "cmp_absolute_fractions.png",
            ]
        );
        for path in &written {
            let bytes = fs::read(path).unwrap();
            assert!(bytes.starts_with(b"\x89PNG"), "{path:?} is not a PNG");
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 5);
    }

    #[test]
    fn test_nothing_to_chart() {
        let t = table(&["Transcripts"]);
        let written = render_charts(&t, &[RGBColor(0, 0, 0)], Path::new("unused")).unwrap();
        assert!(written.is_empty());
    }
}
