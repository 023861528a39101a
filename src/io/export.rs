use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{CompareError, Result};
use crate::eval::CombinedTable;

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| CompareError::io(path, e))?;
    Ok(BufWriter::new(file))
}

/// Write the combined table as delimited text, one record per metric
fn write_delimited(table: &CombinedTable, delimiter: u8, output_path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(output_path)
        .map_err(|e| CompareError::csv(output_path, e))?;

    writer
        .write_record(table.headers())
        .map_err(|e| CompareError::csv(output_path, e))?;
    for (metric, values) in table.rows() {
        let record = std::iter::once(metric.to_string()).chain(values.iter().map(f64::to_string));
        writer
            .write_record(record)
            .map_err(|e| CompareError::csv(output_path, e))?;
    }
    writer.flush().map_err(|e| CompareError::io(output_path, e))
}

/// Export the combined table as tab-separated text
pub fn write_tsv(table: &CombinedTable, output_path: &Path) -> Result<()> {
    write_delimited(table, b'\t', output_path)
}

/// Export the combined table as comma-separated text
pub fn write_csv(table: &CombinedTable, output_path: &Path) -> Result<()> {
    write_delimited(table, b',', output_path)
}

/// Escape LaTeX special characters in a table cell
pub fn escape_latex(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '&' | '#' | '$' | '{' | '}') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn write_latex_body<W: Write>(table: &CombinedTable, writer: &mut W) -> io::Result<()> {
    let headers = table.headers();
    writeln!(writer, "\\begin{{tabular}}{{l{}}}", "r".repeat(headers.len() - 1))?;
    writeln!(writer, "\\hline")?;
    let header_cells: Vec<String> = headers.iter().map(|h| escape_latex(h)).collect();
    writeln!(writer, "{} \\\\", header_cells.join(" & "))?;
    writeln!(writer, "\\hline")?;
    for (metric, values) in table.rows() {
        let cells: Vec<String> = values.iter().map(|v| format!("{v:.4}")).collect();
        writeln!(writer, "{} & {} \\\\", escape_latex(metric), cells.join(" & "))?;
    }
    writeln!(writer, "\\hline")?;
    writeln!(writer, "\\end{{tabular}}")?;
    Ok(())
}

/// Export the combined table as a LaTeX tabular
pub fn write_latex(table: &CombinedTable, output_path: &Path) -> Result<()> {
    let mut writer = create(output_path)?;
    write_latex_body(table, &mut writer)
        .and_then(|_| writer.flush())
        .map_err(|e| CompareError::io(output_path, e))
}

/// Export the combined table as JSON
pub fn write_json(table: &CombinedTable, output_path: &Path) -> Result<()> {
    let mut writer = create(output_path)?;
    serde_json::to_writer_pretty(&mut writer, table)?;
    writer.flush().map_err(|e| CompareError::io(output_path, e))
}

/// Render the combined table as aligned plain text for the terminal
pub fn format_table(table: &CombinedTable) -> String {
    let headers = table.headers();
    let rows: Vec<Vec<String>> = table
        .rows()
        .map(|(metric, values)| {
            std::iter::once(metric.to_string())
                .chain(values.iter().map(|v| format!("{v:.4}")))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(String::len).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let render = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, &w))| {
                if i == 0 {
                    format!("{cell:<w$}")
                } else {
                    format!("{cell:>w$}")
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut out = render(&headers);
    out.push('\n');
    for row in &rows {
        out.push_str(&render(row));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::combined::AssemblyColumns;
    use std::fs;
    use tempfile::tempdir;

    fn combined() -> CombinedTable {
        CombinedTable {
            metrics: vec!["50%-matched".to_string(), "Aligned, total".to_string()],
            assemblies: vec![AssemblyColumns {
                name: "trinity".to_string(),
                absolute: vec![300.0, 900.0],
                scaled: vec![0.25, 0.75],
            }],
        }
    }

    #[test]
    fn test_write_tsv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.tsv");
        write_tsv(&combined(), &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "metric\ttrinity (absolute)\ttrinity (scaled)");
        assert_eq!(lines[1], "50%-matched\t300\t0.25");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_write_csv_quotes_commas() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&combined(), &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"Aligned, total\",900,0.75"));
        assert!(contents.starts_with("metric,trinity (absolute),trinity (scaled)"));
    }

    #[test]
    fn test_latex_escapes_metric_percent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.tex");
        write_latex(&combined(), &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("50\\%-matched & 300.0000 & 0.2500 \\\\"));
        assert!(contents.contains("\\begin{tabular}{lrr}"));
    }

    #[test]
    fn test_write_csv_quotes_embedded_quotes() {
        let mut table = combined();
        table.metrics[0] = "Reads \"mapped\"".to_string();
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&table, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][0], "Reads \"mapped\"");
        assert_eq!(&records[1][0], "Aligned, total");
        assert_eq!(&records[1][2], "0.75");
    }

    #[test]
    fn test_latex_escapes_header_names() {
        let mut table = combined();
        table.assemblies[0].name = "trinity_k25 & 50%".to_string();
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.tex");
        write_latex(&table, &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains(
            "metric & trinity\\_k25 \\& 50\\% (absolute) & trinity\\_k25 \\& 50\\% (scaled) \\\\"
        ));
        assert!(!contents.contains("trinity_k25"));
    }

    #[test]
    fn test_escape_latex() {
        assert_eq!(escape_latex("a_b"), "a\\_b");
        assert_eq!(escape_latex("x & y #1 $"), "x \\& y \\#1 \\$");
        assert_eq!(escape_latex("Avg. aligned fraction"), "Avg. aligned fraction");
    }

    #[test]
    fn test_write_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json(&combined(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["metrics"][0], "50%-matched");
        assert_eq!(value["assemblies"][0]["scaled"][1], 0.75);
    }

    #[test]
    fn test_format_table_aligns_columns() {
        let text = format_table(&combined());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("50%-matched"));
        assert!(lines[1].ends_with("0.2500"));
        assert_eq!(lines[1].len(), lines[2].len());
    }
}
