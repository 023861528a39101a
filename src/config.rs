//! Run configuration resolved from command-line arguments

use std::path::PathBuf;

use plotters::style::RGBColor;

use crate::error::{CompareError, Result};
use crate::visualize::palette::{parse_hex, random_palette};

/// Placeholder accepted for `--names`/`--colors` meaning "derive a default"
pub const AUTO: &str = "auto";

#[derive(Debug, Clone)]
pub struct CompareConfig {
    pub report_dirs: Vec<PathBuf>,
    /// Display names; `None` uses each report's column header
    pub names: Option<Vec<String>>,
    /// `#rrggbb` colors; `None` picks random ones
    pub colors: Option<Vec<String>>,
    /// Directory the timestamped output directory is created in
    pub output_root: PathBuf,
    pub render_plots: bool,
}

/// `None` for a missing list or the lone `auto` placeholder
fn explicit(list: Option<Vec<String>>) -> Option<Vec<String>> {
    list.filter(|l| !(l.len() == 1 && l[0] == AUTO))
}

impl CompareConfig {
    pub fn new(report_dirs: Vec<PathBuf>) -> Self {
        CompareConfig {
            report_dirs,
            names: None,
            colors: None,
            output_root: PathBuf::from("."),
            render_plots: true,
        }
    }

    pub fn with_names(mut self, names: Option<Vec<String>>) -> Self {
        self.names = explicit(names);
        self
    }

    pub fn with_colors(mut self, colors: Option<Vec<String>>) -> Self {
        self.colors = explicit(colors);
        self
    }

    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    pub fn with_plots(mut self, render_plots: bool) -> Self {
        self.render_plots = render_plots;
        self
    }

    /// Check parameter counts and color syntax before any report is read
    pub fn validate(&self) -> Result<()> {
        let expected = self.report_dirs.len();
        if expected == 0 {
            return Err(CompareError::Parameter(
                "at least one report directory is required".to_string(),
            ));
        }
        if let Some(names) = &self.names {
            if names.len() != expected {
                return Err(CompareError::ParameterCount {
                    what: "names",
                    given: names.len(),
                    expected,
                });
            }
        }
        if let Some(colors) = &self.colors {
            if colors.len() != expected {
                return Err(CompareError::ParameterCount {
                    what: "colors",
                    given: colors.len(),
                    expected,
                });
            }
            for c in colors {
                parse_hex(c)?;
            }
        }
        Ok(())
    }

    /// Explicit names, or the given per-report defaults
    pub fn resolve_names(&self, defaults: Vec<String>) -> Vec<String> {
        self.names.clone().unwrap_or(defaults)
    }

    /// Explicit colors, or one random color per report
    pub fn resolve_colors(&self) -> Result<Vec<RGBColor>> {
        let hex = self
            .colors
            .clone()
            .unwrap_or_else(|| random_palette(self.report_dirs.len()));
        hex.iter().map(|c| parse_hex(c)).collect()
    }
}
