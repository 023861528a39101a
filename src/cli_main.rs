use std::path::PathBuf;

use clap::Parser;
use rnaquast_compare::CompareConfig;

#[derive(Parser, Debug)]
#[command(
    name = "rnaquast-compare",
    version,
    about = "Comparative tables and plots for rnaQUAST reports of multiple assemblies",
    long_about = None
)]
pub struct Cli {
    /// Paths to rnaQUAST output directories
    #[arg(required = true, num_args = 1..)]
    pub report_dirs: Vec<PathBuf>,

    /// Names for the assemblies, one per report (default: report column headers)
    #[arg(short, long, num_args = 1..)]
    pub names: Option<Vec<String>>,

    /// Colors as hex codes, one per report (default: random)
    #[arg(short, long, num_args = 1..)]
    pub colors: Option<Vec<String>>,

    /// Directory in which the timestamped output directory is created
    #[arg(short, long, default_value = ".")]
    pub output_root: PathBuf,

    /// Skip chart rendering
    #[arg(long)]
    pub no_plots: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn into_config(self) -> CompareConfig {
        CompareConfig::new(self.report_dirs)
            .with_names(self.names)
            .with_colors(self.colors)
            .with_output_root(self.output_root)
            .with_plots(!self.no_plots)
    }
}
