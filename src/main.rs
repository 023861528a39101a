mod cli_main;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use cli_main::Cli;
use rnaquast_compare::io::export::format_table;
use rnaquast_compare::pipeline::compare;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Setting tracing default failed")?;

    let config = cli.into_config();
    info!("Comparing {} rnaQUAST reports", config.report_dirs.len());

    let summary = compare::run(&config).context("Comparison failed")?;

    print!("{}", format_table(&summary.comparison.combined));
    info!("Results written to {}", summary.output_dir.display());
    println!("Done");
    Ok(())
}
