use anyhow::Context;
use clap::Parser;
use itinerary_diff::{compare_files, write_report, ReportConfig, ReportFormat};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Diff between two or more flight itinerary XML responses.
#[derive(Debug, Parser)]
#[command(name = "itinerary-diff", version)]
struct Args {
    /// Baseline response every other file is compared with
    #[arg(value_name = "base_filename.xml")]
    base_filename: PathBuf,

    /// Responses to compare with the baseline
    #[arg(value_name = "filename.xml", required = true, num_args = 1..)]
    filenames: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Print per-file counts after the records
    #[arg(long)]
    summary: bool,
}

impl Args {
    fn to_config(&self) -> ReportConfig {
        ReportConfig {
            format: self.format,
            show_summary: self.summary,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    debug!(?args, "starting comparison");
    run(&args)
}

fn run(args: &Args) -> anyhow::Result<()> {
    let results = compare_files(&args.base_filename, &args.filenames)
        .context("comparison aborted")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &results, &args.to_config()).context("cannot write report")?;
    out.flush()?;
    Ok(())
}
