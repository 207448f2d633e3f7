use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use mediasort_core::{table, Analysis, MediaFile};

#[derive(Parser)]
#[command(name = "mediasort", version, about = "Analyze camera files and copy them under date-based names")]
struct Cli {
    /// Directory containing the media files
    dir: PathBuf,

    /// Print timestamp statistics and unusual file names
    #[arg(short, long)]
    analyze: bool,

    /// Copy files into this directory under normalized names
    #[arg(short, long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    let mut files = mediasort_core::scan_dir(&cli.dir)
        .with_context(|| format!("failed to read {}", cli.dir.display()))?;

    if cli.analyze {
        println!("Analyzing media files");
        let mut analysis = Analysis::new();
        files = analysis.perform(files).collect::<Vec<MediaFile>>();
        println!("{}", table::render_report(&analysis));
    }

    if let Some(out) = &cli.out {
        println!("Writing files to '{}'", out.display());

        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40}] {pos}/{len} copying files")
                .context("invalid progress template")?,
        );

        let summary = mediasort_core::write_output(&mut files, out, &|_stage, _current, _total, message| {
            pb.suspend(|| println!("{message}"));
            pb.inc(1);
        })
        .with_context(|| format!("failed to copy files to {}", out.display()))?;

        pb.finish_and_clear();
        println!("{summary}");
    }

    Ok(())
}
