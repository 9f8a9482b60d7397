mod batch;
mod settings;
mod error;
mod output;
mod parser;
mod record;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::Parser;

use crate::settings::Settings;
use crate::parser::Pipeline;

#[derive(Parser)]
#[command(
    name = "question_scraper",
    about = "Extract practice questions from PathOutlines HTML pages into import-ready JSON"
)]
struct Cli {
    /// HTML file to scrape
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    file: Option<PathBuf>,

    /// Scrape every .html file in the input directory
    #[arg(long)]
    all: bool,

    /// Output JSON file (single-file mode)
    #[arg(short, long, default_value = "questions.json")]
    output: PathBuf,

    /// Input directory (--all mode)
    #[arg(long, default_value = "./pathoutlines")]
    input_dir: PathBuf,

    /// Output directory (--all mode)
    #[arg(long, default_value = "./scraped-questions")]
    output_dir: PathBuf,

    /// Override the category instead of looking it up from the filename
    #[arg(short, long, conflicts_with = "all")]
    category: Option<String>,

    /// TOML settings file (PQ_* environment variables override it)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).context("Invalid settings")?;
    let pipeline = Pipeline::new(settings).context("Invalid settings")?;

    if cli.all {
        if !cli.input_dir.is_dir() {
            bail!("Input directory {} not found", cli.input_dir.display());
        }
        println!("Scraping all documents in {}...", cli.input_dir.display());
        let stats = batch::run_batch(&pipeline, &cli.input_dir, &cli.output_dir)?;
        stats.print();
    } else {
        let Some(file) = cli.file else {
            bail!("Please provide an HTML file to scrape or use --all");
        };
        if !file.exists() {
            bail!("File {} not found", file.display());
        }
        let report = pipeline.scan_file(&file, cli.category.as_deref())?;
        output::write_records(&cli.output, &report.records)?;
        println!(
            "Extracted {} questions from {} ({} skipped: {} incomplete, {} failed). Category: {}",
            report.records.len(),
            report.source_file,
            report.skipped(),
            report.discarded,
            report.failed,
            report.category,
        );
        println!("Saved {} questions to {}", report.records.len(), cli.output.display());
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
