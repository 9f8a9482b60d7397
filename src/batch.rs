use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::output::write_records;
use crate::parser::Pipeline;

/// Batch stats returned after completion.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub documents: usize,
    pub ok: usize,
    pub errors: usize,
    pub extracted: usize,
    pub skipped: usize,
}

impl BatchStats {
    pub fn print(&self) {
        println!(
            "Done: {} documents ({} ok, {} errors). {} questions extracted, {} skipped.",
            self.documents, self.ok, self.errors, self.extracted, self.skipped
        );
    }
}

/// `*.html` files directly inside `dir`, sorted by name.
pub fn list_html_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("Cannot list {}", dir.display()))? {
        let path = entry?.path();
        let is_html = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html"));
        if is_html && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Scan every document in `input_dir` in parallel and write one
/// `<stem>.json` per document into `output_dir`.
///
/// A document that cannot be read is counted and skipped. Failing to write
/// an output file aborts the run.
pub fn run_batch(pipeline: &Pipeline, input_dir: &Path, output_dir: &Path) -> Result<BatchStats> {
    let files = list_html_files(input_dir)?;
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let results: Vec<_> = files
        .par_iter()
        .map(|path| {
            let result = pipeline.scan_file(path, None);
            pb.inc(1);
            (path, result)
        })
        .collect();
    pb.finish_and_clear();

    let mut stats = BatchStats {
        documents: files.len(),
        ..Default::default()
    };

    for (path, result) in results {
        match result {
            Ok(report) => {
                let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
                let out = output_dir.join(format!("{}.json", stem));
                write_records(&out, &report.records)?;
                info!("Saved {} questions to {}", report.records.len(), out.display());
                stats.ok += 1;
                stats.extracted += report.records.len();
                stats.skipped += report.skipped();
            }
            Err(e) => {
                warn!("Error processing {}: {}", path.display(), e);
                stats.errors += 1;
            }
        }
    }

    Ok(stats)
}
