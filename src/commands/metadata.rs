//! Metadata command handler

use std::path::Path;

use anyhow::{Context, Result};

use tgalign::dataset;

/// Write `metadata.csv` for a directory of clips.
#[cfg(not(tarpaulin_include))]
pub fn handle(dir: &Path, extension: &str, remove_sidecars: bool) -> Result<()> {
    let report = dataset::write_metadata(dir, extension, remove_sidecars)
        .with_context(|| format!("Failed to write metadata for {}", dir.display()))?;

    match report {
        None => println!("{}: not a directory, nothing to do", dir.display()),
        Some(report) => {
            println!(
                "{}: {} rows, {} clips without text",
                report.csv.display(),
                report.rows,
                report.skipped.len()
            );
            if remove_sidecars {
                println!("Removed {} sidecars", report.removed.len());
            }
        }
    }
    Ok(())
}
