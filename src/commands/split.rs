//! Split command handler

use std::path::Path;

use anyhow::{Context, Result};

use tgalign::pipeline::{self, SplitOutcome};
use tgalign::split::FfmpegCutter;
use tgalign::Config;

use super::findings_summary;

/// Cut `audio` into clips with ffmpeg.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    config: &Config,
    audio: &Path,
    timestamps: Option<&Path>,
    output_dir: Option<&Path>,
    report: Option<&Path>,
) -> Result<()> {
    let cutter = FfmpegCutter::from_config(&config.split);
    let outcome = pipeline::split_file(audio, timestamps, output_dir, config, &cutter)
        .with_context(|| format!("Failed to split {}", audio.display()))?;

    match &outcome {
        SplitOutcome::InputMissing { missing } => {
            println!("{}: skipped, {} not found", audio.display(), missing.display());
        }
        SplitOutcome::Split {
            report, findings, ..
        } => {
            println!(
                "{}: {} clips in {}, {} failed, {}",
                audio.display(),
                report.clips.len(),
                report.output_dir.display(),
                report.failed,
                findings_summary(findings)
            );
        }
    }

    if let Some(path) = report {
        pipeline::write_report(path, "split", &outcome)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
    }
    Ok(())
}
