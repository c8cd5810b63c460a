//! Align command handler

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;

use tgalign::files::{self, WritePolicy};
use tgalign::pipeline::{self, AlignJob, AlignOutcome, BatchEntry};
use tgalign::textgrid::TierSelector;
use tgalign::Config;

use super::findings_summary;

/// Per-document entry of the JSON report.
#[derive(Debug, Serialize)]
pub struct DocumentResult<'a> {
    pub textgrid: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<&'a AlignOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> From<&'a BatchEntry> for DocumentResult<'a> {
    fn from(entry: &'a BatchEntry) -> Self {
        let (outcome, error) = match &entry.result {
            Ok(outcome) => (Some(outcome), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            textgrid: &entry.job.textgrid,
            outcome,
            error,
        }
    }
}

/// Turn CLI paths into jobs. An explicit transcript only makes sense for a
/// single TextGrid.
pub fn build_jobs(paths: &[PathBuf], transcript: Option<&Path>) -> Result<Vec<AlignJob>> {
    let inputs = files::expand_inputs(paths)?;
    if inputs.is_empty() {
        bail!("No TextGrid files found");
    }
    match transcript {
        Some(transcript) if inputs.len() > 1 => bail!(
            "--transcript {} given for {} TextGrid files; it applies to a single file",
            transcript.display(),
            inputs.len()
        ),
        Some(transcript) => Ok(vec![AlignJob::new(&inputs[0]).with_transcript(transcript)]),
        None => Ok(inputs.into_iter().map(AlignJob::new).collect()),
    }
}

fn print_entry(entry: &BatchEntry) {
    let name = entry.job.textgrid.display();
    match &entry.result {
        Ok(AlignOutcome::InputMissing { missing }) => {
            println!("{}: skipped, {} not found", name, missing.display());
        }
        Ok(AlignOutcome::Aligned(report)) => {
            let status = if report.written.is_empty() && !report.kept.is_empty() {
                "outputs exist, kept"
            } else {
                "written"
            };
            println!(
                "{}: {}/{} lines aligned, {} blocks, {} ({})",
                name,
                report.aligned,
                report.lines,
                report.blocks,
                findings_summary(&report.findings),
                status
            );
        }
        Err(e) => println!("{}: failed: {}", name, e),
    }
}

/// Align every given TextGrid and write its outputs.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    config: &Config,
    paths: &[PathBuf],
    transcript: Option<&Path>,
    tier: Option<TierSelector>,
    force: bool,
    report: Option<&Path>,
    jobs: Option<usize>,
) -> Result<()> {
    let mut config = config.clone();
    if let Some(tier) = tier {
        config.alignment.word_tier = tier;
    }

    let jobs_list = build_jobs(paths, transcript)?;
    let entries = pipeline::align_batch(jobs_list, &config, WritePolicy::from_force(force), jobs);

    for entry in &entries {
        print_entry(entry);
    }

    if let Some(path) = report {
        let results: Vec<DocumentResult> = entries.iter().map(DocumentResult::from).collect();
        pipeline::write_report(path, "align", &results)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
    }

    let failed = entries.iter().filter(|e| e.result.is_err()).count();
    if failed > 0 {
        bail!("{} of {} documents failed", failed, entries.len());
    }
    Ok(())
}
