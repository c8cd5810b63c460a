//! Audio splitting along checked timestamps
//!
//! Each entry becomes one clip cut by an [`AudioCutter`] plus a text
//! sidecar holding the entry's transcript. A failed cut is recorded as a
//! finding and the remaining entries are still processed.
//!
//! # Example
//!
//! ```ignore
//! use tgalign::split::{FfmpegCutter, Splitter};
//!
//! let cutter = FfmpegCutter::default();
//! let report = Splitter::new(&cutter).run(audio, &out_dir, &plans)?;
//! println!("{} clips", report.clips.len());
//! ```

mod cutter;
mod plan;

pub use cutter::{AudioCutter, CutError, FfmpegCutter};
pub use plan::{output_dir, plan_clips, read_entries, ClipPlan};

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::diagnostics::{FindingKind, Findings, Stage};
use crate::files::FileError;

/// Outcome of cutting one audio file.
#[derive(Debug, Default, Serialize)]
pub struct SplitReport {
    pub output_dir: PathBuf,
    /// Clips cut successfully.
    pub clips: Vec<PathBuf>,
    pub failed: usize,
    #[serde(skip)]
    pub findings: Findings,
}

/// Runs a clip plan through a cutter.
pub struct Splitter<'a> {
    cutter: &'a dyn AudioCutter,
}

impl<'a> Splitter<'a> {
    pub fn new(cutter: &'a dyn AudioCutter) -> Self {
        Self { cutter }
    }

    /// Cut every planned clip of `audio` into `output_dir`.
    ///
    /// Only failing to create the output directory is an error.
    pub fn run(
        &self,
        audio: &Path,
        output_dir: &Path,
        plans: &[ClipPlan],
    ) -> Result<SplitReport, FileError> {
        fs::create_dir_all(output_dir).map_err(|source| FileError::Write {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let mut report = SplitReport {
            output_dir: output_dir.to_path_buf(),
            ..SplitReport::default()
        };

        for plan in plans {
            match self.cut_one(audio, plan) {
                Ok(()) => {
                    tracing::info!(clip = %plan.audio.display(), "Split audio");
                    report.clips.push(plan.audio.clone());
                }
                Err(message) => {
                    report.failed += 1;
                    report.findings.record(
                        Stage::Split,
                        plan.number,
                        FindingKind::ExternalToolFailure { message },
                    );
                }
            }
        }

        tracing::info!(
            cut = report.clips.len(),
            failed = report.failed,
            dir = %output_dir.display(),
            "Split finished"
        );
        Ok(report)
    }

    fn cut_one(&self, audio: &Path, plan: &ClipPlan) -> Result<(), String> {
        fs::write(&plan.sidecar, &plan.text)
            .map_err(|e| format!("failed to write {}: {}", plan.sidecar.display(), e))?;
        tracing::debug!(
            tool = self.cutter.name(),
            start = plan.start,
            end = plan.end,
            "Cutting clip"
        );
        self.cutter
            .cut(audio, plan.start, plan.end, &plan.audio)
            .map_err(|e| e.to_string())
    }
}
