//! Document-level runs of the engine.
//!
//! Each function reads its inputs, runs the in-memory stages, and only then
//! touches the filesystem, so a fatal error never leaves partial output
//! behind. Findings are advisory and come back in the reports.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::align::{extract_segments, AlignmentSession, LineMerger, LineSegment, TextSegment};
use crate::config::Config;
use crate::diagnostics::{Finding, Findings};
use crate::files::{self, FileError, WritePolicy};
use crate::split::{self, AudioCutter, SplitReport, Splitter};
use crate::textgrid::{TextGrid, TextGridError};
use crate::timestamp::{format_clock, format_clock_with_hours};
use crate::validate::{render_numbered, validate_text};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    TextGrid(#[from] TextGridError),

    #[error(transparent)]
    File(#[from] FileError),

    #[error("invalid split.group_pattern: {0}")]
    GroupPattern(#[from] regex::Error),

    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

/// One TextGrid to align, with an optional explicit transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignJob {
    pub textgrid: PathBuf,
    pub transcript: Option<PathBuf>,
}

impl AlignJob {
    pub fn new(textgrid: impl Into<PathBuf>) -> Self {
        Self {
            textgrid: textgrid.into(),
            transcript: None,
        }
    }

    pub fn with_transcript(mut self, transcript: impl Into<PathBuf>) -> Self {
        self.transcript = Some(transcript.into());
        self
    }

    /// The explicit transcript, or the one next to the TextGrid.
    pub fn transcript_path(&self, config: &Config) -> PathBuf {
        self.transcript
            .clone()
            .unwrap_or_else(|| files::transcript_path(&self.textgrid, &config.files))
    }
}

/// Counts, findings and files of one aligned document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentReport {
    pub textgrid: PathBuf,
    pub transcript: PathBuf,
    /// Non-blank transcript lines.
    pub lines: usize,
    pub aligned: usize,
    pub skipped: usize,
    pub unmatched: usize,
    pub blocks: usize,
    pub findings: Vec<Finding>,
    pub written: Vec<PathBuf>,
    pub kept: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AlignOutcome {
    /// An input file does not exist; nothing was done.
    InputMissing { missing: PathBuf },
    Aligned(DocumentReport),
}

fn missing_input(paths: &[&Path]) -> Option<PathBuf> {
    paths.iter().find(|p| !p.exists()).map(|p| p.to_path_buf())
}

/// Render per-line output: times roll over into hours.
pub fn render_lines(lines: &[LineSegment]) -> String {
    let mut out = String::new();
    for line in lines {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}",
            line.line_number,
            format_clock_with_hours(line.start_time),
            format_clock_with_hours(line.end_time),
            line.text
        );
    }
    out
}

/// Render merged blocks numbered from 1; minutes are not rolled over.
pub fn render_blocks(blocks: &[TextSegment]) -> String {
    let mut out = String::new();
    for (i, block) in blocks.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}",
            i + 1,
            format_clock(block.start_time),
            format_clock(block.end_time),
            block.text
        );
    }
    out
}

/// Align one document and write its per-line and merged outputs.
pub fn align_document(
    job: &AlignJob,
    config: &Config,
    policy: WritePolicy,
) -> Result<AlignOutcome, PipelineError> {
    let transcript = job.transcript_path(config);
    let _span = tracing::info_span!("align", textgrid = %job.textgrid.display()).entered();

    if let Some(missing) = missing_input(&[&job.textgrid, &transcript]) {
        tracing::warn!(path = %missing.display(), "Input missing, nothing to do");
        return Ok(AlignOutcome::InputMissing { missing });
    }

    let grid = TextGrid::parse(&job.textgrid)?;
    let segments = extract_segments(
        &grid,
        &config.alignment.word_tier,
        &config.alignment.sentinel,
    )?;
    let text = files::read_text(&transcript)?;
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();

    let alignment =
        AlignmentSession::new(&segments, &config.alignment).align_lines(lines.iter().copied());
    let merge = LineMerger::new(&config.merge).merge(&alignment.lines);

    let lines_path = files::lines_path(&job.textgrid, &config.files);
    let aligned_path = files::aligned_path(&job.textgrid, &config.files);
    let lines_text = render_lines(&alignment.lines);
    let blocks_text = render_blocks(&merge.blocks);
    let outcome = files::write_group(
        policy,
        &[
            (lines_path.as_path(), lines_text.as_str()),
            (aligned_path.as_path(), blocks_text.as_str()),
        ],
    )?;

    let mut findings = alignment.findings;
    findings.extend(merge.findings);

    Ok(AlignOutcome::Aligned(DocumentReport {
        textgrid: job.textgrid.clone(),
        transcript,
        lines: lines.len(),
        aligned: alignment.lines.len(),
        skipped: alignment.skipped,
        unmatched: alignment.unmatched,
        blocks: merge.blocks.len(),
        findings: findings.into_vec(),
        written: outcome.written,
        kept: outcome.skipped,
    }))
}

/// Result of one job of a batch.
#[derive(Debug)]
pub struct BatchEntry {
    pub job: AlignJob,
    pub result: Result<AlignOutcome, PipelineError>,
}

/// Align independent documents, in parallel when there is more than one.
///
/// `workers` caps the thread count; `None` lets rayon decide. Each document
/// gets its own session, so results do not depend on scheduling.
pub fn align_batch(
    jobs: Vec<AlignJob>,
    config: &Config,
    policy: WritePolicy,
    workers: Option<usize>,
) -> Vec<BatchEntry> {
    let run = |job: AlignJob| {
        let result = align_document(&job, config, policy);
        BatchEntry { job, result }
    };

    if jobs.len() <= 1 || workers == Some(1) {
        return jobs.into_iter().map(run).collect();
    }

    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("align-{}", i));
    if let Some(n) = workers {
        builder = builder.num_threads(n);
    }
    match builder.build() {
        Ok(pool) => pool.install(|| jobs.into_par_iter().map(run).collect()),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to create thread pool, aligning sequentially");
            jobs.into_iter().map(run).collect()
        }
    }
}

/// Counts, findings and output of one format check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub checked: usize,
    pub kept: usize,
    pub dropped: usize,
    pub findings: Vec<Finding>,
    pub written: bool,
}

/// Check an aligned file and write the surviving lines next to it.
pub fn validate_file(
    input: &Path,
    output: Option<&Path>,
    config: &Config,
    policy: WritePolicy,
) -> Result<CheckReport, PipelineError> {
    let _span = tracing::info_span!("check", input = %input.display()).entered();
    let content = files::read_text(input)?;
    let validation = validate_text(&content, &config.validation);

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| files::checked_path(input, &config.files));
    let rendered = render_numbered(&validation.lines);
    let outcome = files::write_group(policy, &[(output.as_path(), rendered.as_str())])?;

    Ok(CheckReport {
        input: input.to_path_buf(),
        output,
        checked: validation.checked,
        kept: validation.lines.len(),
        dropped: validation.dropped(),
        findings: validation.findings.into_vec(),
        written: !outcome.written.is_empty(),
    })
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SplitOutcome {
    InputMissing { missing: PathBuf },
    Split {
        audio: PathBuf,
        timestamps: PathBuf,
        report: SplitReport,
        findings: Vec<Finding>,
    },
}

/// Cut `audio` along its checked timestamps.
///
/// `timestamps` defaults to the checked file next to the audio and
/// `output_dir` to the group directory derived from the audio stem.
pub fn split_file(
    audio: &Path,
    timestamps: Option<&Path>,
    output_dir: Option<&Path>,
    config: &Config,
    cutter: &dyn AudioCutter,
) -> Result<SplitOutcome, PipelineError> {
    let _span = tracing::info_span!("split", audio = %audio.display()).entered();
    let timestamps = timestamps
        .map(Path::to_path_buf)
        .unwrap_or_else(|| files::timestamps_path(audio, &config.files));

    if let Some(missing) = missing_input(&[audio, &timestamps]) {
        tracing::warn!(path = %missing.display(), "Input missing, nothing to do");
        return Ok(SplitOutcome::InputMissing { missing });
    }

    let output_dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => {
            let pattern = regex::Regex::new(&config.split.group_pattern)?;
            split::output_dir(audio, &pattern)
        }
    };

    let content = files::read_text(&timestamps)?;
    let mut findings = Findings::new();
    let entries = split::read_entries(&content, &mut findings);
    let plans = split::plan_clips(audio, &entries, &output_dir);
    let mut report = Splitter::new(cutter).run(audio, &output_dir, &plans)?;
    findings.extend(std::mem::take(&mut report.findings));

    Ok(SplitOutcome::Split {
        audio: audio.to_path_buf(),
        timestamps,
        report,
        findings: findings.into_vec(),
    })
}

#[derive(Serialize)]
struct Report<'a, T: Serialize> {
    generated_at: String,
    version: &'static str,
    command: &'a str,
    result: &'a T,
}

/// Write a JSON report wrapping `result` with a timestamp and the command name.
pub fn write_report<T: Serialize>(
    path: &Path,
    command: &str,
    result: &T,
) -> Result<(), PipelineError> {
    let report = Report {
        generated_at: chrono::Local::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
        command,
        result,
    };
    let json = serde_json::to_string_pretty(&report)?;
    files::atomic_write(path, &json)?;
    tracing::info!(path = %path.display(), "Wrote report");
    Ok(())
}
