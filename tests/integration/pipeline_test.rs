//! End-to-end runs of the document pipeline on temporary files.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use tgalign::dataset;
use tgalign::diagnostics::{FindingKind, Stage};
use tgalign::files::WritePolicy;
use tgalign::pipeline::{
    align_batch, align_document, split_file, validate_file, write_report, AlignJob, AlignOutcome,
    DocumentReport, SplitOutcome,
};
use tgalign::split::{AudioCutter, CutError};
use tgalign::textgrid::TierSelector;
use tgalign::{Config, PipelineError, TextGridError};

use crate::helpers::write_document;

const LINES: &str =
    "1\t00:00.50\t00:01.50\tこんにちは、世界\n2\t00:02.50\t00:03.60\t元気ですか？\n";

fn aligned(outcome: AlignOutcome) -> DocumentReport {
    match outcome {
        AlignOutcome::Aligned(report) => report,
        other => panic!("expected an aligned document, got {other:?}"),
    }
}

#[test]
fn align_writes_lines_and_merged_blocks() {
    let tmp = tempfile::tempdir().unwrap();
    let textgrid = write_document(tmp.path(), "RJ0001_a");

    let report = aligned(
        align_document(
            &AlignJob::new(&textgrid),
            &Config::default(),
            WritePolicy::KeepExisting,
        )
        .unwrap(),
    );

    assert_eq!(report.lines, 2);
    assert_eq!(report.aligned, 2);
    assert_eq!(report.blocks, 1);
    assert!(report.findings.is_empty(), "{:?}", report.findings);
    assert_eq!(report.written.len(), 2);

    let lines = fs::read_to_string(tmp.path().join("RJ0001_a.lines.txt")).unwrap();
    assert_eq!(lines, LINES);
    let blocks = fs::read_to_string(tmp.path().join("RJ0001_a.aligned.txt")).unwrap();
    assert_eq!(blocks, "1\t00:00.50\t00:03.60\tこんにちは、世界、元気ですか？\n");
}

#[test]
fn short_merge_span_keeps_lines_apart() {
    let tmp = tempfile::tempdir().unwrap();
    let textgrid = write_document(tmp.path(), "a");
    let mut config = Config::default();
    config.merge.max_span = 2.0;

    let report = aligned(
        align_document(&AlignJob::new(&textgrid), &config, WritePolicy::Overwrite).unwrap(),
    );

    assert_eq!(report.blocks, 2);
    let blocks = fs::read_to_string(tmp.path().join("a.aligned.txt")).unwrap();
    assert_eq!(blocks, LINES);
}

#[test]
fn existing_outputs_are_kept_unless_forced() {
    let tmp = tempfile::tempdir().unwrap();
    let textgrid = write_document(tmp.path(), "a");
    let lines_path = tmp.path().join("a.lines.txt");
    fs::write(&lines_path, "old").unwrap();

    let report = aligned(
        align_document(&AlignJob::new(&textgrid), &Config::default(), WritePolicy::KeepExisting)
            .unwrap(),
    );
    assert!(report.written.is_empty());
    assert_eq!(report.kept.len(), 2);
    assert_eq!(fs::read_to_string(&lines_path).unwrap(), "old");
    assert!(!tmp.path().join("a.aligned.txt").exists());

    align_document(&AlignJob::new(&textgrid), &Config::default(), WritePolicy::Overwrite).unwrap();
    assert_eq!(fs::read_to_string(&lines_path).unwrap(), LINES);
}

#[test]
fn missing_transcript_is_a_no_op() {
    let tmp = tempfile::tempdir().unwrap();
    let textgrid = write_document(tmp.path(), "a");
    fs::remove_file(tmp.path().join("a.txt")).unwrap();

    let outcome =
        align_document(&AlignJob::new(&textgrid), &Config::default(), WritePolicy::Overwrite)
            .unwrap();

    match outcome {
        AlignOutcome::InputMissing { missing } => assert_eq!(missing, tmp.path().join("a.txt")),
        other => panic!("expected missing input, got {other:?}"),
    }
    assert!(!tmp.path().join("a.lines.txt").exists());
}

#[test]
fn explicit_transcript_replaces_the_sibling() {
    let tmp = tempfile::tempdir().unwrap();
    let textgrid = write_document(tmp.path(), "a");
    let script = tmp.path().join("script.txt");
    fs::write(&script, "元気ですか\n").unwrap();

    let job = AlignJob::new(&textgrid).with_transcript(&script);
    let report =
        aligned(align_document(&job, &Config::default(), WritePolicy::Overwrite).unwrap());

    assert_eq!(report.transcript, script);
    assert_eq!(report.aligned, 1);
    let lines = fs::read_to_string(tmp.path().join("a.lines.txt")).unwrap();
    assert_eq!(lines, "1\t00:02.50\t00:03.60\t元気ですか\n");
}

#[test]
fn unknown_tier_fails_without_writing() {
    let tmp = tempfile::tempdir().unwrap();
    let textgrid = write_document(tmp.path(), "a");
    let mut config = Config::default();
    config.alignment.word_tier = TierSelector::Name("syllables".into());

    let result = align_document(&AlignJob::new(&textgrid), &config, WritePolicy::Overwrite);

    assert!(matches!(
        result,
        Err(PipelineError::TextGrid(TextGridError::TierNotFound { .. }))
    ));
    assert!(!tmp.path().join("a.lines.txt").exists());
    assert!(!tmp.path().join("a.aligned.txt").exists());
}

#[test]
fn lines_without_words_are_reported_unmatched() {
    let tmp = tempfile::tempdir().unwrap();
    let textgrid = write_document(tmp.path(), "a");
    let mut config = Config::default();
    config.alignment.word_tier = TierSelector::Name("phones".into());

    let report = aligned(
        align_document(&AlignJob::new(&textgrid), &config, WritePolicy::Overwrite).unwrap(),
    );

    assert_eq!(report.aligned, 0);
    assert_eq!(report.unmatched, 2);
    assert!(report
        .findings
        .iter()
        .all(|f| f.stage == Stage::Align && matches!(f.kind, FindingKind::Unmatched { .. })));
}

#[test]
fn batch_aligns_each_document_independently() {
    let tmp = tempfile::tempdir().unwrap();
    let jobs = vec![
        AlignJob::new(write_document(tmp.path(), "a")),
        AlignJob::new(write_document(tmp.path(), "b")),
        AlignJob::new(tmp.path().join("missing.TextGrid")),
    ];

    let entries = align_batch(jobs, &Config::default(), WritePolicy::Overwrite, Some(2));

    assert_eq!(entries.len(), 3);
    for stem in ["a", "b"] {
        let lines = fs::read_to_string(tmp.path().join(format!("{stem}.lines.txt"))).unwrap();
        assert_eq!(lines, LINES);
    }
    assert!(matches!(
        entries[2].result,
        Ok(AlignOutcome::InputMissing { .. })
    ));
}

#[test]
fn check_writes_the_ok_file() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("a.aligned.txt");
    fs::write(
        &input,
        "1\t00:00.50\t00:03.60\tあ\n2\t00:05.00\t00:04.00\tい\n3\t00:06.00\t00:07.00\tう\n",
    )
    .unwrap();

    let report =
        validate_file(&input, None, &Config::default(), WritePolicy::KeepExisting).unwrap();

    assert_eq!(report.output, tmp.path().join("a.ok.txt"));
    assert_eq!((report.checked, report.kept, report.dropped), (3, 2, 1));
    assert!(report.written);
    assert_eq!(report.findings[0].unit, 2);
    assert_eq!(
        fs::read_to_string(tmp.path().join("a.ok.txt")).unwrap(),
        "1\t00:00.50\t00:03.60\tあ\n3\t00:06.00\t00:07.00\tう\n"
    );
}

/// Writes a marker file for each clip instead of running ffmpeg.
struct RecordingCutter {
    cuts: RefCell<Vec<(f64, f64)>>,
}

impl AudioCutter for RecordingCutter {
    fn name(&self) -> &str {
        "recording"
    }

    fn cut(&self, _input: &Path, start: f64, end: f64, output: &Path) -> Result<(), CutError> {
        self.cuts.borrow_mut().push((start, end));
        fs::write(output, b"clip").map_err(|source| CutError::Spawn {
            program: "recording".into(),
            source,
        })
    }
}

#[test]
fn align_check_split_and_collect_metadata() {
    let tmp = tempfile::tempdir().unwrap();
    let textgrid = write_document(tmp.path(), "RJ0001_a");
    let audio = tmp.path().join("RJ0001_a.mp3");
    fs::write(&audio, b"audio").unwrap();
    let config = Config::default();

    align_document(&AlignJob::new(&textgrid), &config, WritePolicy::Overwrite).unwrap();
    validate_file(
        &tmp.path().join("RJ0001_a.aligned.txt"),
        None,
        &config,
        WritePolicy::Overwrite,
    )
    .unwrap();

    let cutter = RecordingCutter {
        cuts: RefCell::new(Vec::new()),
    };
    let outcome = split_file(&audio, None, None, &config, &cutter).unwrap();

    let clip_dir = tmp.path().join("RJ0001");
    match &outcome {
        SplitOutcome::Split {
            report, findings, ..
        } => {
            assert_eq!(report.output_dir, clip_dir);
            assert_eq!(report.clips, vec![clip_dir.join("RJ0001_a_1.mp3")]);
            assert!(findings.is_empty());
        }
        other => panic!("expected a split, got {other:?}"),
    }
    let cuts = cutter.cuts.borrow();
    assert_eq!(cuts.len(), 1);
    assert!((cuts[0].0 - 0.5).abs() < 1e-9 && (cuts[0].1 - 3.6).abs() < 1e-9);

    let metadata = dataset::write_metadata(&clip_dir, "mp3", true)
        .unwrap()
        .unwrap();
    assert_eq!(metadata.rows, 1);
    assert_eq!(
        fs::read_to_string(clip_dir.join("metadata.csv")).unwrap(),
        "file_name,sentence\nRJ0001_a_1.mp3,こんにちは、世界、元気ですか？\n"
    );
    assert!(!clip_dir.join("RJ0001_a_1.txt").exists());
}

#[test]
fn split_without_timestamps_is_a_no_op() {
    let tmp = tempfile::tempdir().unwrap();
    let audio = tmp.path().join("RJ1.mp3");
    fs::write(&audio, b"audio").unwrap();
    let cutter = RecordingCutter {
        cuts: RefCell::new(Vec::new()),
    };

    let outcome = split_file(&audio, None, None, &Config::default(), &cutter).unwrap();

    assert!(matches!(outcome, SplitOutcome::InputMissing { .. }));
    assert!(cutter.cuts.borrow().is_empty());
    assert!(!tmp.path().join("RJ1").exists());
}

#[test]
fn report_wraps_result_with_metadata() {
    let tmp = tempfile::tempdir().unwrap();
    let textgrid = write_document(tmp.path(), "a");
    let outcome =
        align_document(&AlignJob::new(&textgrid), &Config::default(), WritePolicy::Overwrite)
            .unwrap();
    let path: PathBuf = tmp.path().join("report.json");

    write_report(&path, "align", &outcome).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["command"], "align");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["generated_at"].is_string());
    assert_eq!(json["result"]["status"], "aligned");
    assert_eq!(json["result"]["aligned"], 2);
}
