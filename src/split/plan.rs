//! Clip planning: which file each timestamp entry becomes.

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::align::LineSegment;
use crate::diagnostics::{FindingKind, Findings, Stage};
use crate::validate::parse_entry;

/// One clip to cut.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipPlan {
    pub number: usize,
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub audio: PathBuf,
    pub sidecar: PathBuf,
}

/// Read entries from a checked timestamp file.
///
/// Lines missing a leading number take their 1-based position. Lines that
/// cannot be read are reported and skipped.
pub fn read_entries(content: &str, findings: &mut Findings) -> Vec<LineSegment> {
    let mut entries = Vec::new();
    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let Some((start, end, text)) = parse_entry(line) else {
            findings.record(
                Stage::Split,
                index + 1,
                FindingKind::MalformedLine {
                    content: line.to_string(),
                },
            );
            continue;
        };
        let line_number = line
            .split_once('\t')
            .and_then(|(n, _)| n.parse().ok())
            .unwrap_or(index + 1);
        entries.push(LineSegment {
            line_number,
            start_time: start,
            end_time: end,
            confidence: 1.0,
            text: text.trim().to_string(),
        });
    }
    entries
}

/// Directory the clips of `audio` go to: `<audio dir>/<group>`, where
/// `group` is the part of the stem matched by `group_pattern`, or the whole
/// stem when nothing matches.
pub fn output_dir(audio: &Path, group_pattern: &Regex) -> PathBuf {
    let stem = audio
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let group = group_pattern
        .find(&stem)
        .map(|m| m.as_str().to_string())
        .filter(|g| !g.is_empty())
        .unwrap_or(stem);
    audio.parent().unwrap_or_else(|| Path::new("")).join(group)
}

/// Plan one clip per entry, ordered by start time.
///
/// Clip files are named `<stem>_<n>.<ext>` with a `<stem>_<n>.txt` sidecar.
pub fn plan_clips(audio: &Path, entries: &[LineSegment], out_dir: &Path) -> Vec<ClipPlan> {
    let stem = audio
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = audio.extension().map(|e| e.to_string_lossy().into_owned());

    let mut sorted: Vec<&LineSegment> = entries.iter().collect();
    sorted.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

    sorted
        .into_iter()
        .map(|entry| {
            let base = format!("{}_{}", stem, entry.line_number);
            let audio_name = match &extension {
                Some(ext) => format!("{}.{}", base, ext),
                None => base.clone(),
            };
            ClipPlan {
                number: entry.line_number,
                start: entry.start_time,
                end: entry.end_time,
                text: entry.text.clone(),
                audio: out_dir.join(audio_name),
                sidecar: out_dir.join(format!("{}.txt", base)),
            }
        })
        .collect()
}
