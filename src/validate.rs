//! Strict format check of aligned files before cutting.
//!
//! Every non-blank line must read
//!
//! ```text
//! [number \t] mm:ss.cc \t mm:ss.cc \t text
//! ```
//!
//! with a minutes field of two or more digits and seconds below 60. Lines
//! that do not, or whose range is inverted or too long, are dropped with a
//! finding. The rest are re-emitted with a leading number.

use std::fmt::Write as _;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::align::LineSegment;
use crate::config::ValidationConfig;
use crate::diagnostics::{FindingKind, Findings, Stage};
use crate::timestamp::{format_clock, parse_clock};

/// How the lines that survive validation are numbered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Numbering {
    /// 1-based position of the line in the checked file; drops leave gaps
    #[default]
    Source,
    /// 1..n over the surviving lines
    Contiguous,
}

fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:(\d+)\t)?(\d{2,}:\d{2}\.\d{2})\t(\d{2,}:\d{2}\.\d{2})\t(.+)$")
            .expect("line pattern is valid")
    })
}

/// Lines that passed the check plus findings for the ones that did not.
#[derive(Debug, Default)]
pub struct Validation {
    pub lines: Vec<LineSegment>,
    pub findings: Findings,
    /// Non-blank lines examined.
    pub checked: usize,
}

impl Validation {
    pub fn dropped(&self) -> usize {
        self.checked - self.lines.len()
    }

    /// Render as `n \t mm:ss.cc \t mm:ss.cc \t text` lines.
    pub fn render(&self) -> String {
        render_numbered(&self.lines)
    }
}

/// Render line segments in the numbered tab-separated format.
pub fn render_numbered(lines: &[LineSegment]) -> String {
    let mut out = String::new();
    for line in lines {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}",
            line.line_number,
            format_clock(line.start_time),
            format_clock(line.end_time),
            line.text
        );
    }
    out
}

/// Parse one line of the strict format into `(start, end, text)`.
///
/// Returns `None` when the line does not match or a time field is out of range.
pub fn parse_entry(line: &str) -> Option<(f64, f64, &str)> {
    let caps = line_pattern().captures(line)?;
    let start = parse_clock(caps.get(2)?.as_str())?;
    let end = parse_clock(caps.get(3)?.as_str())?;
    Some((start, end, caps.get(4)?.as_str()))
}

/// Check the content of an aligned file.
pub fn validate_text(content: &str, config: &ValidationConfig) -> Validation {
    let mut result = Validation::default();

    for (index, raw) in content.lines().enumerate() {
        let source_line = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        result.checked += 1;

        let Some((start, end, text)) = parse_entry(line) else {
            result.findings.record(
                Stage::Validate,
                source_line,
                FindingKind::MalformedLine {
                    content: line.to_string(),
                },
            );
            continue;
        };

        if start > end || end - start > config.max_span {
            result.findings.record(
                Stage::Validate,
                source_line,
                FindingKind::InvalidTimeRange {
                    start,
                    end,
                    max_span: config.max_span,
                },
            );
            continue;
        }

        let line_number = match config.numbering {
            Numbering::Source => source_line,
            Numbering::Contiguous => result.lines.len() + 1,
        };
        result.lines.push(LineSegment {
            line_number,
            start_time: start,
            end_time: end,
            confidence: 1.0,
            text: text.to_string(),
        });
    }

    tracing::info!(
        checked = result.checked,
        kept = result.lines.len(),
        dropped = result.dropped(),
        "Format check done"
    );
    result
}
