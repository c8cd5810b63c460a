//! Advisory diagnostics collected during a run.
//!
//! Nothing in here aborts processing. Every stage records what looked wrong
//! as a [`Finding`] attached to the unit it concerns (a transcript line, a
//! merged block, a source line of a checked file, or an audio clip), emits
//! it through `tracing`, and carries on.

use std::fmt;

use serde::Serialize;

/// Pipeline stage a finding was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Align,
    Merge,
    Validate,
    Split,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Align => "align",
            Stage::Merge => "merge",
            Stage::Validate => "validate",
            Stage::Split => "split",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// Which end of a matched line disagreed with its boundary segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Start,
    End,
}

/// What a finding is about.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FindingKind {
    /// Peak similarity stayed below the confidence threshold.
    LowConfidenceMatch { confidence: f64, threshold: f64 },
    /// The first or last matched word is not a prefix/suffix of the line.
    BoundaryMismatch {
        edge: Edge,
        segment_text: String,
        line_text: String,
    },
    /// Too little silence between this unit and the previous one.
    SuspiciousGap { gap: f64, threshold: f64 },
    /// The unit lasts longer than any single line plausibly should.
    SuspiciousSpan { span: f64, threshold: f64 },
    /// No similarity peak was found for the line.
    Unmatched { line_text: String },
    /// A line of a checked file does not follow the tab-delimited grammar.
    MalformedLine { content: String },
    /// A line of a checked file has start > end or exceeds the maximum span.
    InvalidTimeRange { start: f64, end: f64, max_span: f64 },
    /// The external cutting tool failed for one clip.
    ExternalToolFailure { message: String },
}

impl FindingKind {
    pub fn severity(&self) -> Severity {
        match self {
            FindingKind::SuspiciousSpan { .. }
            | FindingKind::Unmatched { .. }
            | FindingKind::ExternalToolFailure { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingKind::LowConfidenceMatch {
                confidence,
                threshold,
            } => write!(f, "low confidence {:.2} (< {:.2})", confidence, threshold),
            FindingKind::BoundaryMismatch {
                edge,
                segment_text,
                line_text,
            } => {
                let edge = match edge {
                    Edge::Start => "start",
                    Edge::End => "end",
                };
                write!(f, "{} text mismatch: {} vs {}", edge, segment_text, line_text)
            }
            FindingKind::SuspiciousGap { gap, .. } => {
                write!(f, "too close to previous: {:.2} seconds", gap)
            }
            FindingKind::SuspiciousSpan { span, .. } => {
                write!(f, "too long: {:.2} seconds", span)
            }
            FindingKind::Unmatched { line_text } => write!(f, "no match found for {}", line_text),
            FindingKind::MalformedLine { content } => write!(f, "format error: {}", content),
            FindingKind::InvalidTimeRange {
                start,
                end,
                max_span,
            } => write!(
                f,
                "time range error: {:.2} -> {:.2} (max span {:.2}s)",
                start, end, max_span
            ),
            FindingKind::ExternalToolFailure { message } => write!(f, "cut failed: {}", message),
        }
    }
}

/// One diagnostic attached to a numbered unit of a stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub stage: Stage,
    /// 1-based line, block or clip number the finding refers to.
    pub unit: usize,
    pub severity: Severity,
    #[serde(flatten)]
    pub kind: FindingKind,
}

impl Finding {
    pub fn new(stage: Stage, unit: usize, kind: FindingKind) -> Self {
        Self {
            stage,
            unit,
            severity: kind.severity(),
            kind,
        }
    }

    /// Emit the finding through `tracing` at its severity.
    pub fn emit(&self) {
        match self.severity {
            Severity::Warning => tracing::warn!(
                stage = %self.stage,
                unit = self.unit,
                "{}",
                self.kind
            ),
            Severity::Error => tracing::error!(
                stage = %self.stage,
                unit = self.unit,
                "{}",
                self.kind
            ),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] #{} {}", self.stage, self.unit, self.kind)
    }
}

/// Collects findings for one run and emits each as it is recorded.
#[derive(Debug, Default, Clone)]
pub struct Findings {
    items: Vec<Finding>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, stage: Stage, unit: usize, kind: FindingKind) {
        let finding = Finding::new(stage, unit, kind);
        finding.emit();
        self.items.push(finding);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.items.iter()
    }

    /// Findings attached to one unit of one stage.
    pub fn for_unit(&self, stage: Stage, unit: usize) -> Vec<&Finding> {
        self.items
            .iter()
            .filter(|f| f.stage == stage && f.unit == unit)
            .collect()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.items.iter().filter(|f| f.severity == severity).count()
    }

    pub fn extend(&mut self, other: Findings) {
        self.items.extend(other.items);
    }

    pub fn into_vec(self) -> Vec<Finding> {
        self.items
    }
}
