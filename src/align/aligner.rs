//! Line aligner: one pass of transcript lines over the word segments.

use super::matcher::{Cursor, GrowingMatcher};
use super::script::{normalize_line, normalize_text};
use super::segment::{LineSegment, TextSegment};
use crate::config::AlignmentConfig;
use crate::diagnostics::{Edge, FindingKind, Findings, Stage};

/// Result of aligning a whole transcript.
#[derive(Debug, Default)]
pub struct Alignment {
    pub lines: Vec<LineSegment>,
    pub findings: Findings,
    /// Lines with nothing left after normalization.
    pub skipped: usize,
    /// Lines for which no similarity peak was found.
    pub unmatched: usize,
}

/// Owns the cursor for one alignment pass over a segment sequence.
///
/// Sessions borrow the segments immutably, so independent documents can be
/// aligned concurrently with one session each.
pub struct AlignmentSession<'a> {
    segments: &'a [TextSegment],
    config: &'a AlignmentConfig,
    matcher: GrowingMatcher,
    cursor: Cursor,
    previous_end: Option<f64>,
    result: Alignment,
}

impl<'a> AlignmentSession<'a> {
    pub fn new(segments: &'a [TextSegment], config: &'a AlignmentConfig) -> Self {
        Self {
            segments,
            config,
            matcher: GrowingMatcher::new(config.min_similarity),
            cursor: Cursor::new(),
            previous_end: None,
            result: Alignment::default(),
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Align one transcript line, keeping the result and any findings
    /// against it in the session.
    ///
    /// Returns `None` when the line normalizes to nothing or has no match.
    pub fn align_line(&mut self, line_number: usize, raw_line: &str) -> Option<LineSegment> {
        let text = raw_line.trim();
        let normalized = normalize_line(text);
        if normalized.is_empty() {
            tracing::debug!(line = line_number, "Skipping line with no alignable text");
            self.result.skipped += 1;
            return None;
        }

        let Some(found) = self
            .matcher
            .find(&normalized, self.segments, &mut self.cursor)
        else {
            self.result.unmatched += 1;
            self.result.findings.record(
                Stage::Align,
                line_number,
                FindingKind::Unmatched {
                    line_text: text.to_string(),
                },
            );
            return None;
        };

        let segments = self.segments;
        let first = &segments[found.start];
        let last = &segments[found.end];
        let line = LineSegment {
            line_number,
            start_time: first.start_time,
            end_time: last.end_time,
            confidence: found.confidence,
            text: text.to_string(),
        };
        tracing::debug!(
            line = line_number,
            start = found.start,
            end = found.end,
            confidence = found.confidence,
            "Matched line"
        );

        self.check(&line, &normalized, first, last);
        self.previous_end = Some(line.end_time);
        self.result.lines.push(line.clone());
        Some(line)
    }

    fn check(&mut self, line: &LineSegment, normalized: &str, first: &TextSegment, last: &TextSegment) {
        let unit = line.line_number;
        let config = self.config;
        let findings = &mut self.result.findings;

        if line.confidence < config.low_confidence {
            findings.record(
                Stage::Align,
                unit,
                FindingKind::LowConfidenceMatch {
                    confidence: line.confidence,
                    threshold: config.low_confidence,
                },
            );
        }

        if let Some(previous_end) = self.previous_end {
            let gap = line.start_time - previous_end;
            if gap < config.min_line_gap {
                findings.record(
                    Stage::Align,
                    unit,
                    FindingKind::SuspiciousGap {
                        gap,
                        threshold: config.min_line_gap,
                    },
                );
            }
        }

        if line.span() > config.max_line_span {
            findings.record(
                Stage::Align,
                unit,
                FindingKind::SuspiciousSpan {
                    span: line.span(),
                    threshold: config.max_line_span,
                },
            );
        }

        let head = normalize_text(&first.text);
        if !normalized.starts_with(&head) {
            findings.record(
                Stage::Align,
                unit,
                FindingKind::BoundaryMismatch {
                    edge: Edge::Start,
                    segment_text: first.text.clone(),
                    line_text: normalized.to_string(),
                },
            );
        }
        let tail = normalize_text(&last.text);
        if !normalized.ends_with(&tail) {
            findings.record(
                Stage::Align,
                unit,
                FindingKind::BoundaryMismatch {
                    edge: Edge::End,
                    segment_text: last.text.clone(),
                    line_text: normalized.to_string(),
                },
            );
        }
    }

    /// Align every non-blank line, numbering them from 1.
    pub fn align_lines<'l, I>(mut self, lines: I) -> Alignment
    where
        I: IntoIterator<Item = &'l str>,
    {
        let numbered = lines
            .into_iter()
            .filter(|l| !l.trim().is_empty())
            .enumerate();
        for (i, line) in numbered {
            self.align_line(i + 1, line);
        }
        self.finish()
    }

    /// Consume the session and return everything aligned so far.
    pub fn finish(self) -> Alignment {
        tracing::info!(
            aligned = self.result.lines.len(),
            skipped = self.result.skipped,
            unmatched = self.result.unmatched,
            findings = self.result.findings.len(),
            "Alignment pass finished"
        );
        self.result
    }
}
