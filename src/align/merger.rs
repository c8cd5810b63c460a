//! Line merger: folds aligned lines into playback-sized blocks.
//!
//! # Algorithm
//!
//! ```text
//! block = first line
//! for each next line:
//!     if line.end - block.start > max_span:
//!         close block, open a new one at line
//!     else:
//!         block.end = line.end
//!         block.text += connector? + line.text
//! ```
//!
//! The connector is only inserted after a script character or full-width
//! alphanumeric, so a line already ending in punctuation is joined as is.
//! A single line longer than `max_span` becomes a block of its own.

use super::script::is_kept_char;
use super::segment::{LineSegment, TextSegment};
use crate::config::MergeConfig;
use crate::diagnostics::{FindingKind, Findings, Stage};

/// Merged blocks in time order plus the gap findings raised on them.
#[derive(Debug, Default)]
pub struct Merge {
    pub blocks: Vec<TextSegment>,
    pub findings: Findings,
}

#[derive(Debug, Clone)]
pub struct LineMerger<'a> {
    config: &'a MergeConfig,
}

impl<'a> LineMerger<'a> {
    pub fn new(config: &'a MergeConfig) -> Self {
        Self { config }
    }

    pub fn merge(&self, lines: &[LineSegment]) -> Merge {
        let mut blocks: Vec<TextSegment> = Vec::new();
        let mut current: Option<TextSegment> = None;

        for line in lines {
            match current.as_mut() {
                Some(block) if line.end_time - block.start_time <= self.config.max_span => {
                    block.end_time = line.end_time;
                    self.join(&mut block.text, &line.text);
                }
                _ => {
                    blocks.extend(current.take());
                    current = Some(TextSegment::new(
                        line.start_time,
                        line.end_time,
                        line.text.clone(),
                    ));
                }
            }
        }
        blocks.extend(current);

        let mut findings = Findings::new();
        for (i, pair) in blocks.windows(2).enumerate() {
            let gap = pair[1].start_time - pair[0].end_time;
            if gap < self.config.min_gap {
                findings.record(
                    Stage::Merge,
                    i + 2,
                    FindingKind::SuspiciousGap {
                        gap,
                        threshold: self.config.min_gap,
                    },
                );
            }
        }

        tracing::info!(
            lines = lines.len(),
            blocks = blocks.len(),
            "Merged lines into blocks"
        );
        Merge { blocks, findings }
    }

    fn join(&self, text: &mut String, next: &str) {
        if text.chars().last().is_some_and(is_kept_char) {
            text.push_str(&self.config.connector);
        }
        text.push_str(next);
    }
}
