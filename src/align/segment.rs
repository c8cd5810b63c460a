//! Timed text units shared by every stage.
//!
//! [`TextSegment`] is a word interval taken from the annotation, and also a
//! merged block produced by the merger. [`LineSegment`] is one timed
//! transcript line, produced by the aligner and by the format validator.

use crate::textgrid::{TextGrid, TextGridError, TierSelector};

/// Text appended after the last word so the final line's growth ends.
pub const DEFAULT_SENTINEL: &str = "++";

#[derive(Debug, Clone, PartialEq)]
pub struct TextSegment {
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
}

impl TextSegment {
    pub fn new(start_time: f64, end_time: f64, text: impl Into<String>) -> Self {
        Self {
            start_time,
            end_time,
            text: text.into(),
        }
    }

    pub fn span(&self) -> f64 {
        self.end_time - self.start_time
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    /// 1-based line number.
    pub line_number: usize,
    pub start_time: f64,
    pub end_time: f64,
    /// Peak similarity of the match, 1.0 for validated lines.
    pub confidence: f64,
    pub text: String,
}

impl LineSegment {
    pub fn span(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// Collect the non-blank intervals of the word tier, in order, followed by
/// a zero-length sentinel segment carrying `sentinel`.
///
/// The sentinel must never occur in a normalized line. It guarantees that
/// growing past the last real word lowers the similarity.
pub fn extract_segments(
    grid: &TextGrid,
    tier: &TierSelector,
    sentinel: &str,
) -> Result<Vec<TextSegment>, TextGridError> {
    let tier = grid.tier(tier)?;
    let mut segments: Vec<TextSegment> = tier
        .labelled()
        .map(|i| TextSegment::new(i.start, i.end, i.text.clone()))
        .collect();
    tracing::debug!(
        tier = %tier.name,
        words = segments.len(),
        "Extracted word segments"
    );
    segments.push(TextSegment::new(0.0, 0.0, sentinel));
    Ok(segments)
}
