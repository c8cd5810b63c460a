//! Growing-sequence matcher.
//!
//! Finds the run of word segments that spells a transcript line by growing a
//! concatenation one segment at a time from the cursor and watching the
//! similarity ratio against the line. The ratio climbs while words of the
//! line are being added and falls as soon as words of the next line join in;
//! the last segment before the fall is the end of the match.
//!
//! ```text
//! segments:  あ     い     う     ++
//! concat:    あ     あい   あいう
//! ratio:     0.67   1.00   0.80        line = "あい"
//!                   ^ peak, cursor -> 2
//! ```
//!
//! There is no backtracking: the cursor only moves forward, so a line the
//! matcher overshoots cannot be recovered by later lines.

use super::segment::TextSegment;
use super::similarity::ratio_chars;

/// Ratio below which the running concatenation is discarded.
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.01;

/// Position of the next unmatched segment.
///
/// Only moves forward. One cursor belongs to one alignment pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cursor(usize);

impl Cursor {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn position(&self) -> usize {
        self.0
    }

    fn advance_to(&mut self, position: usize) {
        debug_assert!(position >= self.0, "cursor moved backwards");
        self.0 = self.0.max(position);
    }
}

/// Inclusive range of matched segments and the peak ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentMatch {
    pub start: usize,
    pub end: usize,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct GrowingMatcher {
    min_similarity: f64,
}

impl Default for GrowingMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SIMILARITY)
    }
}

impl GrowingMatcher {
    pub fn new(min_similarity: f64) -> Self {
        Self { min_similarity }
    }

    /// Match a normalized line against `segments` starting at `cursor`.
    ///
    /// On success the cursor is moved to the segment after the peak. When the
    /// segments run out before the ratio peaks, returns `None` and leaves the
    /// cursor where it was.
    pub fn find(
        &self,
        line: &str,
        segments: &[TextSegment],
        cursor: &mut Cursor,
    ) -> Option<SegmentMatch> {
        let target: Vec<char> = line.chars().collect();
        let mut start = cursor.position();
        let mut combined: Vec<char> = Vec::new();
        let mut previous: Option<f64> = None;

        for end in start..segments.len() {
            combined.extend(segments[end].text.chars());
            let score = ratio_chars(&combined, &target);
            tracing::trace!(start, end, score, "growing");

            if score < self.min_similarity {
                combined.clear();
                previous = None;
                start = end + 1;
                continue;
            }

            match previous {
                Some(peak) if score <= peak => {
                    cursor.advance_to(end);
                    return Some(SegmentMatch {
                        start,
                        end: end - 1,
                        confidence: peak,
                    });
                }
                _ => previous = Some(score),
            }
        }

        None
    }
}
