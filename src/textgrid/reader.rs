//! TextGrid parser for the long ("ooTextFile") text format.
//!
//! The format is not self-delimiting: the header declares a tier count, each
//! tier declares an interval count, and every value sits at a fixed line
//! offset from the start of its record. A wrong count shifts every following
//! read, so each access is bounds-checked and reports the 1-based line it
//! expected the value on.
//!
//! # Format
//!
//! ```text
//! File type = "ooTextFile"        <- line 1
//! Object class = "TextGrid"
//!
//! xmin = 0.0                      <- line 4
//! xmax = 3.0
//! tiers? <exists>
//! size = 1                        <- tier count
//! item []:
//!     item [1]:                   <- tier record (6 lines)
//!         class = "IntervalTier"
//!         name = "words"
//!         xmin = 0.0
//!         xmax = 3.0
//!         intervals: size = 1     <- interval count
//!         intervals [1]:          <- interval record (4 lines)
//!             xmin = 0.0
//!             xmax = 3.0
//!             text = "あ"
//! ```

use std::fs;
use std::path::Path;

use super::types::{Interval, IntervalTier, TextGrid, TextGridError};

const HEADER_XMIN: usize = 3;
const HEADER_XMAX: usize = 4;
const HEADER_SIZE: usize = 6;
const FIRST_TIER: usize = 8;
const TIER_RECORD_LINES: usize = 6;
const INTERVAL_RECORD_LINES: usize = 4;

/// Offset-addressed view over the lines of a TextGrid file.
struct Lines<'a> {
    lines: Vec<&'a str>,
}

impl<'a> Lines<'a> {
    fn new(content: &'a str) -> Self {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        Self {
            lines: content.lines().collect(),
        }
    }

    fn raw(&self, index: usize, key: &'static str) -> Result<&'a str, TextGridError> {
        self.lines
            .get(index)
            .copied()
            .ok_or(TextGridError::UnexpectedEof {
                line: index + 1,
                key,
            })
    }

    /// The trimmed text after the first `=` on the given line.
    fn value(&self, index: usize, key: &'static str) -> Result<&'a str, TextGridError> {
        let line = self.raw(index, key)?;
        line.split_once('=')
            .map(|(_, value)| value.trim())
            .ok_or_else(|| TextGridError::MissingValue {
                line: index + 1,
                key,
                content: line.trim().to_string(),
            })
    }

    fn number(&self, index: usize, key: &'static str) -> Result<f64, TextGridError> {
        let value = self.value(index, key)?;
        value
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| TextGridError::InvalidNumber {
                line: index + 1,
                key,
                value: value.to_string(),
            })
    }

    fn count(&self, index: usize, key: &'static str) -> Result<usize, TextGridError> {
        let value = self.value(index, key)?;
        value
            .parse::<usize>()
            .map_err(|_| TextGridError::InvalidNumber {
                line: index + 1,
                key,
                value: value.to_string(),
            })
    }

    /// How many records of `record_lines` lines fit between `from` and the
    /// end of the file. Caps preallocation by what the file can hold.
    fn fitting(&self, from: usize, record_lines: usize) -> usize {
        self.lines.len().saturating_sub(from) / record_lines
    }

    fn quoted(&self, index: usize, key: &'static str) -> Result<String, TextGridError> {
        Ok(unquote(self.value(index, key)?))
    }
}

/// Strip the surrounding quotes of a string value and undo Praat's `""` escaping.
fn unquote(value: &str) -> String {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    inner.replace("\"\"", "\"")
}

impl TextGrid {
    /// Parse a TextGrid from a filesystem path.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self, TextGridError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| TextGridError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&content)
    }

    /// Parse a TextGrid from its text content.
    ///
    /// # Errors
    ///
    /// Returns an error if a declared count points past the end of the file,
    /// a `key = value` line has no `=`, a number does not parse, or a tier is
    /// not an `IntervalTier`.
    pub fn parse_str(content: &str) -> Result<Self, TextGridError> {
        let lines = Lines::new(content);

        let start = lines.number(HEADER_XMIN, "xmin")?;
        let end = lines.number(HEADER_XMAX, "xmax")?;
        let tier_count = lines.count(HEADER_SIZE, "size")?;

        let mut tiers =
            Vec::with_capacity(tier_count.min(lines.fitting(FIRST_TIER, TIER_RECORD_LINES)));
        let mut i = FIRST_TIER;
        for _ in 0..tier_count {
            let class = lines.quoted(i + 1, "class")?;
            if class != "IntervalTier" {
                return Err(TextGridError::UnsupportedTier {
                    line: i + 2,
                    class,
                });
            }
            let name = lines.quoted(i + 2, "name")?;
            let tier_start = lines.number(i + 3, "xmin")?;
            let tier_end = lines.number(i + 4, "xmax")?;
            let interval_count = lines.count(i + 5, "intervals: size")?;
            i += TIER_RECORD_LINES;

            let mut intervals =
                Vec::with_capacity(interval_count.min(lines.fitting(i, INTERVAL_RECORD_LINES)));
            for _ in 0..interval_count {
                let xmin = lines.number(i + 1, "xmin")?;
                let xmax = lines.number(i + 2, "xmax")?;
                let text = lines.quoted(i + 3, "text")?;
                intervals.push(Interval::new(xmin, xmax, text));
                i += INTERVAL_RECORD_LINES;
            }

            tiers.push(IntervalTier::new(name, tier_start, tier_end, intervals));
        }

        Ok(TextGrid { start, end, tiers })
    }
}
