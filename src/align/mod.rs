//! Transcript alignment and merge engine
//!
//! Takes the word intervals of a TextGrid and a line-oriented transcript and
//! derives per-line timestamps, then folds the lines into blocks short
//! enough to be cut into clips.
//!
//! # Structure
//!
//! - `segment` - `TextSegment` / `LineSegment` and word extraction
//! - `script` - Unicode script predicates and line normalization
//! - `similarity` - LCS-based similarity ratio
//! - `matcher` - growing-sequence matcher and its cursor
//! - `aligner` - one alignment pass with diagnostics
//! - `merger` - block merging under a maximum span
//!
//! # Example
//!
//! ```
//! use tgalign::align::{AlignmentSession, LineMerger, TextSegment};
//! use tgalign::config::Config;
//!
//! let config = Config::default();
//! let segments = vec![
//!     TextSegment::new(0.0, 1.0, "こんにちは"),
//!     TextSegment::new(2.0, 3.0, "さようなら"),
//!     TextSegment::new(0.0, 0.0, "++"),
//! ];
//!
//! let alignment = AlignmentSession::new(&segments, &config.alignment)
//!     .align_lines(["こんにちは。", "さようなら。"]);
//! assert_eq!(alignment.lines.len(), 2);
//!
//! let merged = LineMerger::new(&config.merge).merge(&alignment.lines);
//! assert_eq!(merged.blocks[0].text, "こんにちは。さようなら。");
//! ```

mod aligner;
mod matcher;
mod merger;
mod script;
mod segment;
mod similarity;

pub use aligner::{Alignment, AlignmentSession};
pub use matcher::{Cursor, GrowingMatcher, SegmentMatch, DEFAULT_MIN_SIMILARITY};
pub use merger::{LineMerger, Merge};
pub use script::{is_fullwidth_alnum, is_kept_char, is_script_char, normalize_line, normalize_text};
pub use segment::{extract_segments, LineSegment, TextSegment, DEFAULT_SENTINEL};
pub use similarity::{ratio, ratio_chars};
