//! Praat TextGrid annotations
//!
//! Forced aligners describe where each word of a transcript falls in the
//! audio as a TextGrid. This module reads and writes the long text variant
//! of that format.
//!
//! # Structure
//!
//! - `types` - `TextGrid`, `IntervalTier`, `Interval`, tier selection
//! - `reader` - offset-driven parser
//! - `writer` - serializer producing the layout the reader expects

mod reader;
mod types;
mod writer;

pub use types::{Interval, IntervalTier, TextGrid, TextGridError, TierSelector};
