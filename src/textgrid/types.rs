//! Type definitions for Praat TextGrid annotations.
//!
//! A TextGrid is a time-aligned annotation of an audio recording made of
//! named layers (tiers), each holding a chronological sequence of intervals.
//! Forced aligners emit one tier for words and usually a second for phones.
//!
//! Only interval tiers are modelled. Point tiers never appear in aligner
//! output and are rejected by the reader.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single labelled time span of a tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Label; empty or whitespace-only text marks silence.
    pub text: String,
}

impl Interval {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Whether this interval carries no label (silence between words).
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A named, ordered sequence of intervals covering `[start, end]`.
///
/// Ordering and non-overlap are guaranteed by the tool that produced the
/// annotation and are not re-validated here.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTier {
    pub name: String,
    pub start: f64,
    pub end: f64,
    pub intervals: Vec<Interval>,
}

impl IntervalTier {
    pub fn new(name: impl Into<String>, start: f64, end: f64, intervals: Vec<Interval>) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            intervals,
        }
    }

    /// Iterate over intervals that carry text.
    pub fn labelled(&self) -> impl Iterator<Item = &Interval> {
        self.intervals.iter().filter(|i| !i.is_blank())
    }
}

/// Which tier of a TextGrid to read words from.
///
/// Deserializes from either an integer (zero-based index) or a string
/// (tier name), so config files can say `word_tier = 0` or
/// `word_tier = "words"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TierSelector {
    Index(usize),
    Name(String),
}

impl Default for TierSelector {
    fn default() -> Self {
        TierSelector::Index(0)
    }
}

impl TierSelector {
    /// Parse a CLI value: all-digit strings select by index, anything else by name.
    pub fn parse(value: &str) -> Self {
        match value.parse::<usize>() {
            Ok(index) => TierSelector::Index(index),
            Err(_) => TierSelector::Name(value.to_string()),
        }
    }
}

impl fmt::Display for TierSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TierSelector::Index(index) => write!(f, "#{}", index),
            TierSelector::Name(name) => write!(f, "\"{}\"", name),
        }
    }
}

/// Errors raised while reading or querying a TextGrid.
#[derive(Debug, thiserror::Error)]
pub enum TextGridError {
    #[error("Failed to read TextGrid {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: unexpected end of file (expected `{key}`)")]
    UnexpectedEof { line: usize, key: &'static str },

    #[error("line {line}: expected `{key} = <value>`, found {content:?}")]
    MissingValue {
        line: usize,
        key: &'static str,
        content: String,
    },

    #[error("line {line}: invalid {key} value {value:?}")]
    InvalidNumber {
        line: usize,
        key: &'static str,
        value: String,
    },

    #[error("line {line}: unsupported tier class {class:?} (only IntervalTier is supported)")]
    UnsupportedTier { line: usize, class: String },

    #[error("tier {selector} not found (available: {available})")]
    TierNotFound {
        selector: TierSelector,
        available: String,
    },
}

/// A parsed TextGrid document.
#[derive(Debug, Clone, PartialEq)]
pub struct TextGrid {
    pub start: f64,
    pub end: f64,
    pub tiers: Vec<IntervalTier>,
}

impl TextGrid {
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            tiers: Vec::new(),
        }
    }

    pub fn with_tier(mut self, tier: IntervalTier) -> Self {
        self.tiers.push(tier);
        self
    }

    /// Find a tier by exact name.
    pub fn tier_by_name(&self, name: &str) -> Option<&IntervalTier> {
        self.tiers.iter().find(|t| t.name == name)
    }

    /// Resolve a tier selector against this document.
    pub fn tier(&self, selector: &TierSelector) -> Result<&IntervalTier, TextGridError> {
        let found = match selector {
            TierSelector::Index(index) => self.tiers.get(*index),
            TierSelector::Name(name) => self.tier_by_name(name),
        };

        found.ok_or_else(|| TextGridError::TierNotFound {
            selector: selector.clone(),
            available: self
                .tiers
                .iter()
                .map(|t| format!("\"{}\"", t.name))
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}
