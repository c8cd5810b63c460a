//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

use crate::align::{DEFAULT_MIN_SIMILARITY, DEFAULT_SENTINEL};
use crate::textgrid::TierSelector;
use crate::validate::Numbering;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub alignment: AlignmentConfig,
    #[serde(default)]
    pub merge: MergeConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub split: SplitConfig,
    #[serde(default)]
    pub files: FilesConfig,
}

/// Line alignment thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentConfig {
    /// Tier holding word intervals, by zero-based index or by name
    #[serde(default)]
    pub word_tier: TierSelector,
    /// Peak similarity below which a match is reported as low confidence
    #[serde(default = "default_low_confidence")]
    pub low_confidence: f64,
    /// Minimum silence in seconds expected between consecutive lines
    #[serde(default = "default_min_line_gap")]
    pub min_line_gap: f64,
    /// Longest plausible single line in seconds
    #[serde(default = "default_max_line_span")]
    pub max_line_span: f64,
    /// Ratio below which the matcher discards accumulated words
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f64,
    /// Text of the end-of-sequence segment
    #[serde(default = "default_sentinel")]
    pub sentinel: String,
}

pub fn default_low_confidence() -> f64 {
    0.6
}

pub fn default_min_line_gap() -> f64 {
    0.5
}

pub fn default_max_line_span() -> f64 {
    10.0
}

pub fn default_min_similarity() -> f64 {
    DEFAULT_MIN_SIMILARITY
}

pub fn default_sentinel() -> String {
    DEFAULT_SENTINEL.to_string()
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            word_tier: TierSelector::default(),
            low_confidence: default_low_confidence(),
            min_line_gap: default_min_line_gap(),
            max_line_span: default_max_line_span(),
            min_similarity: default_min_similarity(),
            sentinel: default_sentinel(),
        }
    }
}

/// Block merging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Longest merged block in seconds
    #[serde(default = "default_merge_max_span")]
    pub max_span: f64,
    /// Minimum silence in seconds expected between blocks
    #[serde(default = "default_merge_min_gap")]
    pub min_gap: f64,
    /// Inserted between joined lines that end in a script character
    #[serde(default = "default_connector")]
    pub connector: String,
}

pub fn default_merge_max_span() -> f64 {
    28.0
}

pub fn default_merge_min_gap() -> f64 {
    0.5
}

pub fn default_connector() -> String {
    "、".to_string()
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            max_span: default_merge_max_span(),
            min_gap: default_merge_min_gap(),
            connector: default_connector(),
        }
    }
}

/// Format checking of aligned files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Longest accepted entry in seconds
    #[serde(default = "default_validation_max_span")]
    pub max_span: f64,
    /// How surviving lines are numbered
    #[serde(default)]
    pub numbering: Numbering,
}

pub fn default_validation_max_span() -> f64 {
    29.6
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_span: default_validation_max_span(),
            numbering: Numbering::default(),
        }
    }
}

/// Audio cutting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// ffmpeg executable name or path
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: String,
    /// Value passed to `-loglevel`
    #[serde(default = "default_loglevel")]
    pub loglevel: String,
    /// Prefix of the audio stem naming the output directory
    #[serde(default = "default_group_pattern")]
    pub group_pattern: String,
}

pub fn default_ffmpeg() -> String {
    "ffmpeg".to_string()
}

pub fn default_loglevel() -> String {
    "warning".to_string()
}

pub fn default_group_pattern() -> String {
    r"^RJ\d+".to_string()
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            ffmpeg: default_ffmpeg(),
            loglevel: default_loglevel(),
            group_pattern: default_group_pattern(),
        }
    }
}

/// Derived file names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Extension of the transcript next to each TextGrid
    #[serde(default = "default_transcript_extension")]
    pub transcript_extension: String,
    /// Suffix of the per-line output
    #[serde(default = "default_lines_suffix")]
    pub lines_suffix: String,
    /// Suffix of the merged output
    #[serde(default = "default_aligned_suffix")]
    pub aligned_suffix: String,
    /// Suffix of the checked output
    #[serde(default = "default_checked_suffix")]
    pub checked_suffix: String,
}

pub fn default_transcript_extension() -> String {
    "txt".to_string()
}

pub fn default_lines_suffix() -> String {
    ".lines.txt".to_string()
}

pub fn default_aligned_suffix() -> String {
    ".aligned.txt".to_string()
}

pub fn default_checked_suffix() -> String {
    ".ok.txt".to_string()
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            transcript_extension: default_transcript_extension(),
            lines_suffix: default_lines_suffix(),
            aligned_suffix: default_aligned_suffix(),
            checked_suffix: default_checked_suffix(),
        }
    }
}

/// A config value outside its accepted range.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a finite number greater than 0 (got {value})")]
    NotPositive { key: &'static str, value: f64 },

    #[error("{key} must be between 0 and 1 (got {value})")]
    OutOfUnitRange { key: &'static str, value: f64 },

    #[error("{key} must not be empty")]
    Empty { key: &'static str },

    #[error("{key} must not contain letters, digits or script characters (got {value:?})")]
    AlignableSentinel { key: &'static str, value: String },

    #[error("{key} is not a valid regular expression: {source}")]
    InvalidPattern {
        key: &'static str,
        #[source]
        source: regex::Error,
    },
}

fn positive(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { key, value })
    }
}

fn unit(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { key, value })
    }
}

fn non_empty(key: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::Empty { key })
    } else {
        Ok(())
    }
}

/// True when any character of `sentinel` can appear in a normalized line.
/// Full-width alphanumerics fold to ASCII, so ASCII letters and digits count.
fn sentinel_can_match(sentinel: &str) -> bool {
    crate::align::normalize_text(sentinel)
        .chars()
        .any(|c| c.is_ascii_alphanumeric() || crate::align::is_kept_char(c))
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns the first invalid value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.alignment;
        unit("alignment.low_confidence", a.low_confidence)?;
        unit("alignment.min_similarity", a.min_similarity)?;
        positive("alignment.min_line_gap", a.min_line_gap)?;
        positive("alignment.max_line_span", a.max_line_span)?;
        non_empty("alignment.sentinel", &a.sentinel)?;
        if sentinel_can_match(&a.sentinel) {
            return Err(ConfigError::AlignableSentinel {
                key: "alignment.sentinel",
                value: a.sentinel.clone(),
            });
        }

        positive("merge.max_span", self.merge.max_span)?;
        positive("merge.min_gap", self.merge.min_gap)?;
        positive("validation.max_span", self.validation.max_span)?;

        non_empty("split.ffmpeg", &self.split.ffmpeg)?;
        regex::Regex::new(&self.split.group_pattern).map_err(|source| {
            ConfigError::InvalidPattern {
                key: "split.group_pattern",
                source,
            }
        })?;

        let f = &self.files;
        non_empty("files.transcript_extension", &f.transcript_extension)?;
        non_empty("files.lines_suffix", &f.lines_suffix)?;
        non_empty("files.aligned_suffix", &f.aligned_suffix)?;
        non_empty("files.checked_suffix", &f.checked_suffix)?;
        Ok(())
    }
}
