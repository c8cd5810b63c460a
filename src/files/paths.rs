//! Paths derived from an input file.
//!
//! Every output sits next to its input and shares its stem:
//!
//! ```text
//! RJ01_a.TextGrid   -> RJ01_a.txt          (transcript)
//!                   -> RJ01_a.lines.txt    (per-line alignment)
//!                   -> RJ01_a.aligned.txt  (merged blocks)
//! RJ01_a.aligned.txt -> RJ01_a.ok.txt      (checked)
//! RJ01_a.mp3        -> RJ01_a.ok.txt       (timestamps to cut with)
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use super::FileError;
use crate::config::FilesConfig;

/// Extension of annotation files picked up from directories.
pub const TEXTGRID_EXTENSION: &str = "TextGrid";

/// `<dir>/<stem><suffix>`, where the stem drops only the last extension.
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}{}", stem, suffix))
}

pub fn transcript_path(textgrid: &Path, files: &FilesConfig) -> PathBuf {
    textgrid.with_extension(&files.transcript_extension)
}

pub fn lines_path(textgrid: &Path, files: &FilesConfig) -> PathBuf {
    with_suffix(textgrid, &files.lines_suffix)
}

pub fn aligned_path(textgrid: &Path, files: &FilesConfig) -> PathBuf {
    with_suffix(textgrid, &files.aligned_suffix)
}

/// Output of checking `input`: a trailing aligned suffix is replaced by the
/// checked suffix, otherwise the last extension is.
///
/// Only merged files are check inputs. Per-line files roll into hours and
/// do not match the validator's `mm:ss.cc` times.
pub fn checked_path(input: &Path, files: &FilesConfig) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.strip_suffix(files.aligned_suffix.as_str()) {
        Some(base) if !base.is_empty() => {
            input.with_file_name(format!("{}{}", base, files.checked_suffix))
        }
        _ => with_suffix(input, &files.checked_suffix),
    }
}

/// Checked timestamps used to cut `audio`.
pub fn timestamps_path(audio: &Path, files: &FilesConfig) -> PathBuf {
    with_suffix(audio, &files.checked_suffix)
}

fn is_textgrid(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|e| e.to_string_lossy().eq_ignore_ascii_case(TEXTGRID_EXTENSION))
}

/// Expand directories to the TextGrid files they contain (sorted by name).
/// Other paths are passed through unchanged.
pub fn expand_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>, FileError> {
    let mut expanded = Vec::new();
    for path in paths {
        if !path.is_dir() {
            expanded.push(path.clone());
            continue;
        }
        let entries = fs::read_dir(path).map_err(|source| FileError::ListDir {
            path: path.clone(),
            source,
        })?;
        let mut found: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| is_textgrid(p))
            .collect();
        found.sort();
        tracing::debug!(dir = %path.display(), count = found.len(), "Expanded directory");
        expanded.extend(found);
    }
    Ok(expanded)
}
