//! Input discovery and output files
//!
//! - `paths` - paths derived from an input's stem
//! - `write` - overwrite policy and atomic writes

mod paths;
mod write;

pub use paths::{
    aligned_path, checked_path, expand_inputs, lines_path, timestamps_path, transcript_path,
    with_suffix, TEXTGRID_EXTENSION,
};
pub use write::{atomic_write, write_group, WriteOutcome, WritePolicy};

use std::path::PathBuf;

/// Filesystem failures, each carrying the path involved.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list directory {path}: {source}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a UTF-8 text file, dropping a leading byte order mark.
pub fn read_text(path: &std::path::Path) -> Result<String, FileError> {
    let content = std::fs::read_to_string(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match content.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => content,
    })
}
