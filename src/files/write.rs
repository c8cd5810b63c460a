//! Output writing under an overwrite policy.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::FileError;

/// What to do when an output file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    Overwrite,
    #[default]
    KeepExisting,
}

impl WritePolicy {
    pub fn from_force(force: bool) -> Self {
        if force {
            WritePolicy::Overwrite
        } else {
            WritePolicy::KeepExisting
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WriteOutcome {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Write a file through a temp file in the same directory and a rename.
pub fn atomic_write(path: &Path, content: &str) -> Result<(), FileError> {
    let temp_path = path.with_file_name(format!(
        ".{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    ));

    fs::write(&temp_path, content).map_err(|source| FileError::Write {
        path: temp_path.clone(),
        source,
    })?;

    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(FileError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

/// Write a group of related outputs together.
///
/// Under [`WritePolicy::KeepExisting`], if any target exists none of them is
/// written and all are reported as skipped.
pub fn write_group(
    policy: WritePolicy,
    outputs: &[(&Path, &str)],
) -> Result<WriteOutcome, FileError> {
    let mut outcome = WriteOutcome::default();

    if policy == WritePolicy::KeepExisting {
        if let Some((existing, _)) = outputs.iter().find(|(path, _)| path.exists()) {
            tracing::warn!(
                path = %existing.display(),
                "Output exists, skipping (use --force to overwrite)"
            );
            outcome.skipped = outputs.iter().map(|(p, _)| p.to_path_buf()).collect();
            return Ok(outcome);
        }
    }

    for (path, content) in outputs {
        atomic_write(path, content)?;
        tracing::info!(path = %path.display(), "Wrote");
        outcome.written.push(path.to_path_buf());
    }
    Ok(outcome)
}
