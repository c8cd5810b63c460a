//! `metadata.csv` for a directory of split clips.
//!
//! Each clip `<name>.<ext>` with a `<name>.txt` sidecar becomes one row
//! `file_name,sentence`. The file layout is what audio-folder dataset loaders
//! expect next to the clips.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::files::{self, FileError};

pub const METADATA_FILE: &str = "metadata.csv";
pub const DEFAULT_CLIP_EXTENSION: &str = "mp3";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataRow {
    pub file_name: String,
    pub sentence: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetadataReport {
    pub csv: PathBuf,
    pub rows: usize,
    /// Clips without a sidecar.
    pub skipped: Vec<PathBuf>,
    /// Sidecars deleted after being collected.
    pub removed: Vec<PathBuf>,
}

/// Quote a CSV field when it contains a separator, quote or line break.
pub fn csv_field(value: &str) -> String {
    if value.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn render_csv(rows: &[MetadataRow]) -> String {
    let mut out = String::from("file_name,sentence\n");
    for row in rows {
        out.push_str(&csv_field(&row.file_name));
        out.push(',');
        out.push_str(&csv_field(&row.sentence));
        out.push('\n');
    }
    out
}

fn list_clips(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, FileError> {
    let entries = fs::read_dir(dir).map_err(|source| FileError::ListDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut clips: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .is_some_and(|e| e.to_string_lossy().eq_ignore_ascii_case(extension))
        })
        .collect();
    clips.sort();
    Ok(clips)
}

/// Collect clips and sidecars of `dir` into `metadata.csv`.
///
/// Returns `Ok(None)` when `dir` does not exist. With `remove_sidecars`,
/// each sidecar is deleted once the CSV has been written.
pub fn write_metadata(
    dir: &Path,
    extension: &str,
    remove_sidecars: bool,
) -> Result<Option<MetadataReport>, FileError> {
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "Directory missing, nothing to do");
        return Ok(None);
    }

    let mut report = MetadataReport {
        csv: dir.join(METADATA_FILE),
        ..MetadataReport::default()
    };
    let mut rows = Vec::new();
    let mut sidecars = Vec::new();

    for clip in list_clips(dir, extension)? {
        let sidecar = clip.with_extension("txt");
        if !sidecar.is_file() {
            tracing::debug!(clip = %clip.display(), "No sidecar, skipping");
            report.skipped.push(clip);
            continue;
        }
        let sentence = files::read_text(&sidecar)?;
        rows.push(MetadataRow {
            file_name: clip
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            sentence: sentence.trim_end_matches(|c: char| c == '\r' || c == '\n').to_string(),
        });
        sidecars.push(sidecar);
    }

    files::atomic_write(&report.csv, &render_csv(&rows))?;
    report.rows = rows.len();
    tracing::info!(path = %report.csv.display(), rows = report.rows, "Wrote metadata");

    if remove_sidecars {
        for sidecar in sidecars {
            fs::remove_file(&sidecar).map_err(|source| FileError::Write {
                path: sidecar.clone(),
                source,
            })?;
            report.removed.push(sidecar);
        }
    }
    Ok(Some(report))
}
