//! Test helper utilities

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tgalign::textgrid::{Interval, IntervalTier};
use tgalign::TextGrid;

/// Transcript matching [`sample_grid`]: two lines with punctuation the
/// aligner ignores.
pub const TRANSCRIPT: &str = "こんにちは、世界\n\n元気ですか？\n";

/// Word tier for the transcript, with silences between the lines.
pub fn sample_grid() -> TextGrid {
    TextGrid::new(0.0, 4.0)
        .with_tier(IntervalTier::new(
            "words",
            0.0,
            4.0,
            vec![
                Interval::new(0.0, 0.5, ""),
                Interval::new(0.5, 1.0, "こんにちは"),
                Interval::new(1.0, 1.5, "世界"),
                Interval::new(1.5, 2.5, ""),
                Interval::new(2.5, 3.0, "元気"),
                Interval::new(3.0, 3.4, "です"),
                Interval::new(3.4, 3.6, "か"),
                Interval::new(3.6, 4.0, ""),
            ],
        ))
        .with_tier(IntervalTier::new(
            "phones",
            0.0,
            4.0,
            vec![Interval::new(0.0, 4.0, "")],
        ))
}

/// Write `<stem>.TextGrid` and `<stem>.txt` into `dir` and return the
/// TextGrid path.
pub fn write_document(dir: &Path, stem: &str) -> PathBuf {
    let textgrid = dir.join(format!("{}.TextGrid", stem));
    sample_grid().write(&textgrid).unwrap();
    fs::write(dir.join(format!("{}.txt", stem)), TRANSCRIPT).unwrap();
    textgrid
}

/// Path of a config file that does not exist, so runs use defaults
/// regardless of the user's home directory.
pub fn no_config(dir: &Path) -> PathBuf {
    dir.join("no-config.toml")
}

/// Command for the tgalign binary with logging kept quiet.
pub fn tgalign() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tgalign"));
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}
