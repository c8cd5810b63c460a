//! Output path derivation with custom file settings.

use std::path::{Path, PathBuf};

use tgalign::config::FilesConfig;
use tgalign::files::{aligned_path, checked_path, lines_path, transcript_path, with_suffix};

fn custom() -> FilesConfig {
    FilesConfig {
        transcript_extension: "lab".into(),
        lines_suffix: "_lines.tsv".into(),
        aligned_suffix: "_merged.tsv".into(),
        checked_suffix: "_ok.tsv".into(),
    }
}

#[test]
fn custom_suffixes_are_applied() {
    let tg = Path::new("/w/RJ9.part.TextGrid");
    assert_eq!(transcript_path(tg, &custom()), PathBuf::from("/w/RJ9.part.lab"));
    assert_eq!(lines_path(tg, &custom()), PathBuf::from("/w/RJ9.part_lines.tsv"));
    assert_eq!(aligned_path(tg, &custom()), PathBuf::from("/w/RJ9.part_merged.tsv"));
}

#[test]
fn checked_path_follows_custom_suffixes() {
    assert_eq!(
        checked_path(Path::new("/w/a_merged.tsv"), &custom()),
        PathBuf::from("/w/a_ok.tsv")
    );
    assert_eq!(
        checked_path(Path::new("/w/a.aligned.txt"), &custom()),
        PathBuf::from("/w/a.aligned_ok.tsv")
    );
}

#[test]
fn suffix_replaces_only_the_last_extension() {
    assert_eq!(
        with_suffix(Path::new("a.b.c"), ".x"),
        PathBuf::from("a.b.x")
    );
    assert_eq!(with_suffix(Path::new("noext"), ".x"), PathBuf::from("noext.x"));
}
