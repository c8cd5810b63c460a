//! CLI behavior tests
//!
//! Runs the tgalign binary against temporary files. Every invocation passes
//! `--config` pointing at a missing file so the user's config is never read.

use std::fs;

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::helpers::{no_config, tgalign, write_document};

#[test]
fn help_lists_the_workflow_commands() {
    tgalign()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("align"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("split"))
        .stdout(predicate::str::contains("metadata"))
        .stdout(predicate::str::contains("completions").not());
}

#[test]
fn align_directory_writes_outputs_and_keeps_them() {
    let tmp = tempfile::tempdir().unwrap();
    write_document(tmp.path(), "a");
    write_document(tmp.path(), "b");
    let config = no_config(tmp.path());

    tgalign()
        .arg("--config")
        .arg(&config)
        .arg("align")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2/2 lines aligned, 1 blocks").count(2));

    assert!(tmp.path().join("a.lines.txt").exists());
    assert!(tmp.path().join("b.aligned.txt").exists());

    tgalign()
        .arg("--config")
        .arg(&config)
        .args(["align", "--jobs", "1"])
        .arg(tmp.path().join("a.TextGrid"))
        .assert()
        .success()
        .stdout(predicate::str::contains("outputs exist, kept"));
}

#[test]
fn align_report_is_json() {
    let tmp = tempfile::tempdir().unwrap();
    let textgrid = write_document(tmp.path(), "a");
    let report = tmp.path().join("report.json");

    tgalign()
        .arg("--config")
        .arg(no_config(tmp.path()))
        .arg("align")
        .arg(&textgrid)
        .arg("--report")
        .arg(&report)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["command"], "align");
    assert_eq!(json["result"][0]["outcome"]["status"], "aligned");
}

#[test]
fn unreadable_textgrid_fails_the_run() {
    let tmp = tempfile::tempdir().unwrap();
    let textgrid = tmp.path().join("broken.TextGrid");
    fs::write(&textgrid, "File type = \"ooTextFile\"\n").unwrap();
    fs::write(tmp.path().join("broken.txt"), "あ\n").unwrap();

    tgalign()
        .arg("--config")
        .arg(no_config(tmp.path()))
        .arg("align")
        .arg(&textgrid)
        .assert()
        .failure()
        .stdout(predicate::str::contains("failed"))
        .stderr(predicate::str::contains("1 of 1 documents failed"));

    assert!(!tmp.path().join("broken.lines.txt").exists());
}

#[test]
fn invalid_config_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let textgrid = write_document(tmp.path(), "a");
    let config = tmp.path().join("config.toml");
    fs::write(&config, "[alignment]\nlow_confidence = 2.0\n").unwrap();

    tgalign()
        .arg("--config")
        .arg(&config)
        .arg("align")
        .arg(&textgrid)
        .assert()
        .failure()
        .stderr(predicate::str::contains("alignment.low_confidence"));
}

#[test]
fn check_writes_ok_file() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("a.aligned.txt");
    fs::write(&input, "1\t00:01.00\t00:02.00\tあ\nnot a line\n").unwrap();

    tgalign()
        .arg("--config")
        .arg(no_config(tmp.path()))
        .arg("check")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("1/2 lines kept"));

    assert_eq!(
        fs::read_to_string(tmp.path().join("a.ok.txt")).unwrap(),
        "1\t00:01.00\t00:02.00\tあ\n"
    );
}

#[test]
fn tiers_lists_interval_counts() {
    let tmp = tempfile::tempdir().unwrap();
    let textgrid = write_document(tmp.path(), "a");

    tgalign()
        .arg("tiers")
        .arg(&textgrid)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "0\twords\t8 intervals (5 labelled)",
        ))
        .stdout(predicate::str::contains("1\tphones\t1 intervals (0 labelled)"));
}

#[test]
fn split_without_timestamps_does_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let audio = tmp.path().join("RJ1_a.mp3");
    fs::write(&audio, b"audio").unwrap();

    tgalign()
        .arg("--config")
        .arg(no_config(tmp.path()))
        .arg("split")
        .arg(&audio)
        .assert()
        .success()
        .stdout(predicate::str::contains("not found"));

    assert!(!tmp.path().join("RJ1").exists());
}

#[test]
fn metadata_collects_sidecars() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("c_1.wav"), b"x").unwrap();
    fs::write(tmp.path().join("c_1.txt"), "あ").unwrap();

    tgalign()
        .arg("metadata")
        .arg(tmp.path())
        .args(["--extension", "wav", "--remove-sidecars"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 rows"));

    assert_eq!(
        fs::read_to_string(tmp.path().join("metadata.csv")).unwrap(),
        "file_name,sentence\nc_1.wav,あ\n"
    );
    assert!(!tmp.path().join("c_1.txt").exists());
}

#[test]
fn config_show_prints_documented_defaults() {
    let tmp = tempfile::tempdir().unwrap();

    tgalign()
        .arg("--config")
        .arg(no_config(tmp.path()))
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[alignment]"))
        .stdout(predicate::str::contains("low_confidence = 0.6"))
        .stdout(predicate::str::contains("[split]"));
}

#[test]
fn config_path_reports_missing_file() {
    let tmp = tempfile::tempdir().unwrap();

    tgalign()
        .arg("--config")
        .arg(no_config(tmp.path()))
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found, using defaults"));
}

#[test]
fn completions_are_generated() {
    tgalign()
        .args(["completions", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tgalign"));
}
