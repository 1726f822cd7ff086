//! CLI end-to-end tests
//!
//! Tests for the vidmeta command-line interface. Scans use a stand-in
//! ffprobe script so they don't depend on ffmpeg being installed.

mod common;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the vidmeta binary
#[allow(deprecated)]
fn vidmeta_cmd() -> Command {
    Command::cargo_bin("vidmeta").unwrap()
}

#[test]
fn test_cli_no_args_shows_usage() {
    let mut cmd = vidmeta_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = vidmeta_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("vidmeta"))
        .stdout(predicate::str::contains("--merge"))
        .stdout(predicate::str::contains("--nomedia"));
}

#[test]
fn test_cli_version_flag() {
    let mut cmd = vidmeta_cmd();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vidmeta"));
}

#[test]
fn test_cli_merge_conflicts_with_update() {
    let mut cmd = vidmeta_cmd();
    cmd.args(["--merge", "--update", "a.tsv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_cli_update_not_implemented() {
    let dir = tempdir().unwrap();
    let mut cmd = vidmeta_cmd();
    cmd.current_dir(dir.path())
        .args(["--update", "."])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not implemented"));
    assert!(!dir.path().join("vidmeta.tsv").exists());
}

#[test]
fn test_cli_missing_ffprobe_is_error() {
    let dir = tempdir().unwrap();
    let mut cmd = vidmeta_cmd();
    cmd.current_dir(dir.path())
        .args(["--ffprobe", "/nonexistent/ffprobe-12345", "."])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ffprobe"));
}

#[test]
fn test_cli_zero_workers_is_error() {
    let dir = tempdir().unwrap();
    let mut cmd = vidmeta_cmd();
    cmd.current_dir(dir.path())
        .args(["--workers", "0", "."])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Worker count"));
}

#[test]
fn test_cli_bad_config_file_is_error() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[scan]\nworkers = \"many\"\n").unwrap();

    let mut cmd = vidmeta_cmd();
    cmd.arg("--config")
        .arg(&config)
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_cli_merge_missing_input() {
    let dir = tempdir().unwrap();
    let mut cmd = vidmeta_cmd();
    cmd.current_dir(dir.path())
        .args(["--merge", "missing.tsv"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[cfg(unix)]
#[test]
fn test_cli_scan_then_merge() {
    let dir = tempdir().unwrap();
    let base = dir.path().canonicalize().unwrap();
    let ffprobe = common::fake_ffprobe(&base);

    let media = base.join("media");
    fs::create_dir_all(media.join("Films/Extras")).unwrap();
    fs::write(media.join("Films/[2001] Movie.mkv"), b"movie").unwrap();
    fs::write(media.join("Films/[2001] Movie.en.srt"), b"subs").unwrap();
    fs::write(media.join("Films/broken.mp4"), b"junk").unwrap();
    fs::write(media.join("Films/Extras/bonus.mkv"), b"bonus").unwrap();
    fs::write(media.join("Films/cover.jpg"), b"jpg").unwrap();

    let table = base.join("scan.tsv");
    let mut cmd = vidmeta_cmd();
    cmd.arg("--ffprobe")
        .arg(&ffprobe)
        .args(["--label", "Shelf", "--workers", "2", "--nomedia"])
        .arg("--output")
        .arg(&table)
        .arg(&media)
        .assert()
        .success()
        .stdout(predicate::str::contains("Scan Complete"));

    let content = fs::read_to_string(&table).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 3, "unexpected table:\n{content}");
    assert!(lines[0].starts_with("Width\tHeight"));
    assert!(media.join("Films/Extras/.nomedia").is_file());

    let movie = lines
        .iter()
        .find(|l| l.contains("[2001] Movie.mkv"))
        .unwrap();
    let cells: Vec<_> = movie.split('\t').collect();
    assert_eq!(cells.len(), 19);
    assert_eq!(cells[0], "3840");
    assert_eq!(cells[2], "1h:2m:3s");
    assert_eq!(cells[6], "N");
    assert_eq!(cells[11], "Fake Title");
    assert_eq!(cells[12], "Y");
    assert_eq!(cells[16], "Shelf");
    assert_eq!(cells[18], "OK");

    let broken = lines.iter().find(|l| l.contains("broken.mp4")).unwrap();
    assert!(broken.ends_with("Invalid data found when processing input"));
    assert!(broken.contains("\tFAILED: "));

    let merged = base.join("merged.tsv");
    let mut cmd = vidmeta_cmd();
    cmd.arg("--merge")
        .arg(&table)
        .arg(&table)
        .arg("-o")
        .arg(&merged)
        .assert()
        .success()
        .stdout(predicate::str::contains("Merge Complete"));

    assert_eq!(fs::read_to_string(&merged).unwrap(), content);
}
