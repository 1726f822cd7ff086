//! Integration tests for the scan pipeline, using a mock prober.

mod common;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use common::{data_lines, options, touch, MockProber};
use vidmeta::scan::run_scan;
use vidmeta::table::row::{col, COLUMNS, STATUS_OK};
use vidmeta::table::{read_table, Row};

fn scan_root() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    (dir, root)
}

#[test]
fn test_mixed_tree_counts_and_rows() {
    let (_dir, root) = scan_root();
    // 10 files, 3 of them videos, one of which fails to probe
    touch(&root, "Films/[1979] Alien.mkv");
    touch(&root, "Films/[1979] Alien.en.srt");
    touch(&root, "Films/poster.jpg");
    touch(&root, "Films/readme.txt");
    touch(&root, "Shows/S01E01.mp4");
    touch(&root, "Shows/S01E01.nfo");
    touch(&root, "Shows/broken.avi");
    touch(&root, "Shows/thumb.png");
    touch(&root, "notes.md");
    touch(&root, "list.csv");
    let output = root.join("out.tsv");

    let result = run_scan(
        options(vec![root.clone()], output.clone(), 4),
        Arc::new(MockProber::new()),
    )
    .unwrap();

    assert_eq!(result.summary.discovered, 3);
    assert_eq!(result.summary.succeeded, 2);
    assert_eq!(result.summary.failed, 1);
    assert!(result.summary.is_consistent());
    assert_eq!(result.failures.len(), 1);
    assert!(result.failures[0].path.ends_with("Shows/broken.avi"));

    let rows = read_table(&output).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows, result.rows);
    assert_eq!(rows.iter().filter(|r| r.is_failure()).count(), 1);

    let failed = rows.iter().find(|r| r.is_failure()).unwrap();
    assert!(failed.status().starts_with("FAILED: "));
    assert!(failed.status().contains("Invalid data"));

    let alien = rows
        .iter()
        .find(|r| r.drive_path().ends_with("[1979] Alien.mkv"))
        .unwrap();
    assert_eq!(alien.status(), STATUS_OK);
    assert_eq!(alien.volume_label(), "TestVolume");
    assert_eq!(alien.cell(col::WIDTH), "1920");
    assert_eq!(alien.cell(col::DURATION), "1h:30m:0s");
    assert_eq!(alien.cell(col::SUBTITLE), "Y");
    assert_eq!(alien.cell(col::SUBTITLE_HI), "N");
}

#[test]
fn test_output_is_sorted_and_deterministic() {
    let (_dir, root) = scan_root();
    for i in 0..40 {
        touch(&root, &format!("dir{}/movie-{:02}.mkv", i % 5, i));
    }
    touch(&root, "dir1/broken-01.mkv");

    let first = root.join("first.tsv");
    let second = root.join("second.tsv");
    run_scan(
        options(vec![root.clone()], first.clone(), 8),
        Arc::new(MockProber::with_jitter()),
    )
    .unwrap();
    run_scan(
        options(vec![root.clone()], second.clone(), 3),
        Arc::new(MockProber::with_jitter()),
    )
    .unwrap();

    let first_content = fs::read(&first).unwrap();
    assert_eq!(first_content, fs::read(&second).unwrap());

    let rows = read_table(&first).unwrap();
    assert_eq!(rows.len(), 41);
    let mut sorted = rows.clone();
    sorted.sort();
    assert_eq!(rows, sorted);
}

#[test]
fn test_excluded_directory_yields_no_rows() {
    let (_dir, root) = scan_root();
    touch(&root, "Film/Extras/behind-the-scenes.mkv");
    touch(&root, "Film/Trailers/teaser.mp4");
    let output = root.join("out.tsv");

    let prober = Arc::new(MockProber::new());
    let result = run_scan(options(vec![root.clone()], output.clone(), 2), prober.clone()).unwrap();

    assert_eq!(result.summary.discovered, 0);
    assert_eq!(result.walk.excluded_dirs, 2);
    assert_eq!(prober.calls(), 0);
    assert!(data_lines(&output).is_empty());
    assert!(!root.join("Film/Extras/.nomedia").exists());
}

#[test]
fn test_markers_placed_when_requested() {
    let (_dir, root) = scan_root();
    touch(&root, "Film/Extras/bonus.mkv");
    touch(&root, "Film/feature.mkv");

    let opts = options(vec![root.clone()], root.join("out.tsv"), 2).with_markers(true);
    let result = run_scan(opts, Arc::new(MockProber::new())).unwrap();

    assert_eq!(result.summary.discovered, 1);
    assert_eq!(result.walk.markers_placed, 1);
    assert!(root.join("Film/Extras/.nomedia").is_file());
}

#[test]
fn test_panicking_prober_becomes_failure_row() {
    let (_dir, root) = scan_root();
    touch(&root, "ok.mkv");
    touch(&root, "panic.mkv");
    let output = root.join("out.tsv");

    let result = run_scan(
        options(vec![root.clone()], output.clone(), 2),
        Arc::new(MockProber::new()),
    )
    .unwrap();

    assert_eq!(result.summary.succeeded, 1);
    assert_eq!(result.summary.failed, 1);
    let lines = data_lines(&output);
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().any(|l| l.contains("FAILED: mock panicked")));
}

#[test]
fn test_overlapping_roots_count_each_file_once() {
    let (_dir, root) = scan_root();
    touch(&root, "a/one.mkv");
    touch(&root, "a/b/two.mkv");
    let output = root.join("out.tsv");

    let result = run_scan(
        options(
            vec![root.join("a"), root.join("a/b"), root.join("a")],
            output.clone(),
            2,
        ),
        Arc::new(MockProber::new()),
    )
    .unwrap();

    assert_eq!(result.summary.discovered, 2);
    assert_eq!(data_lines(&output).len(), 2);
}

#[test]
fn test_missing_root_is_error_and_writes_nothing() {
    let (_dir, root) = scan_root();
    let output = root.join("out.tsv");

    let err = run_scan(
        options(vec![root.join("missing")], output.clone(), 2),
        Arc::new(MockProber::new()),
    )
    .unwrap_err();

    assert!(matches!(err, vidmeta::Error::Config(_)));
    assert!(!output.exists());
}

#[test]
fn test_empty_tree_writes_header_only() {
    let (_dir, root) = scan_root();
    fs::create_dir_all(root.join("empty")).unwrap();
    let output = root.join("out.tsv");

    let result = run_scan(
        options(vec![root.join("empty")], output.clone(), 2).with_progress(false),
        Arc::new(MockProber::new()),
    )
    .unwrap();

    assert_eq!(result.summary.discovered, 0);
    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert_eq!(content.lines().next().unwrap(), Row::header_line());
    assert_eq!(
        content.lines().next().unwrap().split('\t').count(),
        COLUMNS.len()
    );
}

#[test]
fn test_progress_enabled_run_completes() {
    let (_dir, root) = scan_root();
    for i in 0..10 {
        touch(&root, &format!("m{i}.mkv"));
    }

    let opts = options(vec![root.clone()], root.join("out.tsv"), 2).with_progress(true);
    let result = run_scan(opts, Arc::new(MockProber::with_jitter())).unwrap();

    assert_eq!(result.summary.discovered, 10);
    assert!(result.summary.is_consistent());
}

#[test]
fn test_nested_root_below_excluded_dir_is_scanned() {
    let (_dir, root) = scan_root();
    touch(&root, "Film/feature.mkv");
    touch(&root, "Film/Extras/bonus.mkv");
    let output = root.join("out.tsv");

    let prober = Arc::new(MockProber::new());
    let result = run_scan(
        options(
            vec![root.clone(), root.join("Film/Extras")],
            output.clone(),
            2,
        ),
        prober.clone(),
    )
    .unwrap();

    assert_eq!(result.summary.discovered, 2);
    assert_eq!(prober.calls(), 2);
    let lines = data_lines(&output);
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().any(|l| l.contains("bonus.mkv")));
    assert!(lines.iter().any(|l| l.contains("feature.mkv")));
}

#[cfg(unix)]
#[test]
fn test_hung_ffprobe_times_out_without_stalling_the_pool() {
    use std::time::{Duration, Instant};
    use vidmeta_av::FfprobeProber;

    let (_dir, root) = scan_root();
    let ffprobe = common::fake_ffprobe(&root);
    let media = root.join("media");
    touch(&media, "hang.mkv");
    for i in 0..4 {
        touch(&media, &format!("film-{i}.mkv"));
    }
    let output = root.join("out.tsv");

    let prober = FfprobeProber::new(&ffprobe, Duration::from_millis(500)).unwrap();
    let started = Instant::now();
    let result = run_scan(options(vec![media], output.clone(), 2), Arc::new(prober)).unwrap();

    assert!(started.elapsed() < Duration::from_secs(20));
    assert_eq!(result.summary.discovered, 5);
    assert_eq!(result.summary.succeeded, 4);
    assert_eq!(result.summary.failed, 1);
    assert!(result.failures[0].path.ends_with("hang.mkv"));
    assert!(result.failures[0].reason.contains("timed out"));

    let rows = read_table(&output).unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows.iter().filter(|r| r.status() == STATUS_OK).count(), 4);
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_yields_nothing_and_walk_continues() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, root) = scan_root();
    touch(&root, "open/visible.mkv");
    touch(&root, "locked/hidden.mkv");
    let locked = root.join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // permission bits don't bind a privileged user
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let output = root.join("out.tsv");
    let result = run_scan(
        options(vec![root.clone()], output.clone(), 2),
        Arc::new(MockProber::new()),
    );
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    let result = result.unwrap();

    assert_eq!(result.summary.discovered, 1);
    assert_eq!(result.summary.walk_errors, 1);
    assert_eq!(result.walk.errors, 1);
    let lines = data_lines(&output);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("visible.mkv"));
}

#[test]
fn test_progress_reaches_100_only_once_table_is_written() {
    use std::sync::Mutex;
    use vidmeta::scan::ProgressListener;

    let (_dir, root) = scan_root();
    for i in 0..30 {
        touch(&root, &format!("media/m{i:02}.mkv"));
    }
    let output = root.join("out.tsv");

    let seen = Arc::new(Mutex::new(Vec::new()));
    let listener = {
        let seen = Arc::clone(&seen);
        let output = output.clone();
        ProgressListener::new(move |pct| seen.lock().unwrap().push((pct, output.exists())))
    };
    let opts = options(vec![root.join("media")], output.clone(), 3).with_progress_listener(listener);
    run_scan(opts, Arc::new(MockProber::with_jitter())).unwrap();

    let seen = seen.lock().unwrap().clone();
    let (last, written) = *seen.last().unwrap();
    assert_eq!(last, 100);
    assert!(written, "100% reported before the table was written");

    let percents: Vec<u8> = seen.iter().map(|(pct, _)| *pct).collect();
    assert!(percents.windows(2).all(|w| w[0] <= w[1]), "{percents:?}");
    assert_eq!(percents.iter().filter(|p| **p == 100).count(), 1);
    assert!(seen[..seen.len() - 1].iter().all(|(pct, written)| *pct < 100 && !written));
}
