use assert_cmd::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;

const HISTORY: &str = r#"{
  "commits": [
    {"hash": "c1", "new_files": ["README.md", "src/main.rs"], "errors": 0},
    {"hash": "c2", "new_files": ["src/lib.rs", "src/tree/mod.rs"], "errors": 30},
    {"hash": "c3", "new_files": ["docs/guide.md"], "deleted_files": ["src/main.rs"], "errors": 60}
  ]
}"#;

fn write_history(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("history.json");
    fs::write(&path, HISTORY).expect("write history");
    path
}

#[test]
fn cli_writes_svg_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let history = write_history(tmp.path());
    let out = tmp.path().join("frame.svg");

    let exe = assert_cmd::cargo_bin!("gitstories");
    Command::new(exe)
        .args([
            history.to_string_lossy().as_ref(),
            "--frames-per-commit",
            "3",
            "--settle-frames",
            "10",
            "--out",
            out.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.starts_with("<svg "));
    // root, README.md, src, src/lib.rs, src/tree, src/tree/mod.rs, docs, docs/guide.md
    assert_eq!(svg.matches("<circle ").count(), 8);
    assert_eq!(svg.matches("<line ").count(), 7);
}

#[test]
fn cli_prints_json_layout_to_stdout() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let history = write_history(tmp.path());
    let config = tmp.path().join("scene.yaml");
    fs::write(&config, "width: 800\nheight: 600\n").expect("write config");

    let exe = assert_cmd::cargo_bin!("gitstories");
    let output = Command::new(exe)
        .args([
            history.to_string_lossy().as_ref(),
            "--config",
            config.to_string_lossy().as_ref(),
            "--format",
            "json",
            "--settle-frames",
            "0",
            "--log-level",
            "silent",
        ])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(doc["width"], 800);
    assert_eq!(doc["commits"], 3);
    let nodes = doc["nodes"].as_array().expect("nodes");
    assert_eq!(nodes.len(), 8);
    assert_eq!(nodes[0]["path"], "");
    assert_eq!(nodes[0]["kind"], "folder");
    assert_eq!(nodes[0]["center"], serde_json::json!([400.0, 300.0]));
}

#[test]
fn cli_fails_on_missing_history() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let exe = assert_cmd::cargo_bin!("gitstories");
    Command::new(exe)
        .arg(tmp.path().join("missing.json"))
        .assert()
        .failure()
        .code(1);
}

#[test]
fn cli_reports_fatal_errors_when_silenced() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let exe = assert_cmd::cargo_bin!("gitstories");
    let output = Command::new(exe)
        .arg(tmp.path().join("missing.json"))
        .args(["--log-level", "silent"])
        .output()
        .expect("run cli");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read"), "stderr was: {stderr}");
}

#[test]
fn cli_rejects_physics_that_cannot_settle() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let history = write_history(tmp.path());
    let config = tmp.path().join("scene.json");
    fs::write(&config, r#"{"physics": {"substeps": 0}}"#).expect("write config");

    let exe = assert_cmd::cargo_bin!("gitstories");
    let output = Command::new(exe)
        .args([
            history.to_string_lossy().as_ref(),
            "--config",
            config.to_string_lossy().as_ref(),
            "--log-level",
            "error",
        ])
        .output()
        .expect("run cli");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("substeps"), "stderr was: {stderr}");
}
