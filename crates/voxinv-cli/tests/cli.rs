use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Runs the binary with an isolated config directory.
fn voxinv(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("voxinv").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"));
    cmd
}

#[test]
fn test_analyze_english_json() {
    let home = TempDir::new().unwrap();
    voxinv(&home)
        .args([
            "analyze",
            "Create invoice for John Doe, web design services, 500 dollars",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"customer_name\": \"John Doe\""))
        .stdout(predicate::str::contains("\"language\": \"en-US\""))
        .stdout(predicate::str::contains("Web Design"));
}

#[test]
fn test_analyze_hindi_text_format() {
    let home = TempDir::new().unwrap();
    voxinv(&home)
        .args(["analyze", "राहुल के लिए वेब डिज़ाइन ५०० रुपये", "-f", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Language: hi-IN"))
        .stdout(predicate::str::contains("Customer: राहुल"));
}

#[test]
fn test_analyze_reads_file() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("note.txt");
    fs::write(&input, "consulting 250 dollars").unwrap();

    voxinv(&home)
        .args(["analyze", "-i"])
        .arg(&input)
        .args(["-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Consulting"))
        .stdout(predicate::str::contains("250"));
}

#[test]
fn test_analyze_draft_uses_customer_hint() {
    let home = TempDir::new().unwrap();
    voxinv(&home)
        .args(["analyze", "web design 500 dollars", "--draft", "--customer", "Acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"customer_name\": \"Acme\""))
        .stdout(predicate::str::contains("\"name_from_hint\": true"));
}

#[test]
fn test_analyze_empty_transcript_fails() {
    let home = TempDir::new().unwrap();
    voxinv(&home)
        .args(["analyze", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transcript is empty"));
}

#[test]
fn test_config_init_and_get() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("voxinv.json");

    voxinv(&home)
        .args(["config", "init", "-o"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    voxinv(&home)
        .args(["config", "init", "-o"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    voxinv(&home)
        .args(["config", "get", "draft.due_in_days"])
        .assert()
        .success()
        .stdout(predicate::str::contains("30"));
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let home = TempDir::new().unwrap();
    voxinv(&home)
        .args(["config", "set", "draft.nonexistent", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_config_path() {
    let home = TempDir::new().unwrap();
    voxinv(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"));
}

#[test]
fn test_batch_writes_outputs_and_summary() {
    let home = TempDir::new().unwrap();
    let input_dir = home.path().join("in");
    let output_dir = home.path().join("out");
    fs::create_dir_all(&input_dir).unwrap();
    fs::write(input_dir.join("a.txt"), "web design 500 dollars").unwrap();
    fs::write(input_dir.join("b.txt"), "invoice for Priya, consulting 300 rupees").unwrap();
    fs::write(input_dir.join("c.txt"), "").unwrap();
    fs::write(input_dir.join("ignored.md"), "seo 100 dollars").unwrap();

    let pattern = format!("{}/*", input_dir.display());
    voxinv(&home)
        .args(["batch", &pattern, "--summary", "--continue-on-error", "-o"])
        .arg(&output_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 files"))
        .stdout(predicate::str::contains("c.txt"));

    assert!(output_dir.join("a.json").exists());
    assert!(output_dir.join("b.json").exists());
    assert!(!output_dir.join("c.json").exists());

    let summary = fs::read_to_string(output_dir.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("filename,status"));
    assert!(lines[1].starts_with("a.txt,success"));
    assert!(lines[3].starts_with("c.txt,error"));
}

#[test]
fn test_batch_stops_on_error_by_default() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("empty.txt"), "").unwrap();

    let pattern = format!("{}/*.txt", home.path().display());
    voxinv(&home)
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn test_batch_continues_past_failing_file() {
    let home = TempDir::new().unwrap();
    let input_dir = home.path().join("in");
    let output_dir = home.path().join("out");
    fs::create_dir_all(&input_dir).unwrap();
    fs::write(input_dir.join("a.txt"), "seo 100 dollars").unwrap();
    fs::write(
        input_dir.join("b.txt"),
        "pay $70000000000000000000000000000 and $70000000000000000000000000000",
    )
    .unwrap();
    fs::write(input_dir.join("c.txt"), [0xff_u8, 0xfe, 0x00]).unwrap();
    fs::write(input_dir.join("d.txt"), "consulting 250 dollars").unwrap();

    let pattern = format!("{}/*.txt", input_dir.display());
    voxinv(&home)
        .args(["batch", &pattern, "--summary", "--continue-on-error", "-j", "2", "-o"])
        .arg(&output_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful, 2 failed"));

    assert!(output_dir.join("a.json").exists());
    assert!(!output_dir.join("b.json").exists());
    assert!(!output_dir.join("c.json").exists());
    assert!(output_dir.join("d.json").exists());

    let summary = fs::read_to_string(output_dir.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[1].starts_with("a.txt,success"));
    assert!(lines[2].starts_with("b.txt,error"));
    assert!(lines[2].contains("subtotal"));
    assert!(lines[3].starts_with("c.txt,error"));
    assert!(lines[4].starts_with("d.txt,success"));
}

#[test]
fn test_batch_language_code_overrides_detection() {
    let home = TempDir::new().unwrap();
    let input_dir = home.path().join("in");
    let output_dir = home.path().join("out");
    fs::create_dir_all(&input_dir).unwrap();
    fs::write(input_dir.join("note.txt"), "seo 100 dollars").unwrap();

    let pattern = format!("{}/*.txt", input_dir.display());
    voxinv(&home)
        .args(["batch", &pattern, "--lang", "hi-IN", "-o"])
        .arg(&output_dir)
        .assert()
        .success();

    let draft = fs::read_to_string(output_dir.join("note.json")).unwrap();
    assert!(draft.contains("\"language\": \"hi-IN\""));
}
