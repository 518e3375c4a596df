//! CLI Smoke Tests
//!
//! Drive the built `scriptrun` binary through both commands, including
//! failures (bad size, malformed input, missing font files).

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn scriptrun(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_scriptrun"))
        .args(args)
        .output()
        .expect("Failed to execute scriptrun")
}

fn scriptrun_stdin(args: &[&str], input: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_scriptrun"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn scriptrun");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input)
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for scriptrun")
}

#[test]
fn test_help() {
    let output = scriptrun(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("runs"));
    assert!(stdout.contains("shape"));
}

#[test]
fn test_runs_sample() {
    let output = scriptrun(&["runs", "Hello, Java; 世界;! 🌍"]);
    assert!(output.status.success(), "runs should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Font size: 16.000"));
    assert!(stdout.contains("Runs: 3"));
    assert!(stdout.contains("Run 0: \"Hello, Java; \" | script: Latin"));
    assert!(stdout.contains("Run 1: \"世界;! \" | script: Han"));
    assert!(stdout.contains("Run 2: \"🌍\" | script: Common"));
}

#[test]
fn test_shape_with_last_resort_font() {
    let output = scriptrun(&["shape", "--size", "10", "ab"]);
    assert!(output.status.success(), "shape should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("font: last-resort | size: 10.000"));
    assert!(stdout.contains("  glyph 0: id=66 advance=6.000,0.000 clusters=0..1"));
    assert!(stdout.contains("  glyph 1: id=67 advance=6.000,0.000 clusters=1..2"));
}

#[test]
fn test_json_format() {
    let output = scriptrun(&["runs", "--format", "json", "abc"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with('{'));
    assert!(stdout.contains("\"script\":\"Latin\""));
}

#[test]
fn test_reads_stdin() {
    let output = scriptrun_stdin(&["runs"], "שלום\n".as_bytes());
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Text: \"שלום\""));
    assert!(stdout.contains("direction: RTL"));
}

#[test]
fn test_malformed_stdin_fails() {
    let output = scriptrun_stdin(&["runs"], b"ab\xC3\x28");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "no partial report");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Malformed UTF-8"));
}

#[test]
fn test_invalid_size_fails() {
    let output = scriptrun(&["shape", "--size", "0", "abc"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid font size"));
}

#[test]
fn test_missing_font_file_fails() {
    let output = scriptrun(&["shape", "--font", "sans=/nonexistent/Sans.ttf", "abc"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sans"));
}

#[test]
fn test_bad_font_argument_fails() {
    let output = scriptrun(&["runs", "--font", "no-equals-sign", "abc"]);
    assert!(!output.status.success());
}

#[test]
fn test_split_lines_groups_runs() {
    let output = scriptrun(&["runs", "--split-lines", "ab\ncd"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Lines: 2"));
    assert!(stdout.contains("Line 1:\nRun 1: \"cd\""));
}

#[test]
fn test_unnamed_scripts_get_their_own_runs() {
    let output = scriptrun(&["runs", "ሰላምⵜⴰ"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Runs: 2"));
    assert!(stdout.contains("script: Ethiopic"));
    assert!(stdout.contains("script: Tifinagh"));
}
