// Tests for the grapher binary's dump mode

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn source_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("grapher-cli-{}-{}.grp", name, std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_grapher"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_dump_prints_tokens_and_diagnostics() {
    let path = source_file("ok", "a $ b");
    let out = run(&["--dump", "--max-tokens", "3", path.to_str().unwrap()]);
    fs::remove_file(&path).unwrap();

    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "<id, a>\n<id, b>\n");
    assert!(String::from_utf8_lossy(&out.stderr).contains("unexpected character '$'"));
}

#[test]
fn test_dump_limit_counts_end_of_input() {
    let path = source_file("limit", "a $ b");
    let out = run(&["--dump", "--max-tokens", "2", path.to_str().unwrap()]);
    fs::remove_file(&path).unwrap();

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Token limit exceeded: more than 2 tokens"));
    assert!(stderr.contains("unexpected character '$'"));
    assert!(out.stdout.is_empty());
}

#[test]
fn test_dump_error_tokens_fail() {
    let path = source_file("bad", "0x");
    let out = run(&["--dump", path.to_str().unwrap()]);
    fs::remove_file(&path).unwrap();

    assert_eq!(out.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "<error, bad character>\n");
}

#[test]
fn test_missing_file_fails() {
    let out = run(&["--dump", "/definitely/not/here.grp"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("not found"));
}
