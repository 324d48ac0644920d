// mdscrub/tests/cli_integration_tests.rs
//! Command-line integration tests for the `mdscrub` binary.
//!
//! Each test builds a small documentation tree in a temporary directory,
//! runs the binary against it with `assert_cmd`, and checks both the console
//! output and the resulting files. Output is passed through
//! `strip_ansi_escapes` before comparison.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use strip_ansi_escapes::strip as strip_ansi_escapes_fn;
use tempfile::tempdir;

const SAMPLE_WITH_PII: &str = r#"---
title: "Test Document"
author: "John Doe"
email: "john@company.com"
tags:
  - test
---

# Test Document

Contact john@company.com for questions.
Call 555-123-4567 for support.
"#;

const SAMPLE_CLEAN: &str = "---\ntitle: \"Clean Document\"\n---\n\n# Clean\n\nNo PII here.\n";

fn mdscrub() -> Command {
    let mut cmd = Command::cargo_bin("mdscrub").unwrap();
    cmd.env_remove("MDSCRUB_CONTACT").env_remove("MDSCRUB_RULES").env_remove("RUST_LOG");
    cmd
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(strip_ansi_escapes_fn(&assert.get_output().stdout)).unwrap()
}

#[test]
fn test_output_directory_mirrors_tree() -> Result<()> {
    let input = tempdir()?;
    let output = tempdir()?;
    write(input.path(), "file1.md", SAMPLE_WITH_PII);
    write(input.path(), "file2.md", SAMPLE_CLEAN);
    write(input.path(), "subdir/file3.md", "Email: test@example.com\n");

    let assert = mdscrub().arg(input.path()).arg(output.path()).assert().success();
    assert!(stdout_of(&assert).contains("Successfully processed 3 files"));

    let file1 = fs::read_to_string(output.path().join("file1.md"))?;
    assert!(!file1.contains("John Doe"));
    assert!(!file1.contains("john@company.com"));
    assert!(!file1.contains("555-123-4567"));
    assert!(file1.contains("title: Test Document"));
    assert!(file1.contains("contact@example.com"));
    assert!(file1.contains("[REDACTED]"));

    assert_eq!(fs::read_to_string(output.path().join("file2.md"))?, SAMPLE_CLEAN);
    assert_eq!(
        fs::read_to_string(output.path().join("subdir/file3.md"))?,
        "Email: contact@example.com\n"
    );
    assert_eq!(fs::read_to_string(input.path().join("file1.md"))?, SAMPLE_WITH_PII);
    Ok(())
}

#[test]
fn test_in_place_creates_exact_backup() -> Result<()> {
    let input = tempdir()?;
    write(input.path(), "test.md", SAMPLE_WITH_PII);

    mdscrub().arg(input.path()).arg("--in-place").assert().success();

    assert_eq!(fs::read(input.path().join("test.md.bak"))?, SAMPLE_WITH_PII.as_bytes());
    let content = fs::read_to_string(input.path().join("test.md"))?;
    assert!(!content.contains("John Doe"));
    assert!(content.contains("[REDACTED]"));
    Ok(())
}

#[test]
fn test_dry_run_writes_nothing() -> Result<()> {
    let input = tempdir()?;
    write(input.path(), "test.md", SAMPLE_WITH_PII);
    let output = input.path().join("output");

    let assert = mdscrub().arg(input.path()).arg(&output).arg("--dry-run").assert().success();
    let stdout = stdout_of(&assert);
    assert!(stdout.contains("Would process:"));
    assert!(stdout.contains("test.md"));
    assert!(stdout.contains("author x1 (field removed)"));
    assert!(stdout.contains("phone x1 (redacted)"));

    assert!(!output.exists());
    assert_eq!(fs::read_to_string(input.path().join("test.md"))?, SAMPLE_WITH_PII);
    assert_eq!(fs::read_dir(input.path())?.count(), 1);

    mdscrub().arg(input.path()).args(["-i", "--dry-run"]).assert().success();
    assert!(!input.path().join("test.md.bak").exists());
    assert_eq!(fs::read_to_string(input.path().join("test.md"))?, SAMPLE_WITH_PII);
    Ok(())
}

#[test]
fn test_dry_run_diff_shows_changes() -> Result<()> {
    let input = tempdir()?;
    write(input.path(), "test.md", "Mail jane@corp.io today\n");

    let assert = mdscrub()
        .arg(input.path())
        .arg(input.path().join("out"))
        .args(["--dry-run", "--diff"])
        .assert()
        .success();
    let stdout = stdout_of(&assert);
    assert!(stdout.contains("-Mail jane@corp.io today"));
    assert!(stdout.contains("+Mail contact@example.com today"));
    Ok(())
}

#[test]
fn test_custom_pattern() -> Result<()> {
    let input = tempdir()?;
    let output = tempdir()?;
    write(input.path(), "test.mdx", SAMPLE_WITH_PII);
    write(input.path(), "test.md", SAMPLE_WITH_PII);

    mdscrub()
        .arg(input.path())
        .arg(output.path())
        .args(["--pattern", "*.mdx"])
        .assert()
        .success();

    assert!(output.path().join("test.mdx").exists());
    assert!(!output.path().join("test.md").exists());
    Ok(())
}

#[test]
fn test_no_recursive() -> Result<()> {
    let input = tempdir()?;
    let output = tempdir()?;
    write(input.path(), "top.md", SAMPLE_CLEAN);
    write(input.path(), "nested/deep.md", SAMPLE_CLEAN);

    mdscrub().arg(input.path()).arg(output.path()).arg("--no-recursive").assert().success();

    assert!(output.path().join("top.md").exists());
    assert!(!output.path().join("nested").exists());
    Ok(())
}

#[test]
fn test_custom_contact_flag_and_env() -> Result<()> {
    let input = tempdir()?;
    let output = tempdir()?;
    write(input.path(), "test.md", "Reach john@company.com\n");

    mdscrub()
        .arg(input.path())
        .arg(output.path())
        .args(["--contact", "support@mycompany.com"])
        .assert()
        .success();
    assert_eq!(fs::read_to_string(output.path().join("test.md"))?, "Reach support@mycompany.com\n");

    mdscrub()
        .arg(input.path())
        .arg(output.path())
        .env("MDSCRUB_CONTACT", "press@mycompany.com")
        .assert()
        .success();
    assert_eq!(fs::read_to_string(output.path().join("test.md"))?, "Reach press@mycompany.com\n");
    Ok(())
}

#[test]
fn test_custom_rules_file() -> Result<()> {
    let input = tempdir()?;
    let output = tempdir()?;
    let rules = input.path().join("rules.yaml");
    fs::write(
        &rules,
        "pii_patterns:\n  ticket: '\\bTCK-\\d+\\b'\nfrontmatter_remove:\n  - reviewer\n",
    )?;
    write(input.path(), "test.md", "---\nreviewer: Bob\ntitle: T\n---\nSee TCK-42, mail a@b.com\n");

    mdscrub().arg(input.path()).arg(output.path()).arg("--rules").arg(&rules).assert().success();

    assert_eq!(
        fs::read_to_string(output.path().join("test.md"))?,
        "---\ntitle: T\n---\nSee [REDACTED], mail a@b.com\n"
    );
    Ok(())
}

#[test]
fn test_invalid_rules_file_fails_before_processing() -> Result<()> {
    let input = tempdir()?;
    let output = input.path().join("out");
    let rules = input.path().join("rules.yaml");
    fs::write(&rules, "pii_patterns:\n  broken: '[unterminated'\n")?;
    write(input.path(), "test.md", SAMPLE_WITH_PII);

    mdscrub()
        .arg(input.path())
        .arg(&output)
        .arg("--rules")
        .arg(&rules)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("pii_patterns.broken"));
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_nonexistent_directory_exits_one() {
    let dir = tempdir().unwrap();
    mdscrub()
        .arg(dir.path().join("nonexistent"))
        .arg(dir.path().join("output"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_no_matching_files_exits_zero() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write(input.path(), "notes.txt", "text");

    mdscrub()
        .arg(input.path())
        .arg(output.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("No files matching '*.md'"));
}

#[test]
fn test_parse_error_fails_one_file_and_continues() -> Result<()> {
    let input = tempdir()?;
    let output = tempdir()?;
    write(input.path(), "a_broken.md", "---\nkey: [unclosed\n---\nbody\n");
    write(input.path(), "b_good.md", SAMPLE_WITH_PII);

    let assert = mdscrub().arg(input.path()).arg(output.path()).assert().failure().code(1);
    let stderr = String::from_utf8(strip_ansi_escapes_fn(&assert.get_output().stderr))?;
    assert!(stderr.contains("a_broken.md"));
    assert!(stdout_of(&assert).contains("Successfully processed 1 files"));

    assert!(output.path().join("b_good.md").exists());
    assert!(!output.path().join("a_broken.md").exists());
    Ok(())
}

#[test]
fn test_json_report() -> Result<()> {
    let input = tempdir()?;
    write(input.path(), "test.md", SAMPLE_WITH_PII);

    let assert = mdscrub()
        .arg(input.path())
        .arg(input.path().join("out"))
        .args(["--dry-run", "--json"])
        .assert()
        .success();
    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(report["succeeded"], 1);
    assert_eq!(report["changed"], 1);
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["files"][0]["status"], "changed");
    let summary = report["files"][0]["summary"].as_array().unwrap();
    assert!(summary.iter().any(|i| i["rule_name"] == "author" && i["kind"] == "field_removed"));
    Ok(())
}

#[test]
fn test_in_place_conflicts_with_output_dir() {
    let dir = tempdir().unwrap();
    mdscrub().arg(dir.path()).arg(dir.path().join("out")).arg("-i").assert().failure();
    mdscrub().arg(dir.path()).assert().failure();
}

#[test]
fn test_output_inside_input_is_not_reprocessed() -> Result<()> {
    let input = tempdir()?;
    write(input.path(), "a.md", SAMPLE_WITH_PII);
    let output = input.path().join("output");

    mdscrub().arg(input.path()).arg(&output).assert().success();
    let assert = mdscrub().arg(input.path()).arg(&output).assert().success();

    assert!(stdout_of(&assert).contains("Successfully processed 1 files"));
    assert!(!output.join("output").exists());
    Ok(())
}

#[test]
fn test_emptied_frontmatter_survives_a_second_run() -> Result<()> {
    let input = tempdir()?;
    write(input.path(), "rules.md", "---\nauthor: Jane\n---\n---\nSection one\n---\nText\n");

    mdscrub().arg(input.path()).arg("-i").assert().success();
    let first = fs::read_to_string(input.path().join("rules.md"))?;
    assert_eq!(first, "---\n---\n---\nSection one\n---\nText\n");

    mdscrub().arg(input.path()).arg("-i").assert().success();
    assert_eq!(fs::read_to_string(input.path().join("rules.md"))?, first);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_in_place_keeps_file_mode() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let input = tempdir()?;
    write(input.path(), "private.md", SAMPLE_WITH_PII);
    let path = input.path().join("private.md");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;

    mdscrub().arg(input.path()).arg("--in-place").assert().success();

    let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode(&path), 0o600);
    assert_eq!(mode(&input.path().join("private.md.bak")), 0o600);
    Ok(())
}

#[test]
fn test_contact_without_at_sign_warns() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write(input.path(), "a.md", "Mail a@b.com\n");

    mdscrub()
        .arg(input.path())
        .arg(output.path())
        .args(["--contact", "helpdesk"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning: Contact 'helpdesk' does not look like an email address"));
}
