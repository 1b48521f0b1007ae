//! Tests for error handling and CLI flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("envweave") || out.contains("Usage"));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_missing_config_hint() {
    let t = Test::new();
    t.write_snapshot("{}");

    let output = t.render();
    assert_failure(&output);
    assert_stderr_contains(&output, "config file not found");
    assert_stderr_contains(&output, "--config");
}

#[test]
fn test_config_flag() {
    let t = Test::new();
    std::fs::write(t.path("other.toml"), "[exec.env]\ncustom = [\"FROM_OTHER=1\"]\n").unwrap();
    t.write_snapshot("{}");

    let output = t
        .cmd()
        .args(["--config", "other.toml", "render", "--snapshot", "snapshot.json"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "FROM_OTHER=1");
}

#[test]
fn test_malformed_snapshot() {
    let t = Test::with_files("", "{not json");

    t.cmd()
        .args(["render", "--snapshot", "snapshot.json"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to parse snapshot"));
}

#[test]
fn test_unknown_placeholder_hint() {
    let t = Test::with_files(
        "[[secret]]\npath = \"kv/foo\"\nformat = \"{{ bogus }}\"\n",
        "{}",
    );

    t.cmd()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown placeholder").and(predicate::str::contains("bogus")))
        .stderr(predicate::str::contains("templates accept"));
}

#[test]
fn test_invalid_glob_hint() {
    let t = Test::with_files("[exec.env]\nwhitelist = [\"A*B*\"]\n", "{}");

    t.cmd()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid glob 'A*B*'"))
        .stderr(predicate::str::contains("PREFIX*"));
}

#[test]
fn test_missing_snapshot_file() {
    let t = Test::new();
    t.write_config("");

    let output = t.render();
    assert_failure(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "envweave");
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "envweave");
}
