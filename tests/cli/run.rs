//! Tests for `envweave run`.

use crate::support::*;

#[cfg(unix)]
#[test]
fn test_run_injects_env_vars() {
    let t = Test::with_files(SAMPLE_CONFIG, SAMPLE_SNAPSHOT);

    let output = t.run(&["sh", "-c", "echo $secret_data_foo_bar $mykey $web_port"]);
    assert_success(&output);
    assert_stdout_contains(&output, "somevalue1 myValue 8080");
}

#[cfg(unix)]
#[test]
fn test_run_pristine_environment() {
    let config = format!("{}\n[exec.env]\npristine = true\n", SAMPLE_CONFIG);
    let t = Test::with_files(&config, SAMPLE_SNAPSHOT);

    let output = t.run(&["/bin/sh", "-c", "echo home=${HOME:-unset}"]);
    assert_success(&output);
    assert_stdout_contains(&output, "home=unset");
}

#[cfg(unix)]
#[test]
fn test_run_exit_code_passthrough() {
    let t = Test::with_files("", "{}");

    let output = t.run(&["sh", "-c", "exit 42"]);
    assert_eq!(output.status.code(), Some(42));
}

#[test]
fn test_run_unknown_command() {
    let t = Test::with_files("", "{}");

    let output = t.run(&["envweave-definitely-not-a-command"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "command not found");
}

#[test]
fn test_run_requires_command() {
    let t = Test::with_files("", "{}");

    let output = t
        .cmd()
        .args(["run", "--snapshot", "snapshot.json"])
        .output()
        .unwrap();
    assert_failure(&output);
}
