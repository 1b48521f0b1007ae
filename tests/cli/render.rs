//! Tests for `envweave render`.

use crate::support::*;

#[test]
fn test_render_projects_all_sources() {
    let t = Test::with_files(SAMPLE_CONFIG, SAMPLE_SNAPSHOT);

    let output = t.render();
    assert_success(&output);
    assert_stdout_contains(&output, "secret_data_foo_bar=somevalue1\n");
    assert_stdout_contains(&output, "secret_data_foo_zed=somevalue2\n");
    assert_stdout_contains(&output, "mykey=myValue\n");
    assert_stdout_contains(&output, "web_id=web-1\n");
    assert_stdout_contains(&output, "web_tag=tag1,tag2\n");
    assert_stdout_contains(&output, "web_port=8080\n");
}

#[test]
fn test_render_skips_non_string_and_stale_values() {
    let t = Test::with_files(SAMPLE_CONFIG, SAMPLE_SNAPSHOT);

    let output = t.render();
    assert_success(&output);
    assert_stdout_excludes(&output, "secret_data_foo_count");
    assert_stdout_excludes(&output, "web-old");
    assert_stdout_excludes(&output, "10.0.0.9");
}

#[test]
fn test_render_keeps_inherited_by_default() {
    let t = Test::with_files(SAMPLE_CONFIG, SAMPLE_SNAPSHOT);

    let output = t
        .cmd()
        .env("EDITOR", "vi")
        .args(["render", "--snapshot", "snapshot.json"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "EDITOR=vi\n");
}

#[test]
fn test_render_pristine_with_custom() {
    let config = format!(
        "{}\n[exec.env]\npristine = true\ncustom = [\"GOPATH=/usr/go\"]\n",
        SAMPLE_CONFIG
    );
    let t = Test::with_files(&config, SAMPLE_SNAPSHOT);

    let output = t.render();
    assert_success(&output);
    assert_stdout_contains(&output, "GOPATH=/usr/go\n");
    assert_stdout_contains(&output, "mykey=myValue\n");
    let out = stdout(&output);
    assert!(!out.lines().any(|l| l.starts_with("PATH=")));
    assert!(!out.lines().any(|l| l.starts_with("HOME=")));
}

#[test]
fn test_render_custom_beats_blacklist() {
    let t = Test::with_files(
        "[exec.env]\nblacklist = [\"EDITOR*\"]\ncustom = [\"EDITOR=nvim\"]\n",
        "{}",
    );

    let output = t
        .cmd()
        .env("EDITOR", "vi")
        .env("EDITOR_THEME", "dark")
        .args(["render", "--snapshot", "snapshot.json"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "EDITOR=nvim\n");
    assert_stdout_excludes(&output, "EDITOR_THEME");
}

#[test]
fn test_render_json() {
    let t = Test::with_files(SAMPLE_CONFIG, SAMPLE_SNAPSHOT);

    let output = t.render_json();
    assert_success(&output);

    let env: std::collections::BTreeMap<String, String> =
        serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(env["secret_data_foo_bar"], "somevalue1");
    assert_eq!(env["web_address"], "10.0.0.1");
}

#[test]
fn test_render_destroyed_secret_is_silent() {
    let t = Test::with_files("[[secret]]\npath = \"secret/data/foo\"\n", DESTROYED_SNAPSHOT);

    let output = t.render();
    assert_success(&output);
    assert_stdout_excludes(&output, "secret_data_foo");
}

#[test]
fn test_render_to_file() {
    let t = Test::with_files(SAMPLE_CONFIG, SAMPLE_SNAPSHOT);

    let output = t
        .cmd()
        .args(["render", "--snapshot", "snapshot.json", "--output", "out.env"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "wrote");

    let written = std::fs::read_to_string(t.path("out.env")).unwrap();
    assert!(written.contains("mykey=myValue\n"));
}

#[test]
fn test_render_snapshot_from_env_var() {
    let t = Test::with_files(SAMPLE_CONFIG, SAMPLE_SNAPSHOT);

    let output = t
        .cmd()
        .env("ENVWEAVE_SNAPSHOT", "snapshot.json")
        .arg("render")
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "mykey=myValue\n");
}
