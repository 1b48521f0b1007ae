//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create an envweave command with a minimal, known environment.
    ///
    /// Returns a Command configured with:
    /// - only PATH, HOME and NO_COLOR inherited
    /// - current directory set to the test project directory
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("envweave").expect("failed to find envweave binary");
        cmd.env_clear();
        cmd.env("PATH", std::env::var_os("PATH").unwrap_or_default());
        cmd.env("HOME", self.dir.path());
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `envweave render --snapshot snapshot.json`.
    pub fn render(&self) -> Output {
        self.cmd()
            .args(["render", "--snapshot", "snapshot.json"])
            .output()
            .expect("failed to run envweave render")
    }

    /// Shortcut for `envweave render --json`.
    pub fn render_json(&self) -> Output {
        self.cmd()
            .args(["render", "--snapshot", "snapshot.json", "--json"])
            .output()
            .expect("failed to run envweave render --json")
    }

    /// Shortcut for `envweave check`.
    pub fn check(&self) -> Output {
        self.cmd()
            .arg("check")
            .output()
            .expect("failed to run envweave check")
    }

    /// Shortcut for `envweave check --snapshot snapshot.json`.
    pub fn check_snapshot(&self) -> Output {
        self.cmd()
            .args(["check", "--snapshot", "snapshot.json"])
            .output()
            .expect("failed to run envweave check --snapshot")
    }

    /// Shortcut for `envweave run --snapshot snapshot.json -- <command>`.
    pub fn run(&self, command: &[&str]) -> Output {
        let mut cmd = self.cmd();
        cmd.args(["run", "--snapshot", "snapshot.json", "--"]);
        for arg in command {
            cmd.arg(arg);
        }
        cmd.output().expect("failed to run envweave run")
    }
}
