//! Run command.
//!
//! Executes a command with the reconciled environment as its complete
//! environment.

use std::path::Path;

use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::inherited_env;
use crate::core::config::Config;
use crate::core::runner::Runner;
use crate::core::snapshot::Snapshot;
use crate::error::{Error, Result};

/// Run a command with the environment built from `snapshot`.
pub fn execute(config_path: &Path, snapshot: &Path, command: &[String]) -> Result<()> {
    let runner = Runner::new(Config::load(config_path)?);
    let snapshot = Snapshot::load(snapshot)?;
    let exit_code = run_with_env(&runner, &snapshot, command)?;
    std::process::exit(exit_code);
}

/// Spawn `command` and wait for it, returning its exit code.
fn run_with_env(runner: &Runner, snapshot: &Snapshot, command: &[String]) -> Result<i32> {
    let Some((program, args)) = command.split_first() else {
        return Err(Error::Other("no command specified".to_string()));
    };

    let program =
        which::which(program).map_err(|_| Error::CommandNotFound(program.to_string()))?;
    let env = runner.environment(snapshot, &inherited_env())?;
    debug!(program = %program.display(), variables = env.len(), "spawning");

    let mut cmd = std::process::Command::new(&program);
    cmd.args(args).env_clear();

    // Values may be secrets; wipe our copies once handed to the child.
    for (name, value) in env {
        let value = Zeroizing::new(value);
        cmd.env(name, value.as_str());
    }

    let status = cmd.status()?;
    Ok(exit_code(status))
}

#[cfg(unix)]
fn exit_code(status: std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|sig| 128 + sig))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
