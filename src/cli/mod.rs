//! Command-line interface.

pub mod check;
pub mod completions;
pub mod output;
pub mod render;
pub mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::constants;
use crate::core::types::EnvironmentMap;

/// envweave - assemble a process environment from secrets, key/value
/// prefixes and service catalogs.
#[derive(Parser)]
#[command(
    name = "envweave",
    about = "Assemble a process environment from secrets, key/value prefixes and service catalogs",
    version
)]
pub struct Cli {
    /// Enable debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "ENVWEAVE_CONFIG",
        default_value = constants::CONFIG_FILE
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the final environment
    Render {
        /// Backend snapshot (JSON)
        #[arg(short, long, env = "ENVWEAVE_SNAPSHOT")]
        snapshot: PathBuf,
        /// Output as JSON instead of dotenv
        #[arg(long)]
        json: bool,
        /// Write to a file (mode 0600) instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run a command with the final environment
    Run {
        /// Backend snapshot (JSON)
        #[arg(short, long, env = "ENVWEAVE_SNAPSHOT")]
        snapshot: PathBuf,
        /// Command and arguments to run
        #[arg(trailing_var_arg = true, required = true)]
        command: Vec<String>,
    },

    /// Validate the configuration, optionally against a snapshot
    Check {
        /// Backend snapshot (JSON)
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command, config: PathBuf) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Render {
            snapshot,
            json,
            output,
        } => render::execute(&config, &snapshot, json, output.as_deref()),
        Run { snapshot, command } => run::execute(&config, &snapshot, &command),
        Check { snapshot } => check::execute(&config, snapshot.as_deref()),
        Completions { shell } => completions::execute(shell),
    }
}

/// The current process environment. Non-UTF-8 entries are skipped.
pub fn inherited_env() -> EnvironmentMap {
    std::env::vars_os()
        .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}
