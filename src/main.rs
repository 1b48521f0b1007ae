//! envweave - assemble a process environment from backend data.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use envweave::cli::output;
use envweave::cli::{execute, Cli};
use envweave::core::constants::LOG_ENV;
use envweave::error::{ConfigError, Error};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("envweave=debug")
        } else {
            EnvFilter::new("envweave=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command, cli.config) {
        let suggestion = match &e {
            Error::Config(ConfigError::NotFound(_)) => Some("create envweave.toml or pass --config"),
            Error::Config(ConfigError::UnknownPlaceholder { .. }) => {
                Some("templates accept {{key}} and {{path}}; service templates {{key}} and {{service}}")
            }
            Error::Config(ConfigError::InvalidGlob { .. }) => {
                Some("patterns are NAME, PREFIX*, *SUFFIX or *")
            }
            Error::CommandNotFound(_) => Some("check the command name and your PATH"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
