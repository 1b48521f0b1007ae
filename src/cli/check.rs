//! Check command.
//!
//! Validates the configuration and, given a snapshot, reports which sources
//! produced variables.

use std::path::Path;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::runner::Runner;
use crate::core::snapshot::Snapshot;
use crate::error::{Error, Result};

/// Validate configuration and optionally dry-run a snapshot.
pub fn execute(config_path: &Path, snapshot: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;

    output::header("Configuration");
    output::kv("file:    ", output::path(&config_path.display().to_string()));
    output::kv("secrets: ", config.secrets.len());
    output::kv("prefixes:", config.prefixes.len());
    output::kv("services:", config.services.len());
    output::kv("pristine:", config.policy().pristine);

    let Some(snapshot) = snapshot else {
        output::success("configuration valid");
        return Ok(());
    };

    let runner = Runner::new(config);
    let generated = runner.generate(&Snapshot::load(snapshot)?);

    output::header("Snapshot");
    output::kv("variables:", generated.env.len());
    for source in &generated.missing {
        output::warn(&format!("{} has no data in snapshot", source));
    }
    for path in &generated.unavailable {
        output::warn(&format!("secret '{}' is destroyed or empty", path));
    }
    for failure in &generated.failures {
        output::error(&format!("{}: {}", failure.source, failure.error));
    }

    if !generated.failures.is_empty() {
        return Err(Error::Other(format!(
            "{} source(s) failed",
            generated.failures.len()
        )));
    }

    output::success("configuration valid");
    Ok(())
}
