//! Render command.
//!
//! Prints the final environment as dotenv or JSON, or writes it to a file.

use std::path::Path;

use crate::cli::{inherited_env, output};
use crate::core::config::Config;
use crate::core::env::Env;
use crate::core::runner::Runner;
use crate::core::snapshot::Snapshot;
use crate::error::Result;

/// Render the environment built from `snapshot`.
pub fn execute(config_path: &Path, snapshot: &Path, json: bool, out: Option<&Path>) -> Result<()> {
    let runner = Runner::new(Config::load(config_path)?);
    let snapshot = Snapshot::load(snapshot)?;
    let env = Env::new(runner.environment(&snapshot, &inherited_env())?);

    match out {
        Some(path) => {
            env.save(path)?;
            output::success(&format!(
                "wrote {} variables to {}",
                env.len(),
                output::path(&path.display().to_string())
            ));
        }
        None if json => println!("{}", env.to_json()?),
        None => print!("{}", env),
    }

    Ok(())
}
