//! Key/value prefix flattening.

use crate::core::config::PathSpec;
use crate::core::domain::KeyPair;
use crate::core::format::NameFormatter;
use crate::core::types::EnvPair;
use crate::error::ConfigError;

/// Flatten a prefix listing under `path`.
///
/// Every record yields exactly one pair, in input order.
///
/// # Errors
///
/// Returns a `ConfigError` if `spec.format` is not a valid template.
pub fn flatten(path: &str, spec: &PathSpec, records: &[KeyPair]) -> Result<Vec<EnvPair>, ConfigError> {
    let formatter = NameFormatter::for_path(spec)?;
    Ok(flatten_with(path, &formatter, records))
}

/// Flatten with an already-compiled formatter.
pub fn flatten_with(path: &str, formatter: &NameFormatter, records: &[KeyPair]) -> Vec<EnvPair> {
    records
        .iter()
        .map(|record| (formatter.format(path, &record.key), record.value.clone()))
        .collect()
}
