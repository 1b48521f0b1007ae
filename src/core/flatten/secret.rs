//! Secret document flattening.

use crate::core::config::PathSpec;
use crate::core::domain::{SecretDocument, SecretMap, SecretValue};
use crate::core::format::NameFormatter;
use crate::core::types::EnvPair;
use crate::error::ConfigError;

/// Result of flattening one secret document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flattened {
    pub pairs: Vec<EnvPair>,
    /// False when a versioned secret is destroyed or has no data.
    pub found: bool,
}

impl Flattened {
    fn not_found() -> Self {
        Self {
            pairs: Vec::new(),
            found: false,
        }
    }
}

/// Flatten a secret document read from `path`.
///
/// Only string values produce pairs. Entries are visited in lexicographic
/// key order.
///
/// # Errors
///
/// Returns a `ConfigError` if `spec.format` is not a valid template. An
/// unavailable secret is not an error: it yields `found == false`.
pub fn flatten(path: &str, spec: &PathSpec, document: &SecretDocument) -> Result<Flattened, ConfigError> {
    let formatter = NameFormatter::for_path(spec)?;
    Ok(flatten_with(path, &formatter, document))
}

/// Flatten with an already-compiled formatter.
pub fn flatten_with(path: &str, formatter: &NameFormatter, document: &SecretDocument) -> Flattened {
    let data = match document {
        SecretDocument::Unversioned(map) => map,
        SecretDocument::Versioned { metadata, .. } if metadata.destroyed => {
            return Flattened::not_found();
        }
        SecretDocument::Versioned { data: None, .. } => return Flattened::not_found(),
        SecretDocument::Versioned { data: Some(map), .. } => map,
    };

    Flattened {
        pairs: flatten_map(path, formatter, data),
        found: true,
    }
}

fn flatten_map(path: &str, formatter: &NameFormatter, map: &SecretMap) -> Vec<EnvPair> {
    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            SecretValue::String(s) => pairs.push((formatter.format(path, key), s.clone())),
            SecretValue::Number(_)
            | SecretValue::Bool(_)
            | SecretValue::List(_)
            | SecretValue::Map(_)
            | SecretValue::Null => {}
        }
    }
    pairs
}
