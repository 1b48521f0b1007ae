//! Secret document types.
//!
//! A secret document arrives as an arbitrary JSON mapping. Its shape is
//! decided once, when it is converted into a [`SecretDocument`].

use std::collections::BTreeMap;

use serde_json::Value;

use crate::core::constants::{SECRET_DATA_KEY, SECRET_METADATA_KEY};
use crate::error::{Error, Result};

/// One value inside a secret document.
#[derive(Debug, Clone, PartialEq)]
pub enum SecretValue {
    String(String),
    Number(serde_json::Number),
    Bool(bool),
    List(Vec<SecretValue>),
    Map(SecretMap),
    Null,
}

/// A secret mapping with deterministic (lexicographic) key order.
pub type SecretMap = BTreeMap<String, SecretValue>;

impl From<Value> for SecretValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::String(s),
            Value::Number(n) => Self::Number(n),
            Value::Bool(b) => Self::Bool(b),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Map(into_secret_map(map)),
            Value::Null => Self::Null,
        }
    }
}

fn into_secret_map(map: serde_json::Map<String, Value>) -> SecretMap {
    map.into_iter().map(|(k, v)| (k, SecretValue::from(v))).collect()
}

/// Metadata carried by a versioned secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretMetadata {
    pub destroyed: bool,
    pub version: Option<String>,
}

/// A secret document, either a flat mapping or a versioned envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum SecretDocument {
    /// Flat mapping; every entry is a candidate variable.
    Unversioned(SecretMap),
    /// `metadata` + `data` envelope. `data` is `None` when absent, null or
    /// not a mapping.
    Versioned {
        metadata: SecretMetadata,
        data: Option<SecretMap>,
    },
}

impl SecretDocument {
    /// Classify a raw JSON document.
    ///
    /// The document is versioned when it has both a `metadata` mapping with a
    /// boolean `destroyed` and a `data` key. Anything else is unversioned.
    ///
    /// # Errors
    ///
    /// Returns `Error::Snapshot` if the document is not a JSON object.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(Error::Snapshot(format!(
                "secret document must be an object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Classify a raw JSON mapping.
    pub fn from_map(mut map: serde_json::Map<String, Value>) -> Self {
        let metadata = map
            .get(SECRET_METADATA_KEY)
            .and_then(parse_metadata)
            .filter(|_| map.contains_key(SECRET_DATA_KEY));

        match metadata {
            Some(metadata) => {
                let data = match map.remove(SECRET_DATA_KEY) {
                    Some(Value::Object(data)) => Some(into_secret_map(data)),
                    _ => None,
                };
                Self::Versioned { metadata, data }
            }
            None => Self::Unversioned(into_secret_map(map)),
        }
    }

    /// Whether this document is a versioned envelope.
    pub fn is_versioned(&self) -> bool {
        matches!(self, Self::Versioned { .. })
    }
}

fn parse_metadata(value: &Value) -> Option<SecretMetadata> {
    let meta = value.as_object()?;
    let destroyed = meta.get("destroyed")?.as_bool()?;
    let version = match meta.get("version") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    Some(SecretMetadata { destroyed, version })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
