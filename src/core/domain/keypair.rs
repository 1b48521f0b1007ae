//! Key/value record type.

use serde::{Deserialize, Serialize};

/// A single record from a key/value prefix listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    pub key: String,
    pub value: String,
}

impl KeyPair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
