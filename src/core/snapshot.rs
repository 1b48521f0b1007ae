//! Backend snapshot loading.
//!
//! A snapshot is a JSON file holding the raw responses a backend watcher
//! delivered, keyed by the query path that produced them:
//!
//! ```json
//! {
//!   "secrets":  { "secret/data/foo": { "metadata": {...}, "data": {...} } },
//!   "prefixes": { "app/my_service": [ { "key": "k", "value": "v" } ] },
//!   "services": { "web": [ { "id": "web-1", "name": "web", "port": 80 } ] }
//! }
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::core::domain::{KeyPair, SecretDocument, ServiceRecord};
use crate::error::{Error, Result};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSnapshot {
    #[serde(default)]
    secrets: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    prefixes: BTreeMap<String, Vec<KeyPair>>,
    #[serde(default)]
    services: BTreeMap<String, Vec<ServiceRecord>>,
}

/// Backend data for one invocation.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    secrets: BTreeMap<String, SecretDocument>,
    prefixes: BTreeMap<String, Vec<KeyPair>>,
    services: BTreeMap<String, Vec<ServiceRecord>>,
}

impl Snapshot {
    /// Load a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be read, `Error::Json` for
    /// malformed JSON, or `Error::Snapshot` for a secret that is not an
    /// object.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading snapshot");
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parse snapshot JSON.
    ///
    /// # Errors
    ///
    /// See [`Snapshot::load`].
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let raw: RawSnapshot = serde_json::from_str(contents)?;

        let mut secrets = BTreeMap::new();
        for (path, value) in raw.secrets {
            let document = SecretDocument::from_json(value).map_err(|e| match e {
                Error::Snapshot(reason) => Error::Snapshot(format!("secret '{}': {}", path, reason)),
                other => other,
            })?;
            secrets.insert(path, document);
        }

        debug!(
            secrets = secrets.len(),
            prefixes = raw.prefixes.len(),
            services = raw.services.len(),
            "snapshot loaded"
        );

        Ok(Self {
            secrets,
            prefixes: raw.prefixes,
            services: raw.services,
        })
    }

    /// Add or replace a secret document.
    pub fn with_secret(mut self, path: impl Into<String>, document: SecretDocument) -> Self {
        self.secrets.insert(path.into(), document);
        self
    }

    /// Add or replace a prefix listing.
    pub fn with_prefix(mut self, path: impl Into<String>, records: Vec<KeyPair>) -> Self {
        self.prefixes.insert(path.into(), records);
        self
    }

    /// Add or replace a service listing.
    pub fn with_services(mut self, query: impl Into<String>, records: Vec<ServiceRecord>) -> Self {
        self.services.insert(query.into(), records);
        self
    }

    pub fn secret(&self, path: &str) -> Option<&SecretDocument> {
        self.secrets.get(path)
    }

    pub fn prefix(&self, path: &str) -> Option<&[KeyPair]> {
        self.prefixes.get(path).map(Vec::as_slice)
    }

    pub fn services(&self, query: &str) -> Option<&[ServiceRecord]> {
        self.services.get(query).map(Vec::as_slice)
    }
}
