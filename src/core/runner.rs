//! Environment generation.
//!
//! The runner walks every configured source, flattens the matching snapshot
//! data into one working map, and reconciles the result with the inherited
//! environment.
//!
//! The `append_*` methods take the working map by `&mut`, so only one
//! flattener can write into it at a time. Callers that flatten from several
//! threads must share the map behind a `Mutex`.

use std::fmt;

use tracing::{debug, trace, warn};

use crate::core::config::{Config, PathSpec, ServiceConfig};
use crate::core::domain::{KeyPair, SecretDocument, ServiceRecord};
use crate::core::flatten::{prefix, secret, service, ServiceFormatter};
use crate::core::format::NameFormatter;
use crate::core::reconcile::CompiledPolicy;
use crate::core::snapshot::Snapshot;
use crate::core::types::{EnvPair, EnvironmentMap};
use crate::error::{ConfigError, Result};

/// A configured data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Secret(String),
    Prefix(String),
    Service(String),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Secret(path) => write!(f, "secret '{}'", path),
            Self::Prefix(path) => write!(f, "prefix '{}'", path),
            Self::Service(query) => write!(f, "service '{}'", query),
        }
    }
}

/// A source whose flattening failed.
#[derive(Debug)]
pub struct SourceFailure {
    pub source: Source,
    pub error: ConfigError,
}

/// Output of [`Runner::generate`].
#[derive(Debug, Default)]
pub struct Generated {
    /// Accumulated variables from every source that succeeded
    pub env: EnvironmentMap,
    /// Sources skipped because of a configuration error
    pub failures: Vec<SourceFailure>,
    /// Versioned secrets that were destroyed or empty
    pub unavailable: Vec<String>,
    /// Configured sources with no data in the snapshot
    pub missing: Vec<Source>,
}

/// Builds environments from a configuration.
#[derive(Debug, Clone)]
pub struct Runner {
    config: Config,
}

impl Runner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn path_formatter(&self, spec: &PathSpec) -> std::result::Result<NameFormatter, ConfigError> {
        Ok(NameFormatter::for_path(spec)?.upcase(self.config.naming.upcase))
    }

    /// Flatten a secret document into `env`.
    ///
    /// Returns `false` when the secret is destroyed or has no data; nothing
    /// is appended in that case.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the path's template is invalid.
    pub fn append_secrets(
        &self,
        env: &mut EnvironmentMap,
        spec: &PathSpec,
        document: &SecretDocument,
    ) -> std::result::Result<bool, ConfigError> {
        let formatter = self.path_formatter(spec)?;
        let flattened = secret::flatten_with(&spec.path, &formatter, document);
        let count = insert_pairs(env, flattened.pairs);
        debug!(path = %spec.path, count, found = flattened.found, "appended secret");
        Ok(flattened.found)
    }

    /// Flatten a key/value listing into `env`. Returns the number of pairs.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the path's template is invalid.
    pub fn append_prefixes(
        &self,
        env: &mut EnvironmentMap,
        spec: &PathSpec,
        records: &[KeyPair],
    ) -> std::result::Result<usize, ConfigError> {
        let formatter = self.path_formatter(spec)?;
        let count = insert_pairs(env, prefix::flatten_with(&spec.path, &formatter, records));
        debug!(path = %spec.path, count, "appended prefix");
        Ok(count)
    }

    /// Flatten a service listing into `env`. Returns the number of pairs.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if any of the service's templates is invalid.
    pub fn append_services(
        &self,
        env: &mut EnvironmentMap,
        config: &ServiceConfig,
        records: &[ServiceRecord],
    ) -> std::result::Result<usize, ConfigError> {
        let formatter = ServiceFormatter::for_service(config)?.upcase(self.config.naming.upcase);
        let count = insert_pairs(env, service::flatten_with(&config.query, &formatter, records));
        debug!(query = %config.query, count, "appended services");
        Ok(count)
    }

    /// Flatten every configured source present in `snapshot`.
    ///
    /// Sources are visited in order: secrets, prefixes, services, each in
    /// configuration order. Later sources overwrite earlier ones on name
    /// collision. A source with a bad template is recorded in
    /// [`Generated::failures`] and the others still run.
    pub fn generate(&self, snapshot: &Snapshot) -> Generated {
        let mut out = Generated::default();

        for spec in &self.config.secrets {
            let source = Source::Secret(spec.path.clone());
            let Some(document) = snapshot.secret(&spec.path) else {
                debug!(%source, "no data in snapshot");
                out.missing.push(source);
                continue;
            };
            match self.append_secrets(&mut out.env, spec, document) {
                Ok(true) => {}
                Ok(false) => {
                    debug!(%source, "secret destroyed or empty");
                    out.unavailable.push(spec.path.clone());
                }
                Err(error) => record_failure(&mut out, source, error),
            }
        }

        for spec in &self.config.prefixes {
            let source = Source::Prefix(spec.path.clone());
            let Some(records) = snapshot.prefix(&spec.path) else {
                debug!(%source, "no data in snapshot");
                out.missing.push(source);
                continue;
            };
            if let Err(error) = self.append_prefixes(&mut out.env, spec, records) {
                record_failure(&mut out, source, error);
            }
        }

        for config in &self.config.services {
            let source = Source::Service(config.query.clone());
            let Some(records) = snapshot.services(&config.query) else {
                debug!(%source, "no data in snapshot");
                out.missing.push(source);
                continue;
            };
            if let Err(error) = self.append_services(&mut out.env, config, records) {
                record_failure(&mut out, source, error);
            }
        }

        debug!(
            variables = out.env.len(),
            failures = out.failures.len(),
            "environment generated"
        );
        out
    }

    /// Generate variables from `snapshot` and reconcile them with `inherited`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the environment policy is invalid. Failing
    /// sources are logged and skipped, not returned.
    pub fn environment(&self, snapshot: &Snapshot, inherited: &EnvironmentMap) -> Result<EnvironmentMap> {
        let policy = CompiledPolicy::compile(self.config.policy())?;
        let generated = self.generate(snapshot);
        Ok(policy.apply(inherited, &generated.env))
    }
}

fn record_failure(out: &mut Generated, source: Source, error: ConfigError) {
    warn!(%source, %error, "skipping source");
    out.failures.push(SourceFailure { source, error });
}

/// Insert pairs in order; later pairs overwrite earlier ones.
fn insert_pairs(env: &mut EnvironmentMap, pairs: Vec<EnvPair>) -> usize {
    let count = pairs.len();
    for (name, value) in pairs {
        if env.contains_key(&name) {
            trace!(name = %name, "overwriting variable");
        }
        env.insert(name, value);
    }
    count
}
