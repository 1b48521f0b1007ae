//! Environment reconciliation.
//!
//! Combines the inherited process environment, the generated variables and
//! the user's custom overrides under the configured policy.
//!
//! Precedence, highest first:
//!
//! 1. custom entries, applied last and never filtered
//! 2. blacklist, which removes inherited and generated keys alike
//! 3. whitelist, which restricts the inherited environment when non-empty
//! 4. pristine, which drops the inherited environment entirely

use tracing::debug;

use crate::core::config::EnvPolicy;
use crate::core::glob::GlobSet;
use crate::core::types::{EnvPair, EnvironmentMap};
use crate::error::ConfigError;

/// An [`EnvPolicy`] with its patterns compiled and custom entries parsed.
#[derive(Debug, Clone, Default)]
pub struct CompiledPolicy {
    pristine: bool,
    custom: Vec<EnvPair>,
    whitelist: GlobSet,
    blacklist: GlobSet,
}

impl CompiledPolicy {
    /// Compile a policy.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidGlob` or `ConfigError::InvalidCustomEntry`
    /// for the first malformed pattern or entry.
    pub fn compile(policy: &EnvPolicy) -> Result<Self, ConfigError> {
        let custom = policy
            .custom
            .iter()
            .map(|entry| parse_custom(entry))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            pristine: policy.pristine,
            custom,
            whitelist: GlobSet::parse(&policy.whitelist)?,
            blacklist: GlobSet::parse(&policy.blacklist)?,
        })
    }

    /// Build the final environment.
    pub fn apply(&self, inherited: &EnvironmentMap, generated: &EnvironmentMap) -> EnvironmentMap {
        let mut env: EnvironmentMap = if self.pristine {
            EnvironmentMap::new()
        } else {
            inherited
                .iter()
                .filter(|(name, _)| self.whitelist.is_empty() || self.whitelist.matches(name))
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect()
        };
        let kept = env.len();

        env.extend(generated.iter().map(|(k, v)| (k.clone(), v.clone())));

        let before = env.len();
        env.retain(|name, _| !self.blacklist.matches(name));
        let blacklisted = before - env.len();

        for (name, value) in &self.custom {
            env.insert(name.clone(), value.clone());
        }

        debug!(
            pristine = self.pristine,
            inherited = inherited.len(),
            inherited_kept = kept,
            generated = generated.len(),
            blacklisted,
            custom = self.custom.len(),
            total = env.len(),
            "environment reconciled"
        );

        env
    }
}

/// Parse a `KEY=VALUE` custom entry, splitting on the first `=`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidCustomEntry` when there is no `=` or the key
/// is empty.
pub fn parse_custom(entry: &str) -> Result<EnvPair, ConfigError> {
    match entry.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(ConfigError::InvalidCustomEntry(entry.to_string())),
    }
}

/// Reconcile `inherited` and `generated` under `policy`.
///
/// # Errors
///
/// Any malformed pattern or custom entry aborts the whole merge.
pub fn reconcile(
    inherited: &EnvironmentMap,
    generated: &EnvironmentMap,
    policy: &EnvPolicy,
) -> Result<EnvironmentMap, ConfigError> {
    Ok(CompiledPolicy::compile(policy)?.apply(inherited, generated))
}
