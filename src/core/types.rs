//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

use std::collections::BTreeMap;

/// An environment variable name (e.g., DATABASE_URL, secret_data_foo_bar).
pub type EnvName = String;

/// An environment variable value.
pub type EnvValue = String;

/// A single generated (name, value) pair.
pub type EnvPair = (EnvName, EnvValue);

/// A complete environment: unique names, deterministic iteration order.
pub type EnvironmentMap = BTreeMap<EnvName, EnvValue>;
