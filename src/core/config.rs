//! Configuration file management.
//!
//! Handles reading and validating `envweave.toml`: which secret paths,
//! key/value prefixes and service queries feed the environment, and the
//! policy used to reconcile it with the inherited environment.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::core::flatten::ServiceFormatter;
use crate::core::format::NameFormatter;
use crate::core::reconcile::CompiledPolicy;
use crate::error::{ConfigError, Result};

/// Project configuration stored in `envweave.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Options applied to every generated name
    #[serde(default)]
    pub naming: Naming,
    /// Secret paths to project
    #[serde(default, rename = "secret")]
    pub secrets: Vec<PathSpec>,
    /// Key/value prefixes to project
    #[serde(default, rename = "prefix")]
    pub prefixes: Vec<PathSpec>,
    /// Service catalog queries to project
    #[serde(default, rename = "service")]
    pub services: Vec<ServiceConfig>,
    /// Child process settings
    #[serde(default)]
    pub exec: ExecConfig,
}

/// Naming options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Naming {
    /// Upper-case every generated name
    #[serde(default)]
    pub upcase: bool,
}

/// A secret path or key/value prefix to project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathSpec {
    /// Backend path, e.g. `secret/data/foo`
    pub path: String,
    /// Omit the sanitized path from generated names (default false)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_prefix: Option<bool>,
    /// Custom name template; placeholders `{{key}}` and `{{path}}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl PathSpec {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Whether the path is left out of generated names.
    pub fn no_prefix(&self) -> bool {
        self.no_prefix.unwrap_or(false)
    }
}

/// A service catalog query and its five name templates.
///
/// Placeholders: `{{key}}` (attribute name) and `{{service}}` (service name).
/// Unset templates default to `{{service}}/{{key}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_port: Option<String>,
}

/// Child process section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecConfig {
    #[serde(default)]
    pub env: EnvPolicy,
}

/// Reconciliation policy for the child environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvPolicy {
    /// Discard the inherited environment
    #[serde(default)]
    pub pristine: bool,
    /// `KEY=VALUE` overrides, applied last
    #[serde(default)]
    pub custom: Vec<String>,
    /// Inherited names to keep (empty keeps all)
    #[serde(default)]
    pub whitelist: Vec<String>,
    /// Names to remove from inherited and generated variables
    #[serde(default)]
    pub blacklist: Vec<String>,
}

impl Config {
    /// Default configuration path in the current directory
    pub fn default_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Load and validate a configuration file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file doesn't exist,
    /// `ConfigError::Parse` if the TOML is malformed, or any validation error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config = Self::parse(&contents)?;

        debug!(
            secrets = config.secrets.len(),
            prefixes = config.prefixes.len(),
            services = config.services.len(),
            "config loaded"
        );

        Ok(config)
    }

    /// Parse and validate configuration text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` or any validation error.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// Checks:
    /// - Every secret and prefix has a non-empty path
    /// - Every service has a non-empty query
    /// - Every name template compiles
    /// - The environment policy compiles (globs and custom entries)
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found.
    pub fn validate(&self) -> Result<()> {
        debug!("validating config");

        for spec in self.secrets.iter().chain(&self.prefixes) {
            if spec.path.trim().is_empty() {
                return Err(ConfigError::MissingField { field: "path" }.into());
            }
            NameFormatter::for_path(spec)?;
        }

        for service in &self.services {
            if service.query.trim().is_empty() {
                return Err(ConfigError::MissingField { field: "query" }.into());
            }
            ServiceFormatter::for_service(service)?;
        }

        CompiledPolicy::compile(&self.exec.env)?;

        Ok(())
    }

    /// Configured policy for the child environment.
    pub fn policy(&self) -> &EnvPolicy {
        &self.exec.env
    }
}
