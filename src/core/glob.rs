//! Name patterns for whitelist and blacklist filtering.
//!
//! Supports exact names, a single leading or trailing `*`, and a bare `*`.

use crate::error::ConfigError;

/// A compiled name pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Glob {
    /// `*`
    Any,
    /// `NAME`
    Exact(String),
    /// `PREFIX*`
    Prefix(String),
    /// `*SUFFIX`
    Suffix(String),
}

impl Glob {
    /// Parse a pattern.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidGlob` for an empty pattern or a `*`
    /// anywhere other than the first or last character.
    pub fn parse(pattern: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidGlob {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        if pattern.is_empty() {
            return Err(invalid("pattern is empty"));
        }
        if pattern == "*" {
            return Ok(Self::Any);
        }

        match pattern.matches('*').count() {
            0 => Ok(Self::Exact(pattern.to_string())),
            1 => {
                if let Some(prefix) = pattern.strip_suffix('*') {
                    Ok(Self::Prefix(prefix.to_string()))
                } else if let Some(suffix) = pattern.strip_prefix('*') {
                    Ok(Self::Suffix(suffix.to_string()))
                } else {
                    Err(invalid("'*' is only allowed at the start or end"))
                }
            }
            _ => Err(invalid("only a single '*' is allowed")),
        }
    }

    /// Whether `name` matches. Case-sensitive.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(exact) => name == exact,
            Self::Prefix(prefix) => name.starts_with(prefix.as_str()),
            Self::Suffix(suffix) => name.ends_with(suffix.as_str()),
        }
    }
}

/// A list of patterns; matches when any pattern matches.
#[derive(Debug, Clone, Default)]
pub struct GlobSet {
    globs: Vec<Glob>,
}

impl GlobSet {
    /// Parse every pattern, failing on the first invalid one.
    pub fn parse<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ConfigError> {
        let globs = patterns
            .iter()
            .map(|p| Glob::parse(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { globs })
    }

    pub fn is_empty(&self) -> bool {
        self.globs.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.globs.iter().any(|g| g.matches(name))
    }
}
