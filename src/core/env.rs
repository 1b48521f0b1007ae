//! Rendering of a final environment.
//!
//! Serializes an [`EnvironmentMap`] as a dotenv file or JSON object.

#[cfg(unix)]
use std::io::Write;
use std::path::Path;

use crate::core::types::EnvironmentMap;
use crate::error::Result;

/// A rendered environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env {
    vars: EnvironmentMap,
}

impl Env {
    pub fn new(vars: EnvironmentMap) -> Self {
        Self { vars }
    }

    /// Get a value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Underlying map
    pub fn vars(&self) -> &EnvironmentMap {
        &self.vars
    }

    pub fn into_vars(self) -> EnvironmentMap {
        self.vars
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Pretty-printed JSON object, names in sorted order
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.vars)?)
    }

    /// Write the environment to `path` in dotenv format
    ///
    /// The file is created with mode 0600 on Unix since it may hold secrets.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_env_string();

        #[cfg(unix)]
        {
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

            let mut file = std::fs::OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .mode(0o600)
                .open(path)?;
            file.write_all(content.as_bytes())?;
            file.flush()?;

            // Mode only applies on create; tighten an existing file too.
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        #[cfg(not(unix))]
        {
            std::fs::write(path, content)?;
        }

        Ok(())
    }

    /// Serialize to dotenv format
    ///
    /// Quotes values that contain whitespace or special characters.
    fn to_env_string(&self) -> String {
        let mut output = String::new();

        for (name, value) in &self.vars {
            if needs_quotes(value) {
                output.push_str(&format!("{}=\"{}\"\n", name, escape_env_value(value)));
            } else {
                output.push_str(&format!("{}={}\n", name, value));
            }
        }

        output
    }
}

impl From<EnvironmentMap> for Env {
    fn from(vars: EnvironmentMap) -> Self {
        Self::new(vars)
    }
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value.chars().any(|ch| ch.is_whitespace())
        || value.contains('#')
        || value.contains('=')
        || value.contains('"')
        || value.contains('\'')
        || value.contains('\\')
        || value.contains('$')
}

fn escape_env_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(ch),
        }
    }

    escaped
}

impl std::fmt::Display for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_env_string())
    }
}
