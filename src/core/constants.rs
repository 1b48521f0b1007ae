//! Constants used throughout envweave.
//!
//! Centralizes magic strings and configuration values.

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "envweave.toml";

/// Environment variable that overrides the log filter.
pub const LOG_ENV: &str = "ENVWEAVE_LOG";

/// Separator placed between the sanitized path and the sanitized key.
pub const NAME_SEPARATOR: char = '_';

/// Default name template for service attributes.
pub const DEFAULT_SERVICE_FORMAT: &str = "{{service}}/{{key}}";

/// Separator used when joining service tags into one value.
pub const TAG_SEPARATOR: &str = ",";

/// Reserved top-level key holding versioned secret metadata.
pub const SECRET_METADATA_KEY: &str = "metadata";

/// Reserved top-level key holding the versioned secret payload.
pub const SECRET_DATA_KEY: &str = "data";
