//! envweave - project key/value, secret and service-catalog data into a
//! process environment.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── render        # Print the final environment
//! │   ├── run           # Run a command with the final environment
//! │   ├── check         # Validate configuration and snapshot
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # envweave.toml management
//!     ├── snapshot      # Backend data snapshot (JSON)
//!     ├── domain/       # Secret documents, key pairs, service records
//!     ├── format        # Variable name templates and sanitization
//!     ├── flatten/      # Secret, prefix and service flatteners
//!     ├── glob          # Whitelist/blacklist patterns
//!     ├── reconcile     # Pristine/whitelist/blacklist/custom precedence
//!     ├── runner        # Drives flatteners and reconciliation
//!     └── env           # dotenv / JSON rendering
//! ```
//!
//! # Example
//!
//! ```
//! use envweave::{reconcile, EnvPolicy, EnvironmentMap};
//!
//! let inherited: EnvironmentMap = [("PATH", "/bin"), ("EDITOR", "vi")]
//!     .into_iter()
//!     .map(|(k, v)| (k.to_string(), v.to_string()))
//!     .collect();
//! let policy = EnvPolicy {
//!     blacklist: vec!["EDITOR*".to_string()],
//!     custom: vec!["EDITOR=nvim".to_string()],
//!     ..Default::default()
//! };
//!
//! let env = reconcile(&inherited, &EnvironmentMap::new(), &policy).unwrap();
//! assert_eq!(env["EDITOR"], "nvim");
//! assert_eq!(env["PATH"], "/bin");
//! ```

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::config::{Config, EnvPolicy, PathSpec, ServiceConfig};
pub use crate::core::domain::{KeyPair, SecretDocument, SecretValue, ServiceRecord};
pub use crate::core::env::Env;
pub use crate::core::flatten::Flattened;
pub use crate::core::format::{format_name, sanitize, NameFormatter, NameTemplate};
pub use crate::core::reconcile::{reconcile, CompiledPolicy};
pub use crate::core::runner::{Generated, Runner, Source};
pub use crate::core::snapshot::Snapshot;
pub use crate::core::types::EnvironmentMap;
pub use crate::error::{ConfigError, Error, Result};
