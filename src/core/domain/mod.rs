//! Domain types.

mod keypair;
mod secret;
mod service;

pub use keypair::KeyPair;
pub use secret::{SecretDocument, SecretMap, SecretMetadata, SecretValue};
pub use service::ServiceRecord;
