//! Flatteners: turn backend data into environment (name, value) pairs.
//!
//! Each flattener is a pure function of its inputs. Names come from a
//! [`NameFormatter`](crate::core::format::NameFormatter) or, for services,
//! from per-attribute templates.

pub mod prefix;
pub mod secret;
pub mod service;

pub use secret::Flattened;
pub use service::ServiceFormatter;
