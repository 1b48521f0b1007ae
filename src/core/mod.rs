//! Core library components.
//!
//! Flattening of backend data into environment variables, and reconciliation
//! of those variables with the inherited process environment.

pub mod config;
pub mod constants;
pub mod domain;
pub mod env;
pub mod flatten;
pub mod format;
pub mod glob;
pub mod reconcile;
pub mod runner;
pub mod snapshot;
pub mod types;
