//! Service catalog record type.

use serde::{Deserialize, Serialize};

use crate::core::constants::TAG_SEPARATOR;

/// One instance entry from a service catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub port: u16,
}

impl ServiceRecord {
    /// Tags joined with a comma, in order.
    pub fn joined_tags(&self) -> String {
        self.tags.join(TAG_SEPARATOR)
    }
}
