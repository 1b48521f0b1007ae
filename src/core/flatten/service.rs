//! Service catalog flattening.
//!
//! Each distinct service name yields exactly five variables (id, name,
//! address, tag, port) taken from the last record carrying that name.

use std::collections::BTreeMap;

use tracing::trace;

use crate::core::config::ServiceConfig;
use crate::core::constants::DEFAULT_SERVICE_FORMAT;
use crate::core::domain::ServiceRecord;
use crate::core::format::{NameTemplate, Placeholder, TemplateFields};
use crate::core::types::EnvPair;
use crate::error::ConfigError;

/// A service attribute exported as a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Id,
    Name,
    Address,
    Tag,
    Port,
}

impl Attribute {
    /// All attributes, in emission order.
    pub const ALL: [Attribute; 5] = [
        Attribute::Id,
        Attribute::Name,
        Attribute::Address,
        Attribute::Tag,
        Attribute::Port,
    ];

    /// Name substituted for `{{key}}`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Address => "address",
            Self::Tag => "tag",
            Self::Port => "port",
        }
    }

    fn value(self, record: &ServiceRecord) -> String {
        match self {
            Self::Id => record.id.clone(),
            Self::Name => record.name.clone(),
            Self::Address => record.address.clone(),
            Self::Tag => record.joined_tags(),
            Self::Port => record.port.to_string(),
        }
    }
}

/// Compiled name templates for one service query.
#[derive(Debug, Clone)]
pub struct ServiceFormatter {
    id: NameTemplate,
    name: NameTemplate,
    address: NameTemplate,
    tag: NameTemplate,
    port: NameTemplate,
    upcase: bool,
}

impl ServiceFormatter {
    /// Compile the five templates, falling back to `{{service}}/{{key}}`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for the first invalid template.
    pub fn for_service(config: &ServiceConfig) -> Result<Self, ConfigError> {
        let compile = |source: &Option<String>| {
            NameTemplate::parse(
                source.as_deref().unwrap_or(DEFAULT_SERVICE_FORMAT),
                Placeholder::SERVICE_FIELDS,
            )
        };

        Ok(Self {
            id: compile(&config.format_id)?,
            name: compile(&config.format_name)?,
            address: compile(&config.format_address)?,
            tag: compile(&config.format_tag)?,
            port: compile(&config.format_port)?,
            upcase: false,
        })
    }

    /// Upper-case every name this formatter produces.
    pub fn upcase(mut self, upcase: bool) -> Self {
        self.upcase = upcase;
        self
    }

    fn template(&self, attribute: Attribute) -> &NameTemplate {
        match attribute {
            Attribute::Id => &self.id,
            Attribute::Name => &self.name,
            Attribute::Address => &self.address,
            Attribute::Tag => &self.tag,
            Attribute::Port => &self.port,
        }
    }

    /// Render the variable name for one attribute of `service`.
    pub fn format(&self, service: &str, attribute: Attribute) -> String {
        let name = self.template(attribute).render(&TemplateFields {
            key: attribute.as_str(),
            path: "",
            service,
        });

        if self.upcase {
            name.to_ascii_uppercase()
        } else {
            name
        }
    }
}

/// Flatten the catalog records returned for `query`.
///
/// # Errors
///
/// Returns a `ConfigError` if any of the configured templates is invalid.
pub fn flatten(
    query: &str,
    config: &ServiceConfig,
    records: &[ServiceRecord],
) -> Result<Vec<EnvPair>, ConfigError> {
    let formatter = ServiceFormatter::for_service(config)?;
    Ok(flatten_with(query, &formatter, records))
}

/// Flatten with already-compiled templates.
///
/// Services are emitted in ascending name order; attributes in the fixed
/// order id, name, address, tag, port.
pub fn flatten_with(query: &str, formatter: &ServiceFormatter, records: &[ServiceRecord]) -> Vec<EnvPair> {
    let mut latest: BTreeMap<&str, &ServiceRecord> = BTreeMap::new();
    for record in records {
        if let Some(previous) = latest.insert(record.name.as_str(), record) {
            trace!(query, service = %record.name, replaced = %previous.id, "newer record replaces earlier one");
        }
    }

    let mut pairs = Vec::with_capacity(latest.len() * Attribute::ALL.len());
    for (service, record) in latest {
        for attribute in Attribute::ALL {
            pairs.push((formatter.format(service, attribute), attribute.value(record)));
        }
    }
    pairs
}
