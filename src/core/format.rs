//! Variable name formatting.
//!
//! Builds environment variable names from a source path and a raw key, either
//! with the built-in `<path>_<key>` scheme or through a user-supplied
//! [`NameTemplate`].

use crate::core::config::PathSpec;
use crate::core::constants::NAME_SEPARATOR;
use crate::error::ConfigError;

/// A field a name template may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// Raw key for secrets and prefixes, attribute name for services.
    Key,
    /// Raw source path.
    Path,
    /// Service name.
    Service,
}

impl Placeholder {
    /// Placeholders accepted in secret and prefix templates.
    pub const PATH_FIELDS: &'static [Placeholder] = &[Placeholder::Key, Placeholder::Path];

    /// Placeholders accepted in service templates.
    pub const SERVICE_FIELDS: &'static [Placeholder] = &[Placeholder::Key, Placeholder::Service];

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "key" => Some(Self::Key),
            "path" => Some(Self::Path),
            "service" => Some(Self::Service),
            _ => None,
        }
    }
}

/// Values substituted into a template.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateFields<'a> {
    pub key: &'a str,
    pub path: &'a str,
    pub service: &'a str,
}

impl TemplateFields<'_> {
    fn get(&self, placeholder: Placeholder) -> &str {
        match placeholder {
            Placeholder::Key => self.key,
            Placeholder::Path => self.path,
            Placeholder::Service => self.service,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Placeholder),
}

/// A parsed name template such as `APP_{{ key }}`.
///
/// Parsing checks every placeholder against the set allowed in the
/// template's context, so rendering itself cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl NameTemplate {
    /// Parse a template, accepting only the given placeholders.
    ///
    /// Whitespace inside the braces is ignored, so `{{key}}` and `{{ key }}`
    /// are equivalent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MalformedTemplate` for an empty template or an
    /// unterminated or empty placeholder, and `ConfigError::UnknownPlaceholder`
    /// for a placeholder outside `allowed`.
    pub fn parse(source: &str, allowed: &[Placeholder]) -> Result<Self, ConfigError> {
        let malformed = |reason: &str| ConfigError::MalformedTemplate {
            template: source.to_string(),
            reason: reason.to_string(),
        };

        if source.is_empty() {
            return Err(malformed("template is empty"));
        }

        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }

            let after = &rest[start + 2..];
            let end = after
                .find("}}")
                .ok_or_else(|| malformed("unterminated placeholder"))?;
            let name = after[..end].trim();
            if name.is_empty() {
                return Err(malformed("empty placeholder"));
            }

            let placeholder = Placeholder::from_name(name)
                .filter(|p| allowed.contains(p))
                .ok_or_else(|| ConfigError::UnknownPlaceholder {
                    template: source.to_string(),
                    placeholder: name.to_string(),
                })?;
            segments.push(Segment::Field(placeholder));

            rest = &after[end + 2..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// Substitute placeholders. The output is not sanitized.
    pub fn render(&self, fields: &TemplateFields<'_>) -> String {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(placeholder) => out.push_str(fields.get(*placeholder)),
            }
        }
        out
    }

    /// Template source text.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Replace every character that is not ASCII alphanumeric or `_` with `_`.
///
/// Case is preserved.
pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ch
            } else {
                NAME_SEPARATOR
            }
        })
        .collect()
}

/// Name formatter for one secret or prefix source.
#[derive(Debug, Clone, Default)]
pub struct NameFormatter {
    no_prefix: bool,
    template: Option<NameTemplate>,
    upcase: bool,
}

impl NameFormatter {
    /// Build a formatter from a path spec, compiling its template if any.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the template is invalid.
    pub fn for_path(spec: &PathSpec) -> Result<Self, ConfigError> {
        let template = spec
            .format
            .as_deref()
            .map(|source| NameTemplate::parse(source, Placeholder::PATH_FIELDS))
            .transpose()?;

        Ok(Self {
            no_prefix: spec.no_prefix(),
            template,
            upcase: false,
        })
    }

    /// Upper-case every name this formatter produces.
    pub fn upcase(mut self, upcase: bool) -> Self {
        self.upcase = upcase;
        self
    }

    /// Render the variable name for `raw_key` found under `path`.
    pub fn format(&self, path: &str, raw_key: &str) -> String {
        let name = match &self.template {
            Some(template) => template.render(&TemplateFields {
                key: raw_key,
                path,
                service: "",
            }),
            None => default_name(path, raw_key, self.no_prefix),
        };

        if self.upcase {
            name.to_ascii_uppercase()
        } else {
            name
        }
    }
}

fn default_name(path: &str, raw_key: &str, no_prefix: bool) -> String {
    let key = sanitize(raw_key);
    let path = path.trim_matches('/');
    if no_prefix || path.is_empty() {
        return key;
    }

    let mut name = sanitize(path);
    name.push(NAME_SEPARATOR);
    name.push_str(&key);
    name
}

/// Format a single name for `raw_key` under `path`.
///
/// # Errors
///
/// Returns a `ConfigError` if `spec.format` is not a valid template.
pub fn format_name(path: &str, raw_key: &str, spec: &PathSpec) -> Result<String, ConfigError> {
    Ok(NameFormatter::for_path(spec)?.format(path, raw_key))
}
