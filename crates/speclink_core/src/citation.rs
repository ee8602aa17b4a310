//! Specification citations attached to test cases
//!
//! On disk a citation is a one-key object such as `{"rfc3339": "5.6"}`,
//! optionally carrying a `quote` next to it. It is parsed into an explicit
//! [`Citation`] record and malformed shapes are rejected with a typed error.

use crate::registry::Registry;
use regex::Regex;
use serde_json::Value;
use speclink_common::{Result, SpecLinkError};
use std::sync::OnceLock;

static DIGITS: OnceLock<Regex> = OnceLock::new();

/// One reference from a test case to a section of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    /// Citation key, e.g. `core`, `rfc3339`, `ecma262`
    pub key: String,
    pub section: String,
    /// Quoted text, empty when absent
    pub quote: String,
}

/// Outcome of resolving a citation against a registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Linked { url: String, message: String },
    Unsupported { kind: String },
}

impl Citation {
    /// Parse one element of a test case's `specification` array
    ///
    /// `path` only feeds the error message.
    pub fn from_value(value: &Value, path: &str) -> Result<Self> {
        let malformed = |reason: String| SpecLinkError::MalformedCitation {
            path: path.to_string(),
            reason,
        };

        let object = value
            .as_object()
            .ok_or_else(|| malformed(format!("expected an object, found {}", value)))?;

        let quote = match object.get("quote") {
            None => String::new(),
            Some(Value::String(q)) => q.clone(),
            Some(other) => return Err(malformed(format!("'quote' must be a string, found {}", other))),
        };

        let mut entries = object.iter().filter(|(k, _)| k.as_str() != "quote");
        let (key, section) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            (None, _) => return Err(malformed("no citation key".to_string())),
            (Some(_), Some(_)) => {
                let keys: Vec<&str> = object
                    .keys()
                    .map(String::as_str)
                    .filter(|k| *k != "quote")
                    .collect();
                return Err(malformed(format!(
                    "expected exactly one citation key, found {}",
                    keys.join(", ")
                )));
            }
        };

        let section = match section {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            other => {
                return Err(malformed(format!(
                    "section for '{}' must be a string, found {}",
                    key, other
                )))
            }
        };

        Ok(Self {
            key: key.clone(),
            section,
            quote,
        })
    }

    /// Template kind and document number for this citation's key
    pub fn kind_and_spec(&self) -> (&str, &str) {
        decompose(&self.key)
    }

    /// Expand this citation's URL from the registry
    ///
    /// An unknown kind is a finding, not an error. Errors come from
    /// templates that reference variables other than `spec` and `section`.
    pub fn resolve(&self, registry: &Registry) -> Result<Resolution> {
        let (kind, spec) = self.kind_and_spec();

        let Some(template) = registry.template(kind) else {
            return Ok(Resolution::Unsupported {
                kind: kind.to_string(),
            });
        };

        let url = template.expand(&[("spec", spec), ("section", self.section.as_str())])?;
        let message = link_message(&url, &self.quote);
        Ok(Resolution::Linked { url, message })
    }
}

/// Split a citation key into `(kind, spec)`
///
/// Only the `rfc` and `iso` families are numbered; any other key is its own
/// kind. For numbered keys `spec` is the first run of digits and `kind` is
/// the key with that run stripped from the end. Digits that are not a
/// trailing suffix stay in `kind`.
pub fn decompose(key: &str) -> (&str, &str) {
    if !(key.starts_with("rfc") || key.starts_with("iso")) {
        return (key, "");
    }

    let digits = DIGITS.get_or_init(|| Regex::new(r"[0-9]+").expect("static regex"));
    let spec = digits.find(key).map(|m| m.as_str()).unwrap_or("");
    let kind = key.strip_suffix(spec).unwrap_or(key);
    (kind, spec)
}

/// Annotation body for a resolved citation
pub fn link_message(url: &str, quote: &str) -> String {
    if quote.is_empty() {
        url.to_string()
    } else {
        format!("{}\n\n{}", url, quote)
    }
}
