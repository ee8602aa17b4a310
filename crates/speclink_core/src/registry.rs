//! Specification URL templates
//!
//! The URL file holds one template table per JSON Schema version under
//! `json-schema` and a shared `external` table for RFCs, ISO standards and
//! other documents. A [`Registry`] is the merged, parsed view for one version.

use crate::template::UriTemplate;
use serde::Deserialize;
use speclink_common::{Result, SpecLinkError};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Raw template table; `null` marks a kind without a linkable document
type TemplateTable = BTreeMap<String, Option<String>>;

/// Contents of the specification URL file
#[derive(Debug, Clone, Deserialize)]
pub struct SpecificationUrls {
    #[serde(rename = "json-schema")]
    versions: BTreeMap<String, TemplateTable>,

    #[serde(default)]
    external: TemplateTable,
}

impl SpecificationUrls {
    /// Load the URL file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let display = path.to_string_lossy().replace('\\', "/");
        if !path.exists() {
            return Err(SpecLinkError::FileNotFound { path: display });
        }

        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            SpecLinkError::ConfigError(format!("Failed to parse {}: {}", display, e))
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the registry for one version
    ///
    /// External entries are merged last and win on collision.
    #[tracing::instrument(skip(self))]
    pub fn registry_for(&self, version: &str) -> Result<Registry> {
        let own = self
            .versions
            .get(version)
            .ok_or_else(|| SpecLinkError::UnknownVersion {
                version: version.to_string(),
            })?;

        let mut templates = HashMap::with_capacity(own.len() + self.external.len());
        for (kind, template) in own.iter().chain(self.external.iter()) {
            let parsed = template.as_deref().map(UriTemplate::parse).transpose()?;
            templates.insert(kind.clone(), parsed);
        }

        tracing::debug!("Loaded {} templates for {}", templates.len(), version);
        Ok(Registry {
            version: version.to_string(),
            templates,
        })
    }
}

/// Immutable kind → template mapping for one version
#[derive(Debug, Clone)]
pub struct Registry {
    version: String,
    templates: HashMap<String, Option<UriTemplate>>,
}

impl Registry {
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Template for `kind`, if the kind is known and has a URL
    pub fn template(&self, kind: &str) -> Option<&UriTemplate> {
        self.templates.get(kind).and_then(Option::as_ref)
    }
}
