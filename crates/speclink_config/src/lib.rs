//! Configuration management for SpecLink
//!
//! This crate handles loading `.speclink.toml` from the repository root.
//! Every field has a default, so a repository without the file scans
//! `tests/` against `bin/specification_urls.json`.

use serde::{Deserialize, Serialize};
use speclink_common::{Result, SpecLinkError};
use std::path::{Path, PathBuf};

/// File name looked up in the repository root
pub const CONFIG_FILE: &str = ".speclink.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Repository root (set programmatically, not in TOML)
    #[serde(skip)]
    pub root: PathBuf,

    /// Fixture suite layout
    #[serde(default)]
    pub suite: SuiteConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Suite configuration ([suite])
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Directory holding one subdirectory per specification version
    #[serde(default = "default_tests_dir")]
    pub tests_dir: PathBuf,

    /// Specification URL templates, relative to the root
    #[serde(default = "default_registry")]
    pub registry: PathBuf,

    /// Version directories that are never checked for citations
    #[serde(default = "default_excluded_versions")]
    pub excluded_versions: Vec<String>,
}

fn default_tests_dir() -> PathBuf {
    PathBuf::from("tests")
}
fn default_registry() -> PathBuf {
    PathBuf::from("bin/specification_urls.json")
}
fn default_excluded_versions() -> Vec<String> {
    vec!["draft-next".to_string(), "latest".to_string()]
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            tests_dir: default_tests_dir(),
            registry: default_registry(),
            excluded_versions: default_excluded_versions(),
        }
    }
}

/// Output configuration ([output])
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Owner named in the `remove-matcher` command emitted before any annotation
    #[serde(default = "default_matcher_owner")]
    pub matcher_owner: String,
}

fn default_matcher_owner() -> String {
    "me".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            matcher_owner: default_matcher_owner(),
        }
    }
}

impl Config {
    /// Default configuration rooted at `root`
    pub fn with_root(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            suite: SuiteConfig::default(),
            output: OutputConfig::default(),
        }
    }

    /// Load configuration from the repository root
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Ok(Self::with_root(root));
        }

        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| SpecLinkError::ConfigError(format!("Failed to read config: {}", e)))?;

        let mut config: Config = toml::from_str(&content)
            .map_err(|e| SpecLinkError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.root = root.to_path_buf();
        Ok(config)
    }

    /// Absolute path of the version directories' parent
    pub fn tests_path(&self) -> PathBuf {
        self.root.join(&self.suite.tests_dir)
    }

    /// Absolute path of the specification URL file
    pub fn registry_path(&self) -> PathBuf {
        self.root.join(&self.suite.registry)
    }

    pub fn is_excluded(&self, version: &str) -> bool {
        self.suite.excluded_versions.iter().any(|v| v == version)
    }
}
