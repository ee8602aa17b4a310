//! Common types and errors for SpecLink
//!
//! This crate provides the error type and exit codes shared by every SpecLink component.

pub mod telemetry;

use thiserror::Error;

/// Core error types for SpecLink operations
///
/// Everything in here is fatal for a run. Findings about the fixture corpus
/// (malformed JSON, unsupported citation kinds) are reported as annotations
/// and never reach this enum.
#[derive(Error, Debug)]
pub enum SpecLinkError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("No specification URLs for version '{version}'")]
    UnknownVersion { version: String },

    #[error("Invalid URI template '{template}': {reason}")]
    Template { template: String, reason: String },

    #[error("URI template '{template}' references unknown variable '{variable}'")]
    UnknownVariable { template: String, variable: String },

    #[error("Malformed citation in {path}: {reason}")]
    MalformedCitation { path: String, reason: String },

    #[error("Test case without a description in {path}")]
    MissingDescription { path: String },

    #[error("Unexpected fixture layout in {path}: {source}")]
    InvalidFixture {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SpecLinkError>;

/// Process exit codes
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 101;
