//! GitHub Actions workflow-command annotations
//!
//! One [`Annotation`] renders as
//! `::<level> file=<path>,line=<n>,title=<title>[,<key>=<value>]*::<message>`.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Annotation severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Notice,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Notice => write!(f, "notice"),
            Level::Error => write!(f, "error"),
        }
    }
}

/// A line-anchored finding for the CI review surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub level: Level,
    /// Repository-relative path with forward slashes
    pub file: String,
    /// 1-indexed
    pub line: usize,
    pub title: String,
    pub message: String,
    /// Extra properties such as `col`
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

impl Annotation {
    pub fn notice(file: &str, line: usize, title: &str, message: String) -> Self {
        Self::new(Level::Notice, file, line, title, message)
    }

    pub fn error(file: &str, line: usize, title: &str, message: String) -> Self {
        Self::new(Level::Error, file, line, title, message)
    }

    fn new(level: Level, file: &str, line: usize, title: &str, message: String) -> Self {
        Self {
            level,
            file: file.to_string(),
            line,
            title: title.to_string(),
            message,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, key: &str, value: impl ToString) -> Self {
        self.fields.insert(key.to_string(), value.to_string());
        self
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "::{} file={},line={},title={}",
            self.level, self.file, self.line, self.title
        )?;
        for (key, value) in &self.fields {
            write!(f, ",{}={}", key, value)?;
        }
        write!(f, "::{}", self.message)
    }
}

/// Control command clearing matchers registered by an earlier run
pub fn remove_matcher(owner: &str) -> String {
    format!("::remove-matcher owner={}::", owner)
}
