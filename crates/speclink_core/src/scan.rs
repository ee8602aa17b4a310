//! Fixture suite traversal
//!
//! Walks `<root>/<tests_dir>/<version>/**/*.json` in file-name order and turns
//! every citation into an annotation. Malformed JSON and unsupported citation
//! kinds are findings; everything else that goes wrong aborts the scan.

use crate::annotation::{remove_matcher, Annotation};
use crate::citation::{Citation, Resolution};
use crate::locator::line_number_of;
use crate::registry::{Registry, SpecificationUrls};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use speclink_common::{Result, SpecLinkError};
use speclink_config::Config;
use std::fs;
use std::io::Write;
use std::path::Path;
use walkdir::WalkDir;

pub const LINK_TITLE: &str = "Specification Link";
pub const INVALID_JSON_TITLE: &str = "Invalid JSON";

/// Counters for one run
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub versions_scanned: usize,
    pub versions_skipped: usize,
    pub files_scanned: usize,
    pub malformed_files: usize,
    pub citations_linked: usize,
    pub citations_unsupported: usize,
}

/// Everything a run produced, in traversal order
#[derive(Debug, Default, Serialize)]
pub struct ScanReport {
    pub annotations: Vec<Annotation>,
    pub stats: ScanStats,
}

impl ScanReport {
    /// Write the `remove-matcher` command followed by one command per annotation
    pub fn write_commands<W: Write>(&self, out: &mut W, owner: &str) -> std::io::Result<()> {
        writeln!(out, "{}", remove_matcher(owner))?;
        for annotation in &self.annotations {
            writeln!(out, "{}", annotation)?;
        }
        Ok(())
    }

    pub fn has_errors(&self) -> bool {
        self.stats.malformed_files > 0 || self.stats.citations_unsupported > 0
    }
}

/// The parts of a test case this tool reads
#[derive(Debug, Deserialize)]
struct TestCase {
    description: Option<String>,
    /// `None` only when the field is absent; a present `null` is rejected
    #[serde(default, deserialize_with = "present_citations")]
    specification: Option<Vec<Value>>,
}

fn present_citations<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<Value>::deserialize(deserializer).map(Some)
}

/// Scan every non-excluded version directory under the configured tests dir
#[tracing::instrument(skip_all, fields(root = ?config.root))]
pub fn scan_suite(config: &Config, urls: &SpecificationUrls) -> Result<ScanReport> {
    let tests = config.tests_path();
    if !tests.is_dir() {
        return Err(SpecLinkError::FileNotFound {
            path: display_path(&tests),
        });
    }

    let mut report = ScanReport::default();

    for entry in WalkDir::new(&tests)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let version = entry.file_name().to_string_lossy().to_string();
        if config.is_excluded(&version) {
            tracing::debug!("Skipping excluded version {}", version);
            report.stats.versions_skipped += 1;
            continue;
        }

        let registry = urls.registry_for(&version)?;
        scan_version(&config.root, entry.path(), &registry, &mut report)?;
        report.stats.versions_scanned += 1;
    }

    tracing::info!(
        "Scanned {} files in {} versions: {} links, {} unsupported, {} malformed",
        report.stats.files_scanned,
        report.stats.versions_scanned,
        report.stats.citations_linked,
        report.stats.citations_unsupported,
        report.stats.malformed_files
    );
    Ok(report)
}

#[tracing::instrument(skip(root, registry, report), fields(version = registry.version()))]
fn scan_version(
    root: &Path,
    dir: &Path,
    registry: &Registry,
    report: &mut ScanReport,
) -> Result<()> {
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|e| e == "json") {
            scan_file(root, entry.path(), registry, report)?;
        }
    }
    Ok(())
}

/// Annotate one fixture file
pub fn scan_file(
    root: &Path,
    path: &Path,
    registry: &Registry,
    report: &mut ScanReport,
) -> Result<()> {
    let file = display_path(path.strip_prefix(root).unwrap_or(path));
    tracing::debug!("Scanning {}", file);
    report.stats.files_scanned += 1;

    let source = fs::read_to_string(path)?;
    let value: Value = match serde_json::from_str(&source) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Invalid JSON in {}: {}", file, e);
            report.stats.malformed_files += 1;
            report.annotations.push(
                Annotation::error(&file, e.line().max(1), INVALID_JSON_TITLE, parser_message(&e))
                    .with_field("col", e.column().max(1)),
            );
            return Ok(());
        }
    };

    let cases: Vec<TestCase> =
        serde_json::from_value(value).map_err(|source| SpecLinkError::InvalidFixture {
            path: file.clone(),
            source,
        })?;

    for case in cases {
        let Some(specification) = case.specification else {
            continue;
        };
        let description = case
            .description
            .ok_or_else(|| SpecLinkError::MissingDescription { path: file.clone() })?;
        let line = line_number_of(&source, &description);

        for raw in &specification {
            let citation = Citation::from_value(raw, &file)?;
            match citation.resolve(registry)? {
                Resolution::Linked { url, message } => {
                    tracing::debug!("{}:{} -> {}", file, line, url);
                    report.stats.citations_linked += 1;
                    report
                        .annotations
                        .push(Annotation::notice(&file, line, LINK_TITLE, message));
                }
                Resolution::Unsupported { kind } => {
                    tracing::warn!("{}:{} unsupported template '{}'", file, line, kind);
                    report.stats.citations_unsupported += 1;
                    report.annotations.push(Annotation::error(
                        &file,
                        line,
                        &format!("Unsupported template '{}'", kind),
                        format!(
                            "The key '{}' has no URL template for {}. Add one to the specification URL file.",
                            kind,
                            registry.version()
                        ),
                    ));
                }
            }
        }
    }

    Ok(())
}

/// Parser text without the trailing position, which the annotation carries as fields
fn parser_message(error: &serde_json::Error) -> String {
    let text = error.to_string();
    let position = format!(" at line {} column {}", error.line(), error.column());
    match text.strip_suffix(&position) {
        Some(message) => message.to_string(),
        None => text,
    }
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
