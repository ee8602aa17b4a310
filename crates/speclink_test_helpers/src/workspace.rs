//! Fixture suite setup for tests
//!
//! A suite is a temp directory laid out like a test-suite repository:
//! `tests/<version>/*.json` plus `bin/specification_urls.json`.

use assert_fs::TempDir;
use std::fs;
use std::path::Path;

/// URL file covering two versions and the usual external documents
pub const SAMPLE_URLS: &str = r#"{
    "json-schema": {
        "draft4": {
            "core": "https://json-schema.org/draft-04/draft-zyp-json-schema-04#rfc.section.{section}",
            "validation": "https://json-schema.org/draft-04/draft-fge-json-schema-validation-00#rfc.section.{section}"
        },
        "draft7": {
            "core": "https://json-schema.org/draft-07/json-schema-core#rfc.section.{section}",
            "validation": "https://json-schema.org/draft-07/json-schema-validation#rfc.section.{section}"
        }
    },
    "external": {
        "ecma262": "https://262.ecma-international.org/{section}",
        "perl5": "https://perldoc.perl.org/perlre#{section}",
        "rfc": "https://www.rfc-editor.org/rfc/rfc{spec}.txt#{section}",
        "iso": null
    }
}"#;

/// Create a temporary directory for testing
///
/// The directory will be automatically cleaned up when the `TempDir` is dropped.
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Create an empty suite using the given URL file contents
pub fn suite_with_registry(urls: &str) -> TempDir {
    let temp = temp_dir();
    fs::create_dir_all(temp.path().join("tests")).expect("Failed to create tests directory");
    write_fixture(temp.path(), "bin/specification_urls.json", urls);
    temp
}

/// Create an empty suite using [`SAMPLE_URLS`]
pub fn init_suite() -> TempDir {
    suite_with_registry(SAMPLE_URLS)
}

/// Create a suite with the given `(relative path, content)` files
///
/// # Example
///
/// ```rust
/// use speclink_test_helpers::workspace::suite_with_fixtures;
///
/// let suite = suite_with_fixtures(&[("tests/draft7/type.json", "[]")]);
/// assert!(suite.path().join("tests/draft7/type.json").exists());
/// ```
pub fn suite_with_fixtures(files: &[(&str, &str)]) -> TempDir {
    let suite = init_suite();
    for (relative, content) in files {
        write_fixture(suite.path(), relative, content);
    }
    suite
}

/// Write a file below `root`, creating parent directories
pub fn write_fixture(root: &Path, relative: &str, content: &str) {
    let file_path = root.join(relative);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&file_path, content).expect("Failed to write fixture file");
}
