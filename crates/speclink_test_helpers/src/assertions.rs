//! Predicates over workflow-command output

use predicates::prelude::*;
use predicates::str::contains;

/// Output contains an annotation of `level` for `file`
///
/// # Example
/// ```rust
/// use speclink_test_helpers::assertions::annotation_for;
/// use predicates::prelude::*;
///
/// let out = "::notice file=tests/draft7/a.json,line=3,title=Specification Link::https://x\n";
/// assert!(annotation_for("notice", "tests/draft7/a.json").eval(out));
/// ```
pub fn annotation_for(level: &str, file: &str) -> impl Predicate<str> {
    contains(format!("::{} file={},", level, file))
}

/// Number of annotation lines of `level` equals `expected`
pub fn annotation_count(level: &str, expected: usize) -> impl Predicate<str> {
    let prefix = format!("::{} file=", level);
    predicate::function(move |s: &str| {
        s.lines().filter(|line| line.starts_with(&prefix)).count() == expected
    })
}

/// No annotation references a file below `prefix`
pub fn no_annotations_under(prefix: &str) -> impl Predicate<str> {
    let needle = format!(" file={}", prefix);
    predicate::function(move |s: &str| !s.lines().any(|line| line.contains(&needle)))
}

/// First line is the `remove-matcher` control command
pub fn starts_with_remove_matcher() -> impl Predicate<str> {
    predicate::str::starts_with("::remove-matcher owner=")
}

/// Assert that stderr does NOT contain any of the given strings
pub fn stderr_not_contains(values: &[&str]) -> impl Predicate<str> {
    let owned_values: Vec<String> = values.iter().map(|&s| s.to_string()).collect();
    predicate::function(move |s: &str| !owned_values.iter().any(|v| s.contains(v.as_str())))
}
