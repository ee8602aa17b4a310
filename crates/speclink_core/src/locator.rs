//! Best-effort source line lookup
//!
//! Fixtures are parsed with `serde_json`, which keeps no spans, so a test case
//! is anchored to the first raw line containing its description. Repeated or
//! overlapping descriptions can anchor to the wrong line; the review UI only
//! uses the line as a hint.

/// 1-based line of the first line of `source` containing `description`, or 1
pub fn line_number_of(source: &str, description: &str) -> usize {
    source
        .lines()
        .position(|line| line.contains(description))
        .map(|i| i + 1)
        .unwrap_or(1)
}
