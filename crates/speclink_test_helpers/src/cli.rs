//! CLI command builders for tests

use assert_cmd::Command;

/// Get a Command for the `speclink` binary with clean environment
///
/// `RUST_LOG=error` keeps INFO/DEBUG logs out of captured stderr.
#[allow(deprecated)]
pub fn speclink_command() -> Command {
    let mut cmd = Command::cargo_bin("speclink").expect("Failed to find speclink binary");
    cmd.env("RUST_LOG", "error");
    cmd
}
