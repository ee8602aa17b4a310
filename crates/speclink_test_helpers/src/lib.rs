//! Shared test utilities for SpecLink test suites
//!
//! # Modules
//!
//! - [`workspace`]: Temporary fixture suites with a specification URL file
//! - [`cli`]: Command builders with pre-configured environments
//! - [`logging`]: Test logging configuration
//! - [`assertions`]: Predicates over annotation output
//!
//! # Example
//!
//! ```rust,no_run
//! use speclink_test_helpers::prelude::*;
//!
//! let suite = suite_with_fixtures(&[(
//!     "tests/draft7/format.json",
//!     r#"[{"description": "dates", "specification": [{"rfc3339": "5.6"}]}]"#,
//! )]);
//!
//! speclink_command()
//!     .arg("--root")
//!     .arg(suite.path())
//!     .assert()
//!     .success()
//!     .stdout(annotation_for("notice", "tests/draft7/format.json"));
//! ```

pub mod workspace;
pub mod cli;
pub mod logging;
pub mod assertions;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::workspace::{
        init_suite, suite_with_fixtures, suite_with_registry, temp_dir, write_fixture, SAMPLE_URLS,
    };
    pub use crate::cli::speclink_command;
    pub use crate::logging::{init_test_logging, suppress_logs};
    pub use crate::assertions::*;
}
