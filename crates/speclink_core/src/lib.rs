//! Core engine for SpecLink
//!
//! This crate turns specification citations in JSON fixture files into
//! line-anchored annotations: URI template expansion, per-version template
//! registries, citation parsing, source line lookup and suite traversal.

pub mod annotation;
pub mod citation;
pub mod locator;
pub mod registry;
pub mod scan;
pub mod template;

pub use annotation::{Annotation, Level};
pub use citation::{decompose, Citation, Resolution};
pub use registry::{Registry, SpecificationUrls};
pub use scan::{scan_suite, ScanReport, ScanStats};
pub use speclink_common::{Result, SpecLinkError};
pub use template::UriTemplate;
