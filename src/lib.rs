//! Module Documentation Linter
//!
//! Cross-checks an infrastructure module's HCL definitions against its README.
//!
//! This library provides:
//! - Extraction of resources, data sources, variables and outputs from HCL
//! - README indexing with tolerant section lookup and inline anchors
//! - Comparison of both sides into missing/extra findings
//! - Configuration management

pub mod config;
pub mod definitions;
pub mod document;
pub mod error;
pub mod fuzzy;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use definitions::{BlockKind, DefinitionIndex};
pub use document::DocumentIndex;
pub use error::LintError;
pub use validation::{compare, ReadmeValidator, Validator};
