//! Validation
//!
//! Comparison of defined and documented items, the per-concern validators and
//! the README-level orchestration that merges their findings.

pub mod collector;
pub mod engine;
pub mod readme;
pub mod validators;

pub use collector::ErrorCollector;
pub use engine::{compare, ComparisonReport};
pub use readme::ReadmeValidator;
pub use validators::{
    DefinitionsValidator, FileValidator, ItemValidator, SectionValidator, Validator,
};
