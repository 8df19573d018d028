//! Module Definitions
//!
//! Extraction of declared blocks (resources, data sources, variables,
//! outputs) from a module's HCL files.

pub mod index;
pub mod reader;

pub use index::{BlockKind, DefinitionIndex, DefinitionItem};
pub use reader::{FileReader, FsReader};
