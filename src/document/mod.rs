//! README Document
//!
//! Markdown parsing into a node arena and the section/item index built on it.

pub mod arena;
pub mod index;

pub use arena::{Arena, HeadingSpan, Node, NodeKind};
pub use index::{AnchorCategory, DocumentIndex, DocumentItem, DocumentedDefinitions};
