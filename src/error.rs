//! Error taxonomy shared by extraction and validation.
//!
//! Extraction failures and comparison findings travel through the same type so
//! that validators can hand back a single flat list.

use std::path::PathBuf;

use thiserror::Error;

/// Everything a validation pass can report.
#[derive(Debug, Error)]
pub enum LintError {
    /// A referenced file or section is absent.
    #[error("{0}")]
    NotFound(String),

    /// Malformed HCL content in a module file.
    #[error("error parsing HCL in {file}: {message}")]
    Parse { file: String, message: String },

    /// A file exists but could not be read.
    #[error("error reading file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Defined in the module, absent from the documentation.
    #[error("{label} item {item} is not documented")]
    Undocumented { label: String, item: String },

    /// Present in the documentation, not defined in the module.
    #[error("{label} item {item} is documented but not defined")]
    Undefined { label: String, item: String },

    #[error("required section {0} is missing")]
    MissingSection(String),

    #[error("required file {0} is missing")]
    MissingFile(String),

    #[error("invalid configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl LintError {
    /// Documentation discrepancies, as opposed to failures to run a check
    /// (unreadable or malformed files, bad configuration).
    pub fn is_finding(&self) -> bool {
        matches!(
            self,
            LintError::NotFound(_)
                | LintError::Undocumented { .. }
                | LintError::Undefined { .. }
                | LintError::MissingSection(_)
                | LintError::MissingFile(_)
        )
    }

    pub(crate) fn resources_section_missing() -> Self {
        LintError::NotFound("resources section not found or empty".to_string())
    }
}
