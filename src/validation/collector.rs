//! Error Collector
//!
//! Accumulates findings from several validators, ignoring empty slots.

use crate::error::LintError;

#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<LintError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `error` when present.
    pub fn add(&mut self, error: Option<LintError>) {
        if let Some(error) = error {
            self.errors.push(error);
        }
    }

    pub fn add_many(&mut self, errors: impl IntoIterator<Item = LintError>) {
        self.errors.extend(errors);
    }

    pub fn errors(&self) -> &[LintError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<LintError> {
        self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
