//! Comparison Engine
//!
//! Reconciles the names a module defines with the names its README documents.

use std::collections::HashSet;

use crate::error::LintError;

/// Outcome of comparing one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonReport {
    pub label: String,
    /// Defined but not documented, in defined order.
    pub missing: Vec<String>,
    /// Documented but not defined, in documented order.
    pub extra: Vec<String>,
}

impl ComparisonReport {
    pub fn new<E, F>(expected: &[E], found: &[F], label: &str) -> Self
    where
        E: AsRef<str>,
        F: AsRef<str>,
    {
        let expected = unique(expected);
        let found = unique(found);

        let expected_set: HashSet<&str> = expected.iter().copied().collect();
        let found_set: HashSet<&str> = found.iter().copied().collect();

        Self {
            label: label.to_string(),
            missing: expected
                .iter()
                .filter(|name| !found_set.contains(*name))
                .map(|name| name.to_string())
                .collect(),
            extra: found
                .iter()
                .filter(|name| !expected_set.contains(*name))
                .map(|name| name.to_string())
                .collect(),
        }
    }

    /// Missing items first, then extras.
    pub fn findings(&self) -> Vec<LintError> {
        let missing = self.missing.iter().map(|item| LintError::Undocumented {
            label: self.label.clone(),
            item: item.clone(),
        });
        let extra = self.extra.iter().map(|item| LintError::Undefined {
            label: self.label.clone(),
            item: item.clone(),
        });
        missing.chain(extra).collect()
    }
}

/// Findings for one category.
pub fn compare<E, F>(expected: &[E], found: &[F], label: &str) -> Vec<LintError>
where
    E: AsRef<str>,
    F: AsRef<str>,
{
    ComparisonReport::new(expected, found, label).findings()
}

fn unique<S: AsRef<str>>(names: &[S]) -> Vec<&str> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| seen.insert(*name))
        .collect()
}
