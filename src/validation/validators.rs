//! Validators
//!
//! Each validator checks one concern and returns its findings; nothing here
//! stops at the first discrepancy.

use std::path::PathBuf;

use super::collector::ErrorCollector;
use super::engine::compare;
use crate::definitions::{BlockKind, DefinitionIndex};
use crate::document::DocumentIndex;
use crate::error::LintError;

/// A single documentation check.
pub trait Validator {
    /// Short name used in logs.
    fn name(&self) -> &str;

    fn validate(&self) -> Vec<LintError>;
}

/// Checks that the blocks of one kind in one file are documented under one
/// of the accepted sections, and nothing else is.
#[derive(Debug)]
pub struct ItemValidator<'a> {
    document: &'a DocumentIndex,
    definitions: &'a DefinitionIndex,
    label: String,
    kind: BlockKind,
    sections: Vec<String>,
    file_name: String,
}

impl<'a> ItemValidator<'a> {
    pub fn new(
        document: &'a DocumentIndex,
        definitions: &'a DefinitionIndex,
        label: impl Into<String>,
        kind: BlockKind,
        sections: Vec<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            document,
            definitions,
            label: label.into(),
            kind,
            sections,
            file_name: file_name.into(),
        }
    }

    /// Variables from `variables.tf`, documented under `sections`.
    pub fn variables(
        document: &'a DocumentIndex,
        definitions: &'a DefinitionIndex,
        sections: Vec<String>,
    ) -> Self {
        Self::new(document, definitions, "Variables", BlockKind::Variable, sections, "variables.tf")
    }

    /// Outputs from `outputs.tf`, documented under `sections`.
    pub fn outputs(
        document: &'a DocumentIndex,
        definitions: &'a DefinitionIndex,
        sections: Vec<String>,
    ) -> Self {
        Self::new(document, definitions, "Outputs", BlockKind::Output, sections, "outputs.tf")
    }
}

impl Validator for ItemValidator<'_> {
    fn name(&self) -> &str {
        &self.label
    }

    fn validate(&self) -> Vec<LintError> {
        let path = self.definitions.workspace().join(&self.file_name);
        let defined = match self.definitions.extract_items(&path, self.kind) {
            Ok(items) => items,
            Err(e) => return vec![e],
        };

        let section_present = self.sections.iter().any(|s| self.document.has_section(s));
        let documented = self.document.extract_section_items(&self.sections);

        // Optional sections may be left out entirely.
        if !section_present && documented.is_empty() {
            return Vec::new();
        }

        compare(&defined, &documented, &self.label)
    }
}

/// Checks resources and data sources against the README's resource links.
#[derive(Debug)]
pub struct DefinitionsValidator<'a> {
    document: &'a DocumentIndex,
    definitions: &'a DefinitionIndex,
    sections: Vec<String>,
}

impl<'a> DefinitionsValidator<'a> {
    pub fn new(
        document: &'a DocumentIndex,
        definitions: &'a DefinitionIndex,
        sections: Vec<String>,
    ) -> Self {
        Self {
            document,
            definitions,
            sections,
        }
    }
}

impl Validator for DefinitionsValidator<'_> {
    fn name(&self) -> &str {
        "Resources"
    }

    fn validate(&self) -> Vec<LintError> {
        let (resources, data_sources) = match self.definitions.extract_definitions_and_lookups() {
            Ok(found) => found,
            Err(e) => return vec![e],
        };

        let (documented, section_error) =
            self.document.extract_definitions_and_lookups_in(&self.sections);

        let mut collector = ErrorCollector::new();
        if !resources.is_empty() || !data_sources.is_empty() {
            collector.add(section_error);
        }

        let section_present = self.sections.iter().any(|s| self.document.has_section(s));
        if section_present || !documented.is_empty() {
            collector.add_many(compare(&resources, &documented.resources, "Resources"));
            collector.add_many(compare(&data_sources, &documented.data_sources, "Data Sources"));
        }

        collector.into_errors()
    }
}

/// Checks that required level-2 sections exist.
#[derive(Debug)]
pub struct SectionValidator<'a> {
    document: &'a DocumentIndex,
    required: Vec<String>,
}

impl<'a> SectionValidator<'a> {
    pub fn new(document: &'a DocumentIndex, required: Vec<String>) -> Self {
        Self { document, required }
    }
}

impl Validator for SectionValidator<'_> {
    fn name(&self) -> &str {
        "Sections"
    }

    fn validate(&self) -> Vec<LintError> {
        self.required
            .iter()
            .filter(|section| !self.document.has_section(section))
            .map(|section| LintError::MissingSection(section.clone()))
            .collect()
    }
}

/// Checks that required files exist relative to the module directory.
#[derive(Debug)]
pub struct FileValidator {
    root: PathBuf,
    files: Vec<String>,
}

impl FileValidator {
    pub fn new(root: impl Into<PathBuf>, files: Vec<String>) -> Self {
        Self {
            root: root.into(),
            files,
        }
    }
}

impl Validator for FileValidator {
    fn name(&self) -> &str {
        "Files"
    }

    fn validate(&self) -> Vec<LintError> {
        self.files
            .iter()
            .filter(|file| !self.root.join(file).is_file())
            .map(|file| LintError::MissingFile(file.clone()))
            .collect()
    }
}
