//! README Validator
//!
//! Runs every check for one module against its README.

use std::path::Path;

use super::collector::ErrorCollector;
use super::validators::{
    DefinitionsValidator, FileValidator, ItemValidator, SectionValidator, Validator,
};
use crate::config::Config;
use crate::definitions::DefinitionIndex;
use crate::document::DocumentIndex;
use crate::error::LintError;

/// Validates one module's README against its HCL files.
#[derive(Debug)]
pub struct ReadmeValidator {
    config: Config,
    document: DocumentIndex,
    definitions: DefinitionIndex,
}

impl ReadmeValidator {
    /// Reads and indexes the README named by `config`.
    pub fn new(config: Config) -> Result<Self, LintError> {
        let content = read_readme(&config.readme_path)?;
        let document = DocumentIndex::new(content, &config.provider_prefixes);
        let definitions = DefinitionIndex::new(&config.module_path);

        Ok(Self {
            config,
            document,
            definitions,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn document(&self) -> &DocumentIndex {
        &self.document
    }

    /// All findings, grouped by validator in a fixed order.
    pub fn validate(&self) -> Vec<LintError> {
        let validators: Vec<Box<dyn Validator + '_>> = vec![
            Box::new(FileValidator::new(
                &self.config.module_path,
                self.config.additional_files.clone(),
            )),
            Box::new(SectionValidator::new(
                &self.document,
                self.config.additional_sections.clone(),
            )),
            Box::new(DefinitionsValidator::new(
                &self.document,
                &self.definitions,
                self.config.resource_sections.clone(),
            )),
            Box::new(ItemValidator::variables(
                &self.document,
                &self.definitions,
                self.config.input_sections.clone(),
            )),
            Box::new(ItemValidator::outputs(
                &self.document,
                &self.definitions,
                self.config.output_sections.clone(),
            )),
        ];

        let mut collector = ErrorCollector::new();
        for validator in &validators {
            let errors = validator.validate();
            log::debug!("{} check produced {} finding(s)", validator.name(), errors.len());
            collector.add_many(errors);
        }
        collector.into_errors()
    }
}

fn read_readme(path: &Path) -> Result<String, LintError> {
    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LintError::NotFound(format!("README file not found: {}", path.display()))
        } else {
            LintError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}
