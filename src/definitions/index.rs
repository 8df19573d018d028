//! Definition Index
//!
//! Parses HCL files with `hcl-edit` and lists the top-level blocks of a
//! requested kind. Only block headers are inspected; bodies are never
//! evaluated.

use std::path::{Path, PathBuf};

use hcl_edit::structure::{Block, BlockLabel};

use super::reader::{FileReader, FsReader};
use crate::error::LintError;

/// Extension of the files scanned when walking a module directory.
const HCL_EXTENSION: &str = "tf";

/// Kinds of top-level blocks the linter cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// `resource "type" "name"`
    Resource,
    /// `data "type" "name"`
    DataSource,
    /// `variable "name"`
    Variable,
    /// `output "name"`
    Output,
}

impl BlockKind {
    /// HCL block identifier for this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            BlockKind::Resource => "resource",
            BlockKind::DataSource => "data",
            BlockKind::Variable => "variable",
            BlockKind::Output => "output",
        }
    }

    /// Number of labels a well-formed block of this kind carries.
    pub fn label_count(self) -> usize {
        match self {
            BlockKind::Resource | BlockKind::DataSource => 2,
            BlockKind::Variable | BlockKind::Output => 1,
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "resource" => Some(BlockKind::Resource),
            "data" => Some(BlockKind::DataSource),
            "variable" => Some(BlockKind::Variable),
            "output" => Some(BlockKind::Output),
            _ => None,
        }
    }
}

/// A declared block instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionItem {
    pub kind: BlockKind,
    /// Resource or data source type; `None` for variables and outputs.
    pub type_name: Option<String>,
    pub instance_name: String,
}

impl DefinitionItem {
    /// `type.name` for resources and data sources, the bare name otherwise.
    pub fn qualified_name(&self) -> String {
        match &self.type_name {
            Some(type_name) => format!("{}.{}", type_name, self.instance_name),
            None => self.instance_name.clone(),
        }
    }

    /// Names under which documentation may reference this item.
    ///
    /// Typed blocks contribute the bare type and the qualified name.
    pub fn canonical_names(&self) -> Vec<String> {
        match &self.type_name {
            Some(type_name) => vec![type_name.clone(), self.qualified_name()],
            None => vec![self.instance_name.clone()],
        }
    }
}

/// Extracts declared blocks from the HCL files of one module directory.
pub struct DefinitionIndex {
    workspace: PathBuf,
    reader: Box<dyn FileReader>,
}

impl std::fmt::Debug for DefinitionIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefinitionIndex")
            .field("workspace", &self.workspace)
            .finish_non_exhaustive()
    }
}

impl DefinitionIndex {
    /// Index rooted at `workspace`, reading from disk.
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self::with_reader(workspace, Box::new(FsReader))
    }

    pub fn with_reader(workspace: impl Into<PathBuf>, reader: Box<dyn FileReader>) -> Self {
        Self {
            workspace: workspace.into(),
            reader,
        }
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Names of all `kind` blocks in `path`, in declaration order.
    ///
    /// A missing file yields an empty list.
    pub fn extract_items(&self, path: &Path, kind: BlockKind) -> Result<Vec<String>, LintError> {
        Ok(self
            .extract_blocks(path, &[kind])?
            .into_iter()
            .map(|item| item.instance_name)
            .collect())
    }

    /// Resource and data source names of every module-level `.tf` file.
    ///
    /// Each block contributes its type and its `type.name` form. A missing
    /// module directory yields empty lists.
    pub fn extract_definitions_and_lookups(&self) -> Result<(Vec<String>, Vec<String>), LintError> {
        let mut resources = Vec::new();
        let mut data_sources = Vec::new();

        for path in self.module_files()? {
            let items = self.extract_blocks(&path, &[BlockKind::Resource, BlockKind::DataSource])?;
            for item in items {
                match item.kind {
                    BlockKind::Resource => resources.extend(item.canonical_names()),
                    BlockKind::DataSource => data_sources.extend(item.canonical_names()),
                    BlockKind::Variable | BlockKind::Output => {}
                }
            }
        }

        Ok((resources, data_sources))
    }

    /// Top-level blocks of the given kinds declared in `path`.
    pub fn extract_blocks(
        &self,
        path: &Path,
        kinds: &[BlockKind],
    ) -> Result<Vec<DefinitionItem>, LintError> {
        let Some(content) = self.read(path)? else {
            return Ok(Vec::new());
        };

        let file = file_label(path);
        let body = hcl_edit::parser::parse_body(&content).map_err(|e| LintError::Parse {
            file: file.clone(),
            message: e.to_string(),
        })?;

        let mut items = Vec::new();
        for block in body.blocks() {
            let Some(kind) = BlockKind::from_keyword(block.ident.value().as_str()) else {
                continue;
            };
            if !kinds.contains(&kind) {
                continue;
            }
            items.push(item_from_block(kind, block, &file)?);
        }

        Ok(items)
    }

    fn read(&self, path: &Path) -> Result<Option<String>, LintError> {
        match self.reader.read_file(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(LintError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// `.tf` files directly inside the workspace, sorted by name.
    fn module_files(&self) -> Result<Vec<PathBuf>, LintError> {
        let entries = match self.reader.list_files(&self.workspace) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("module directory {} not found", self.workspace.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(LintError::Io {
                    path: self.workspace.clone(),
                    source,
                });
            }
        };

        let mut files: Vec<PathBuf> = entries
            .into_iter()
            .filter(|path| {
                let is_hcl =
                    path.extension().and_then(|ext| ext.to_str()) == Some(HCL_EXTENSION);
                if !is_hcl {
                    log::debug!("skipping non-HCL file {}", path.display());
                }
                is_hcl
            })
            .collect();

        files.sort();
        Ok(files)
    }
}

fn item_from_block(
    kind: BlockKind,
    block: &Block,
    file: &str,
) -> Result<DefinitionItem, LintError> {
    if block.labels.len() != kind.label_count() {
        return Err(LintError::Parse {
            file: file.to_string(),
            message: format!(
                "block `{}` expects {} label(s), found {}",
                kind.keyword(),
                kind.label_count(),
                block.labels.len()
            ),
        });
    }

    let labels: Vec<String> = block.labels.iter().map(label_text).collect();
    let item = match kind {
        BlockKind::Resource | BlockKind::DataSource => DefinitionItem {
            kind,
            type_name: Some(labels[0].clone()),
            instance_name: labels[1].clone(),
        },
        BlockKind::Variable | BlockKind::Output => DefinitionItem {
            kind,
            type_name: None,
            instance_name: labels[0].clone(),
        },
    };
    Ok(item)
}

fn label_text(label: &BlockLabel) -> String {
    match label {
        BlockLabel::String(literal) => literal.value().trim().to_string(),
        BlockLabel::Ident(ident) => ident.value().as_str().trim().to_string(),
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
