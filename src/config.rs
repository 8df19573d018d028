//! Configuration management for the module documentation linter.
//!
//! Handles:
//! - Command-line argument parsing
//! - Layered TOML configuration: user-global < project < command line
//! - Module directory discovery (`GITHUB_WORKSPACE`, then the working directory)

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::LintError;

/// Project configuration file looked up in the module directory.
pub const PROJECT_CONFIG_FILE: &str = ".moddoc.toml";

/// Provider prefixes used when nothing is configured.
pub const DEFAULT_PROVIDER_PREFIXES: &[&str] =
    &["azurerm_", "random_", "tls_", "azuread_", "aws_", "google_"];

/// Command-line arguments for the linter
#[derive(Debug, Default, Parser)]
#[command(name = "moddoc")]
#[command(about = "Checks that a module README documents its resources, variables and outputs")]
#[command(version)]
pub struct Args {
    /// Module directory to check
    #[arg(
        long,
        help = "Module directory (defaults to $GITHUB_WORKSPACE or the current directory)"
    )]
    pub module: Option<PathBuf>,

    /// README to check
    #[arg(long, help = "README path (defaults to README.md inside the module)")]
    pub readme: Option<PathBuf>,

    #[arg(
        long = "provider-prefix",
        help = "Provider prefix marking resource links (repeatable, e.g. 'azurerm_')"
    )]
    pub provider_prefixes: Vec<String>,

    #[arg(long = "section", help = "Additional required README section (repeatable)")]
    pub sections: Vec<String>,

    #[arg(long = "file", help = "Additional required module file (repeatable)")]
    pub files: Vec<String>,

    /// Explicit configuration file, replacing the project file lookup
    #[arg(long, help = "Configuration file (defaults to .moddoc.toml in the module)")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// How findings are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Accepted section names per category.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SectionNames {
    pub resources: Vec<String>,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

/// Contents of a TOML configuration file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileConfig {
    pub provider_prefixes: Vec<String>,
    pub additional_sections: Vec<String>,
    pub additional_files: Vec<String>,
    pub sections: SectionNames,
}

impl FileConfig {
    /// Load `path`; `Ok(None)` when it does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", path.display()));
            }
        };

        let parsed = toml::from_str::<FileConfig>(&raw).map_err(|e| LintError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Some(parsed))
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub module_path: PathBuf,
    pub readme_path: PathBuf,
    pub provider_prefixes: Vec<String>,
    /// Sections that must exist besides the compared ones
    pub additional_sections: Vec<String>,
    /// Files that must exist in the module
    pub additional_files: Vec<String>,
    pub resource_sections: Vec<String>,
    pub input_sections: Vec<String>,
    pub output_sections: Vec<String>,
    pub format: OutputFormat,
    pub log_level: String,
    /// Configuration files merged into this one, lowest priority first
    pub loaded_files: Vec<PathBuf>,
}

impl Config {
    /// Defaults for checking the module in `module_path`.
    pub fn for_module(module_path: impl Into<PathBuf>) -> Self {
        let module_path = module_path.into();
        Config {
            readme_path: module_path.join("README.md"),
            module_path,
            provider_prefixes: to_strings(DEFAULT_PROVIDER_PREFIXES),
            additional_sections: Vec::new(),
            additional_files: Vec::new(),
            resource_sections: vec!["Resources".to_string()],
            input_sections: vec!["Inputs".to_string()],
            output_sections: vec!["Outputs".to_string()],
            format: OutputFormat::Text,
            log_level: "warn".to_string(),
            loaded_files: Vec::new(),
        }
    }

    pub fn with_readme(mut self, path: impl Into<PathBuf>) -> Self {
        self.readme_path = path.into();
        self
    }

    pub fn with_provider_prefixes<S: Into<String>>(
        mut self,
        prefixes: impl IntoIterator<Item = S>,
    ) -> Self {
        self.provider_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_additional_sections<S: Into<String>>(
        mut self,
        sections: impl IntoIterator<Item = S>,
    ) -> Self {
        self.additional_sections = sections.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_additional_files<S: Into<String>>(
        mut self,
        files: impl IntoIterator<Item = S>,
    ) -> Self {
        self.additional_files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Create configuration from explicit arguments, with the user-global
    /// configuration taken from the platform config directory
    pub fn from_args(args: Args) -> Result<Self> {
        let user_config = dirs::config_dir().map(|dir| dir.join("moddoc").join("config.toml"));
        Self::from_args_with_user_config(args, user_config)
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args_with_user_config(args: Args, user_config: Option<PathBuf>) -> Result<Self> {
        let module_path = match args.module {
            Some(path) => path,
            None => default_module_path()?,
        };

        let mut config = Config::for_module(&module_path);
        config.format = args.format;
        config.log_level = args.log_level;
        if let Some(readme) = args.readme {
            config.readme_path = readme;
        }

        // An explicitly requested file must exist; implicit ones are optional.
        let explicit = args.config.is_some();
        let project_config = args
            .config
            .unwrap_or_else(|| module_path.join(PROJECT_CONFIG_FILE));
        let layers = user_config
            .map(|path| (path, false))
            .into_iter()
            .chain(std::iter::once((project_config, explicit)));

        for (path, required) in layers {
            match FileConfig::load(&path)? {
                Some(file) => {
                    log::info!("loaded configuration from {}", path.display());
                    config.merge_file(file);
                    config.loaded_files.push(path);
                }
                None if required => {
                    return Err(LintError::NotFound(format!(
                        "configuration file not found: {}",
                        path.display()
                    ))
                    .into());
                }
                None => log::debug!("no configuration at {}", path.display()),
            }
        }

        override_if_set(&mut config.provider_prefixes, args.provider_prefixes);
        override_if_set(&mut config.additional_sections, args.sections);
        override_if_set(&mut config.additional_files, args.files);

        Ok(config)
    }

    fn merge_file(&mut self, file: FileConfig) {
        override_if_set(&mut self.provider_prefixes, file.provider_prefixes);
        override_if_set(&mut self.additional_sections, file.additional_sections);
        override_if_set(&mut self.additional_files, file.additional_files);
        override_if_set(&mut self.resource_sections, file.sections.resources);
        override_if_set(&mut self.input_sections, file.sections.inputs);
        override_if_set(&mut self.output_sections, file.sections.outputs);
    }
}

/// `GITHUB_WORKSPACE` when set, otherwise the working directory.
fn default_module_path() -> Result<PathBuf> {
    match std::env::var_os("GITHUB_WORKSPACE") {
        Some(workspace) if !workspace.is_empty() => Ok(PathBuf::from(workspace)),
        _ => std::env::current_dir().context("failed to get current working directory"),
    }
}

fn override_if_set(target: &mut Vec<String>, value: Vec<String>) {
    if !value.is_empty() {
        *target = value;
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
