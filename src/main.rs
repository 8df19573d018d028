use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use moddoc_lint::config::{Args, Config, OutputFormat};
use moddoc_lint::{LintError, ReadmeValidator};

/// Machine-readable run summary for `--format json`.
#[derive(Debug, Serialize)]
struct Report {
    readme: String,
    module: String,
    count: usize,
    findings: Vec<String>,
}

fn run(config: Config) -> Result<Vec<LintError>> {
    log::info!(
        "checking {} against {}",
        config.readme_path.display(),
        config.module_path.display()
    );

    let validator = ReadmeValidator::new(config.clone())
        .with_context(|| format!("failed to load {}", config.readme_path.display()))?;
    let errors = validator.validate();
    let findings: Vec<String> = errors.iter().map(|e| e.to_string()).collect();

    match config.format {
        OutputFormat::Text => {
            for finding in &findings {
                println!("{finding}");
            }
        }
        OutputFormat::Json => {
            let report = Report {
                readme: config.readme_path.display().to_string(),
                module: config.module_path.display().to_string(),
                count: findings.len(),
                findings,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(errors)
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .parse_default_env()
        .init();

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(2);
        }
    };

    match run(config) {
        Ok(errors) if errors.is_empty() => ExitCode::SUCCESS,
        Ok(errors) => {
            let failed = errors.iter().filter(|e| !e.is_finding()).count();
            if failed > 0 {
                log::error!("{failed} error(s) reading or parsing module files");
                return ExitCode::from(2);
            }
            log::warn!("{} documentation finding(s)", errors.len());
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
