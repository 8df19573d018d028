//! End-to-end checks of a module directory against its README
use std::fs;
use std::path::Path;

use moddoc_lint::{Config, LintError, ReadmeValidator};

const MAIN_TF: &str = r#"
resource "azurerm_resource_group" "this" {
  name     = var.name
  location = var.location
}

resource "azurerm_storage_account" "this" {
  name                = "st${var.name}"
  resource_group_name = azurerm_resource_group.this.name
}

data "azurerm_client_config" "current" {}
"#;

const VARIABLES_TF: &str = r#"
variable "name" {
  type = string
}

variable "location" {
  type    = string
  default = "westeurope"
}
"#;

const OUTPUTS_TF: &str = r#"
output "resource_group_id" {
  value = azurerm_resource_group.this.id
}
"#;

/// README in the table layout produced by documentation generators.
const TABLE_README: &str = r#"# Storage

## Resources

| Name | Type |
|------|------|
| [azurerm_resource_group.this](https://registry.terraform.io/providers/hashicorp/azurerm/latest/docs/resources/resource_group) | resource |
| [azurerm_storage_account.this](https://registry.terraform.io/providers/hashicorp/azurerm/latest/docs/resources/storage_account) | resource |
| [azurerm_client_config.current](https://registry.terraform.io/providers/hashicorp/azurerm/latest/docs/data-sources/client_config) | data source |

## Inputs

| Name | Description |
|------|-------------|
| <a name="input_name"></a> [name](#input\_name) | Name |
| <a name="input_location"></a> [location](#input\_location) | Location |

## Outputs

| Name | Description |
|------|-------------|
| <a name="output_resource_group_id"></a> [resource\_group\_id](#output\_resource\_group\_id) | Id |
"#;

fn write_module(dir: &Path, readme: &str) {
    fs::write(dir.join("main.tf"), MAIN_TF).expect("write main.tf");
    fs::write(dir.join("variables.tf"), VARIABLES_TF).expect("write variables.tf");
    fs::write(dir.join("outputs.tf"), OUTPUTS_TF).expect("write outputs.tf");
    fs::write(dir.join("README.md"), readme).expect("write README.md");
}

fn messages(errors: &[LintError]) -> Vec<String> {
    errors.iter().map(|e| e.to_string()).collect()
}

fn validate(config: Config) -> Vec<String> {
    let validator = ReadmeValidator::new(config).expect("load README");
    messages(&validator.validate())
}

#[test]
fn test_table_layout_is_clean() {
    let dir = tempfile::tempdir().expect("create temp dir");
    write_module(dir.path(), TABLE_README);

    let findings = validate(Config::for_module(dir.path()));
    assert!(findings.is_empty(), "unexpected findings: {findings:?}");
}

#[test]
fn test_heading_layout_reports_both_directions() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let readme = r#"# Storage

## Resources

- [azurerm_resource_group.this](https://registry.terraform.io/providers/hashicorp/azurerm/latest/docs/resources/resource_group)
- [azurerm_client_config.current](https://registry.terraform.io/providers/hashicorp/azurerm/latest/docs/data-sources/client_config)
- [azurerm_key_vault.this](https://registry.terraform.io/providers/hashicorp/azurerm/latest/docs/resources/key_vault)

## Required Inputs

### name

## Optional Inputs

### location

### tags

## Outputs

### resource_group_id
"#;
    write_module(dir.path(), readme);

    let findings = validate(Config::for_module(dir.path()));
    assert_eq!(
        findings,
        vec![
            "Resources item azurerm_storage_account is not documented",
            "Resources item azurerm_storage_account.this is not documented",
            "Resources item azurerm_key_vault.this is documented but not defined",
            "Resources item azurerm_key_vault is documented but not defined",
            "Variables item tags is documented but not defined",
        ]
    );
}

#[test]
fn test_module_without_outputs_skips_outputs() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let readme = TABLE_README
        .split("## Outputs")
        .next()
        .expect("readme prefix")
        .to_string();
    write_module(dir.path(), &readme);
    fs::remove_file(dir.path().join("outputs.tf")).expect("remove outputs.tf");

    let findings = validate(Config::for_module(dir.path()));
    assert!(findings.is_empty(), "unexpected findings: {findings:?}");
}

#[test]
fn test_required_sections_and_files() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let readme = format!("## Goals\n\nKeep things tidy.\n\n{TABLE_README}");
    write_module(dir.path(), &readme);

    let config = Config::for_module(dir.path())
        .with_additional_sections(["Goals", "Testing"])
        .with_additional_files(["README.md", "TESTING.md"]);

    let findings = validate(config);
    assert_eq!(
        findings,
        vec![
            "required file TESTING.md is missing",
            "required section Testing is missing",
        ]
    );
}

#[test]
fn test_unknown_prefix_hides_resource_links() {
    let dir = tempfile::tempdir().expect("create temp dir");
    write_module(dir.path(), TABLE_README);

    let config = Config::for_module(dir.path()).with_provider_prefixes(["aws_"]);
    let findings = validate(config);

    // The section exists but none of its links qualify.
    assert_eq!(findings[0], "resources section not found or empty");
    assert!(findings.iter().any(|f| f == "Resources item azurerm_resource_group is not documented"));
    assert!(findings.iter().any(|f| f == "Data Sources item azurerm_client_config is not documented"));
}

#[test]
fn test_malformed_file_fails_each_reader() {
    let dir = tempfile::tempdir().expect("create temp dir");
    write_module(dir.path(), TABLE_README);
    fs::write(dir.path().join("variables.tf"), "variable \"name\" {\n  type = \n")
        .expect("write variables.tf");

    let findings = validate(Config::for_module(dir.path()));
    // Both the directory scan and the variables check read the broken file.
    assert_eq!(findings.len(), 2, "unexpected findings: {findings:?}");
    assert!(findings.iter().all(|f| f.contains("variables.tf")));
}

#[test]
fn test_missing_readme_is_not_found() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let err = ReadmeValidator::new(Config::for_module(dir.path())).unwrap_err();
    assert!(matches!(err, LintError::NotFound(_)));
}

#[test]
fn test_parse_failures_are_not_findings() {
    let dir = tempfile::tempdir().expect("create temp dir");
    write_module(dir.path(), TABLE_README);
    fs::write(dir.path().join("outputs.tf"), "output {\n").expect("write outputs.tf");

    let config = Config::for_module(dir.path()).with_additional_sections(["Testing"]);
    let errors = ReadmeValidator::new(config).expect("load README").validate();

    let (findings, failures): (Vec<&LintError>, Vec<&LintError>) =
        errors.iter().partition(|e| e.is_finding());
    assert_eq!(findings.len(), 1, "unexpected findings: {findings:?}");
    assert!(matches!(findings[0], LintError::MissingSection(_)));
    assert!(!failures.is_empty());
    assert!(failures.iter().all(|e| matches!(e, LintError::Parse { .. })));
}
