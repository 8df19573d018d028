//! README indexing through the public API
use moddoc_lint::document::AnchorCategory;
use moddoc_lint::fuzzy::{edit_distance, is_similar_section};
use moddoc_lint::{compare, DocumentIndex};

#[test]
fn test_distance_properties() {
    for s in ["", "Inputs", "Outputs", "Resources", "Required Inputs"] {
        assert_eq!(edit_distance(s, s), 0);
        assert_eq!(edit_distance(s, ""), s.chars().count());
    }
    assert!(is_similar_section("Inputs", "Input"));
    assert!(is_similar_section("Outputs", "Output"));
    assert!(!is_similar_section("Inputs", "Outputs"));
}

#[test]
fn test_resource_link_classification() {
    let doc = DocumentIndex::new(
        "## Resources\n\n\
         [azurerm_storage_account.example](https://registry.terraform.io/providers/hashicorp/azurerm/latest/docs/resources/storage_account)\n\n\
         [azurerm_subnet.existing](https://registry.terraform.io/providers/hashicorp/azurerm/latest/docs/data-sources/subnet)\n",
        &["azurerm_"],
    );

    let (found, err) = doc.extract_definitions_and_lookups();
    assert!(err.is_none());
    assert!(found.resources.contains(&"azurerm_storage_account".to_string()));
    assert!(found.resources.contains(&"azurerm_storage_account.example".to_string()));
    assert_eq!(
        found.data_sources,
        vec!["azurerm_subnet.existing", "azurerm_subnet"]
    );
}

#[test]
fn test_alternate_resource_section_names() {
    let doc = DocumentIndex::new(
        "## Goals\n\n- [random_string.suffix](https://registry.terraform.io/providers/hashicorp/random/latest/docs/resources/string)\n",
        &["random_"],
    );
    let (found, err) = doc.extract_definitions_and_lookups_in(&["Resources", "Goals"]);
    assert!(err.is_none());
    assert_eq!(found.resources, vec!["random_string.suffix", "random_string"]);
}

#[test]
fn test_subheadings_win_over_anchors() {
    let doc = DocumentIndex::new(
        "## Inputs\n\n<a name=\"input_zzz\"></a>\n\n### foo\n\n### bar\n",
        &[] as &[&str],
    );
    assert_eq!(doc.extract_section_items(&["Inputs"]), vec!["foo", "bar"]);
}

#[test]
fn test_item_categories() {
    let doc = DocumentIndex::new(
        "## Outputs\n\n### <a name=\"output_id\"></a> [id](#output\\_id)\n\n### plain\n",
        &[] as &[&str],
    );
    let items = doc.section_documents(&["Outputs"]);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "id");
    assert_eq!(items[0].category, AnchorCategory::Output);
    assert_eq!(items[1].category, AnchorCategory::Unknown);
}

#[test]
fn test_no_outputs_anywhere_compares_clean() {
    let doc = DocumentIndex::new("## Inputs\n\n### name\n", &[] as &[&str]);
    assert!(!doc.has_section("Outputs"));
    let documented = doc.extract_section_items(&["Outputs"]);
    assert!(documented.is_empty());
    assert!(compare(&[] as &[&str], &documented, "Outputs").is_empty());
}

#[test]
fn test_heading_ids_do_not_hide_sections() {
    let doc = DocumentIndex::new("## Inputs {#inputs}\n\n### name\n", &[] as &[&str]);
    assert_eq!(doc.section_names(), ["Inputs"]);
    assert!(doc.has_section("Inputs"));
    assert_eq!(doc.extract_section_items(&["Inputs"]), vec!["name"]);
}
