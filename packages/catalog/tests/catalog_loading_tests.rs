// ABOUTME: Integration tests for catalog loading
// ABOUTME: Covers operator-supplied catalogs, ordering and coefficient validation

use pretty_assertions::assert_eq;
use roikit_catalog::{Catalog, CatalogError, TaskProfile};
use rstest::rstest;
use std::io::Write;
use tempfile::NamedTempFile;

fn catalog_json(tasks: &str, tools: &str) -> String {
    format!(
        r#"{{
            "version": "test",
            "tasks": [{tasks}],
            "tools": [{tools}]
        }}"#
    )
}

const WRITING: &str = r#"{"id":"writing","label":"Writing","unit":"articles/month","humanTimePerUnit":3,"aiTimePerUnit":0.5,"qualityRatio":0.85}"#;
const CODING: &str = r#"{"id":"coding","label":"Coding","unit":"features/month","humanTimePerUnit":8,"aiTimePerUnit":3,"qualityRatio":0.7}"#;
const TOOL: &str = r#"{"id":"basic","label":"Basic","monthlyCost":20}"#;

#[test]
fn test_custom_catalog_preserves_order() {
    let json = catalog_json(&format!("{CODING},{WRITING}"), TOOL);
    let catalog = Catalog::from_json_str(&json).unwrap();

    let ids: Vec<&str> = catalog.list_tasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["coding", "writing"]);
    assert_eq!(catalog.version(), "test");
    assert!(catalog.list_platforms().is_empty());
}

#[test]
fn test_find_task_returns_profile() {
    let json = catalog_json(WRITING, TOOL);
    let catalog = Catalog::from_json_str(&json).unwrap();

    assert_eq!(
        catalog.find_task("writing"),
        Some(&TaskProfile {
            id: "writing".to_string(),
            label: "Writing".to_string(),
            unit: "articles/month".to_string(),
            human_time_per_unit: 3.0,
            ai_time_per_unit: 0.5,
            quality_ratio: 0.85,
        })
    );
}

#[test]
fn test_duplicate_task_id_rejected() {
    let json = catalog_json(&format!("{WRITING},{WRITING}"), TOOL);
    let result = Catalog::from_json_str(&json);

    match result {
        Err(CatalogError::DuplicateId { table, id }) => {
            assert_eq!(table, "tasks");
            assert_eq!(id, "writing");
        }
        other => panic!("Expected DuplicateId, got {:?}", other),
    }
}

#[test]
fn test_ai_slower_than_human_is_accepted() {
    let slow = r#"{"id":"slow","label":"Slow","unit":"items","humanTimePerUnit":1,"aiTimePerUnit":2,"qualityRatio":0.5}"#;
    let catalog = Catalog::from_json_str(&catalog_json(slow, TOOL)).unwrap();

    assert!(catalog.find_task("slow").unwrap().is_slower_than_human());
}

#[rstest]
#[case(r#""humanTimePerUnit":0,"aiTimePerUnit":0,"qualityRatio":0.5"#, "humanTimePerUnit")]
#[case(r#""humanTimePerUnit":1,"aiTimePerUnit":-1,"qualityRatio":0.5"#, "aiTimePerUnit")]
#[case(r#""humanTimePerUnit":1,"aiTimePerUnit":0.5,"qualityRatio":1.2"#, "qualityRatio")]
fn test_invalid_task_coefficients_rejected(#[case] coefficients: &str, #[case] expected: &str) {
    let task = format!(r#"{{"id":"bad","label":"Bad","unit":"items",{coefficients}}}"#);
    let result = Catalog::from_json_str(&catalog_json(&task, TOOL));

    match result {
        Err(CatalogError::InvalidCoefficient { field, id, .. }) => {
            assert_eq!(field, expected);
            assert_eq!(id, "bad");
        }
        other => panic!("Expected InvalidCoefficient, got {:?}", other),
    }
}

#[test]
fn test_negative_tool_cost_rejected() {
    let tool = r#"{"id":"refund","label":"Refund","monthlyCost":-5}"#;
    let result = Catalog::from_json_str(&catalog_json(WRITING, tool));

    assert!(matches!(
        result,
        Err(CatalogError::InvalidCoefficient {
            table: "tools",
            field: "monthlyCost",
            ..
        })
    ));
}

#[test]
fn test_malformed_json_is_parse_error() {
    let result = Catalog::from_json_str("{ not json");
    assert!(matches!(result, Err(CatalogError::Parse(_))));
}

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(catalog_json(WRITING, TOOL).as_bytes())
        .unwrap();

    let catalog = Catalog::from_file(file.path()).unwrap();
    assert_eq!(catalog.find_tool("basic").unwrap().monthly_cost, 20.0);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Catalog::from_file(&dir.path().join("missing.json"));

    assert!(matches!(result, Err(CatalogError::Io(_))));
}
