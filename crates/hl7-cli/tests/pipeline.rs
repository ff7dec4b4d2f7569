//! In-process tests for the conversion pipeline.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use hl7_cli::pipeline::{
    convert, load_document, load_mappings, message_overrides, resolve_dictionaries,
};
use hl7_encode::HeaderOverrides;

fn write_admission_inputs(dir: &TempDir) -> (PathBuf, PathBuf) {
    let document = dir.path().join("admission.json");
    fs::write(
        &document,
        r#"{
  "patient": {"id": "P42", "name": "Diaz^Ana"},
  "visit": {"class": "I"}
}"#,
    )
    .expect("write document");
    let mappings = dir.path().join("mappings.json");
    fs::write(
        &mappings,
        r#"[
  {"segment": "PID", "field": 3, "sourcePath": "$.patient.id"},
  {"segment": "PID", "field": 5, "sourcePath": "patient.name"},
  {"segment": "PV1", "field": 2, "sourcePath": "$.visit.class"}
]"#,
    )
    .expect("write mappings");
    (document, mappings)
}

fn pinned_overrides() -> HeaderOverrides {
    HeaderOverrides::new()
        .with_timestamp("20240101120000")
        .with_control_id("MSG0001")
        .with_version("2.3")
}

#[test]
fn convert_assembles_the_expected_message() {
    let dir = TempDir::new().expect("tempdir");
    let (document_path, mappings_path) = write_admission_inputs(&dir);

    let document = load_document(&document_path).expect("load document");
    let table = load_mappings(&mappings_path).expect("load mappings");
    let root = hl7_standards::default_standards_root();
    let (version, schemas) = resolve_dictionaries(&root, Some("2.3")).expect("dictionaries");

    let outcome = convert(
        &schemas,
        &table,
        &document,
        &version,
        None,
        pinned_overrides(),
    )
    .expect("convert");

    insta::assert_snapshot!(outcome.message, @r"
    MSH|^~\&|HL7MAP|HOSP|HL7SYS|HOSP|20240101120000||ADT^A01|MSG0001|P|2.3|||||||
    PID|||P42||Diaz^Ana|||||||||||||||||||||||||
    PV1||I||||||||||||||||||||||||||||||||||||||||||||||||||
    ");

    let summary: Vec<(String, u32, String)> = outcome
        .rows
        .iter()
        .map(|row| {
            (
                row.mapping.segment.clone(),
                row.mapping.field,
                row.label.clone(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            (
                "PID".to_string(),
                3,
                "Patient ID (Internal ID)".to_string()
            ),
            ("PID".to_string(), 5, "Patient Name".to_string()),
            ("PV1".to_string(), 2, "Patient Class".to_string()),
        ]
    );
}

#[test]
fn unrooted_source_paths_are_canonicalized_on_load() {
    let dir = TempDir::new().expect("tempdir");
    let (_, mappings_path) = write_admission_inputs(&dir);

    let table = load_mappings(&mappings_path).expect("load mappings");
    assert_eq!(table.lookup("PID", 5), Some("$.patient.name"));
}

#[test]
fn later_mapping_records_replace_earlier_slots() {
    let dir = TempDir::new().expect("tempdir");
    let mappings_path = dir.path().join("mappings.json");
    fs::write(
        &mappings_path,
        r#"[
  {"segment": "PID", "field": 3, "sourcePath": "$.patient.id"},
  {"segment": "PID", "field": 3, "sourcePath": "$.patient.mrn"}
]"#,
    )
    .expect("write mappings");

    let table = load_mappings(&mappings_path).expect("load mappings");
    assert_eq!(table.len(), 1);
    assert_eq!(table.lookup("PID", 3), Some("$.patient.mrn"));
}

#[test]
fn zero_field_mappings_are_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let mappings_path = dir.path().join("mappings.json");
    fs::write(
        &mappings_path,
        r#"[{"segment": "PID", "field": 0, "sourcePath": "$.patient.id"}]"#,
    )
    .expect("write mappings");

    let error = load_mappings(&mappings_path).expect_err("field 0 must be rejected");
    assert!(format!("{error}").contains("field numbers start at 1"));
}

#[test]
fn malformed_documents_fail_before_encoding() {
    let dir = TempDir::new().expect("tempdir");
    let document_path = dir.path().join("broken.json");
    fs::write(&document_path, "{not json").expect("write document");

    let error = load_document(&document_path).expect_err("parse must fail");
    assert!(format!("{error}").contains("parse document"));
}

#[test]
fn unavailable_versions_fall_back_to_the_default() {
    let root = hl7_standards::default_standards_root();
    let (version, schemas) = resolve_dictionaries(&root, Some("9.9")).expect("dictionaries");
    assert_eq!(version, "2.3");
    assert!(schemas.contains_key("MSH"));
}

#[test]
fn missing_required_fields_surface_as_errors() {
    let dir = TempDir::new().expect("tempdir");
    let (document_path, _) = write_admission_inputs(&dir);
    let mappings_path = dir.path().join("partial.json");
    fs::write(
        &mappings_path,
        r#"[
  {"segment": "PID", "field": 3, "sourcePath": "$.patient.id"},
  {"segment": "PID", "field": 5, "sourcePath": "$.patient.name"}
]"#,
    )
    .expect("write mappings");

    let document = load_document(&document_path).expect("load document");
    let table = load_mappings(&mappings_path).expect("load mappings");
    let root = hl7_standards::default_standards_root();
    let (version, schemas) = resolve_dictionaries(&root, Some("2.3")).expect("dictionaries");

    let error = convert(
        &schemas,
        &table,
        &document,
        &version,
        None,
        message_overrides(&version),
    )
    .expect_err("PV1-2 has no value");
    assert!(
        format!("{error}").contains("PV1-2 is required"),
        "unexpected error: {error}"
    );
}

#[test]
fn custom_mandatory_segments_replace_the_default_set() {
    let dir = TempDir::new().expect("tempdir");
    let (document_path, _) = write_admission_inputs(&dir);
    let mappings_path = dir.path().join("pid-only.json");
    fs::write(
        &mappings_path,
        r#"[
  {"segment": "PID", "field": 3, "sourcePath": "$.patient.id"},
  {"segment": "PID", "field": 5, "sourcePath": "$.patient.name"}
]"#,
    )
    .expect("write mappings");

    let document = load_document(&document_path).expect("load document");
    let table = load_mappings(&mappings_path).expect("load mappings");
    let root = hl7_standards::default_standards_root();
    let (version, schemas) = resolve_dictionaries(&root, Some("2.3")).expect("dictionaries");

    let mandatory = vec!["PID".to_string()];
    let outcome = convert(
        &schemas,
        &table,
        &document,
        &version,
        Some(&mandatory),
        pinned_overrides(),
    )
    .expect("convert");

    assert_eq!(outcome.message.lines().count(), 2);
    assert!(!outcome.message.contains("PV1"));
}

#[test]
fn unknown_segments_keep_a_generic_label() {
    let dir = TempDir::new().expect("tempdir");
    let (document_path, _) = write_admission_inputs(&dir);
    let mappings_path = dir.path().join("with-custom.json");
    fs::write(
        &mappings_path,
        r#"[
  {"segment": "PID", "field": 3, "sourcePath": "$.patient.id"},
  {"segment": "PID", "field": 5, "sourcePath": "$.patient.name"},
  {"segment": "ZZZ", "field": 1, "sourcePath": "$.patient.id"}
]"#,
    )
    .expect("write mappings");

    let document = load_document(&document_path).expect("load document");
    let table = load_mappings(&mappings_path).expect("load mappings");
    let root = hl7_standards::default_standards_root();
    let (version, schemas) = resolve_dictionaries(&root, Some("2.3")).expect("dictionaries");

    let mandatory = vec!["PID".to_string()];
    let outcome = convert(
        &schemas,
        &table,
        &document,
        &version,
        Some(&mandatory),
        pinned_overrides(),
    )
    .expect("convert");

    assert!(!outcome.message.contains("ZZZ"));
    let custom = outcome
        .rows
        .iter()
        .find(|row| row.mapping.segment == "ZZZ")
        .expect("summary row for ZZZ");
    assert_eq!(custom.label, "Field 1");
}
