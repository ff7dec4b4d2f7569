use hl7_encode::{BuildError, HeaderOverrides, MessageBuilder, build_message};
use hl7_map::MappingTable;
use hl7_model::{SchemaMap, SegmentSchema};
use proptest::prelude::*;
use serde_json::{Value, json};

fn admission_schemas() -> SchemaMap {
    let mut schemas = SchemaMap::new();
    schemas.insert(
        "MSH".to_string(),
        SegmentSchema::new("Message Header", 12)
            .with_required([9, 10])
            .with_default(1, "|")
            .with_default(2, r"^~\&")
            .with_default(9, "ADT^A01")
            .with_default(11, "P"),
    );
    schemas.insert(
        "PID".to_string(),
        SegmentSchema::new("Patient Identification", 5).with_required([3]),
    );
    schemas.insert("PV1".to_string(), SegmentSchema::new("Patient Visit", 3));
    schemas.insert("OBX".to_string(), SegmentSchema::new("Observation", 4));
    schemas
}

fn admission_document() -> Value {
    json!({
        "patient": {"id": "P1"},
        "visit": {"class": "I"},
        "observations": [{"value": 9.5}]
    })
}

fn admission_table() -> MappingTable {
    let mut table = MappingTable::new();
    table.upsert("PID", 3, "$.patient.id");
    table
}

fn computed() -> HeaderOverrides {
    HeaderOverrides::new()
        .with_timestamp("20240101000000")
        .with_control_id("MSG1")
        .with_version("2.3")
}

#[test]
fn assembles_header_mandatory_and_mapped_segments() {
    let message = build_message(
        &admission_schemas(),
        &admission_table(),
        &admission_document(),
        computed(),
    )
    .unwrap();

    assert_eq!(
        message,
        "MSH|^~\\&|||||20240101000000||ADT^A01|MSG1|P|2.3\nPID|||P1||\nPV1|||"
    );
}

#[test]
fn mapped_segments_sort_after_the_mandatory_block() {
    let mut table = admission_table();
    table.upsert("OBX", 2, "$.observations[0].value");

    let message = build_message(
        &admission_schemas(),
        &table,
        &admission_document(),
        computed(),
    )
    .unwrap();

    let lines: Vec<&str> = message.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[3], "OBX||9.5||");
}

#[test]
fn segments_without_a_dictionary_entry_are_skipped() {
    let mut table = admission_table();
    table.upsert("ZZZ", 1, "$.patient.id");

    let message = build_message(
        &admission_schemas(),
        &table,
        &admission_document(),
        computed(),
    )
    .unwrap();

    assert!(!message.contains("ZZZ"));
}

#[test]
fn missing_required_field_aborts_the_build() {
    let error = build_message(
        &admission_schemas(),
        &MappingTable::new(),
        &admission_document(),
        computed(),
    )
    .unwrap_err();

    assert_eq!(
        error,
        BuildError::MissingRequiredField {
            segment: "PID".to_string(),
            field: 3,
        }
    );
    assert_eq!(
        error.to_string(),
        "PID-3 is required; provide a value (mapping or default)"
    );
}

#[test]
fn removing_the_sole_source_of_a_required_field_fails() {
    let schemas = admission_schemas();
    let document = admission_document();
    let mut table = admission_table();
    assert!(build_message(&schemas, &table, &document, computed()).is_ok());

    table.remove("PID", 3);
    let error = build_message(&schemas, &table, &document, computed()).unwrap_err();
    assert_eq!(
        error,
        BuildError::MissingRequiredField {
            segment: "PID".to_string(),
            field: 3,
        }
    );
}

#[test]
fn the_first_gap_in_message_order_is_reported() {
    let mut schemas = admission_schemas();
    schemas.insert(
        "AL1".to_string(),
        SegmentSchema::new("Patient Allergy Information", 3).with_required([1]),
    );
    let mut table = MappingTable::new();
    table.upsert("AL1", 2, "$.patient.id");

    // Both PID-3 and AL1-1 are unsatisfied; PID encodes first.
    let error = build_message(&schemas, &table, &admission_document(), computed()).unwrap_err();
    assert_eq!(
        error,
        BuildError::MissingRequiredField {
            segment: "PID".to_string(),
            field: 3,
        }
    );
}

#[test]
fn required_fields_are_checked_in_ascending_order() {
    let mut schemas = SchemaMap::new();
    schemas.insert(
        "PID".to_string(),
        SegmentSchema::new("Patient Identification", 6).with_required([5, 3]),
    );

    let error = MessageBuilder::new(&schemas, &MappingTable::new())
        .with_mandatory_segments(["PID"])
        .build(&json!({}))
        .unwrap_err();

    assert_eq!(
        error,
        BuildError::MissingRequiredField {
            segment: "PID".to_string(),
            field: 3,
        }
    );
}

#[test]
fn custom_mandatory_segments_replace_the_default_set() {
    let schemas = admission_schemas();
    let table = MappingTable::new();

    let message = MessageBuilder::new(&schemas, &table)
        .with_mandatory_segments(["PV1"])
        .with_overrides(computed())
        .build(&admission_document())
        .unwrap();

    let lines: Vec<&str> = message.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("PV1"));
}

#[test]
fn admission_message_with_shipped_dictionaries() {
    let root = hl7_standards::default_standards_root();
    let schemas = hl7_standards::load_segment_schemas(&root, "2.3").unwrap();

    let mut table = MappingTable::new();
    table.upsert("PID", 3, "$.patient.id");
    table.upsert("PID", 5, "$.patient.name");
    table.upsert("PV1", 2, "$.visit.class");
    let document = json!({
        "patient": {"id": "P42", "name": "Diaz^Ana"},
        "visit": {"class": "I"}
    });
    let overrides = HeaderOverrides::new()
        .with_timestamp("20240101120000")
        .with_control_id("MSG0001")
        .with_version("2.3");

    let message = build_message(&schemas, &table, &document, overrides).unwrap();
    insta::assert_snapshot!(message, @r"
    MSH|^~\&|HL7MAP|HOSP|HL7SYS|HOSP|20240101120000||ADT^A01|MSG0001|P|2.3|||||||
    PID|||P42||Diaz^Ana|||||||||||||||||||||||||
    PV1||I||||||||||||||||||||||||||||||||||||||||||||||||||
    ");
}

fn relaxed_schemas() -> SchemaMap {
    let mut schemas = SchemaMap::new();
    schemas.insert(
        "MSH".to_string(),
        SegmentSchema::new("Message Header", 12)
            .with_default(1, "|")
            .with_default(2, r"^~\&"),
    );
    schemas.insert(
        "PID".to_string(),
        SegmentSchema::new("Patient Identification", 5),
    );
    schemas.insert("PV1".to_string(), SegmentSchema::new("Patient Visit", 3));
    schemas.insert("OBX".to_string(), SegmentSchema::new("Observation", 4));
    schemas
}

proptest! {
    #[test]
    fn builds_are_deterministic(
        bindings in proptest::collection::vec(("MSH|PID|PV1|OBX", 1u32..=5, "[a-z]{1,6}"), 0..12)
    ) {
        let schemas = relaxed_schemas();
        let mut table = MappingTable::new();
        for (segment, field, key) in &bindings {
            table.upsert(segment.clone(), *field, key);
        }
        let document = admission_document();

        let first = build_message(&schemas, &table, &document, computed()).unwrap();
        let second = build_message(&schemas, &table, &document, computed()).unwrap();
        prop_assert_eq!(first, second);
    }
}
