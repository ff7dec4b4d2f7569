use hl7_map::MappingTable;
use hl7_model::Mapping;
use proptest::prelude::*;

#[test]
fn upsert_normalizes_on_insert() {
    let mut table = MappingTable::new();
    table.upsert("PID", 3, "patient.id");
    assert_eq!(table.lookup("PID", 3), Some("$.patient.id"));
}

#[test]
fn upsert_replaces_the_pair() {
    let mut table = MappingTable::new();
    table.upsert("PID", 3, "$.patient.id");
    table.upsert("PID", 3, "$.patient.mrn");
    assert_eq!(table.len(), 1);
    assert_eq!(table.lookup("PID", 3), Some("$.patient.mrn"));
}

#[test]
fn remove_is_a_no_op_when_absent() {
    let mut table = MappingTable::new();
    table.upsert("PID", 3, "$.patient.id");
    assert!(table.remove("PID", 3));
    assert!(!table.remove("PID", 3));
    assert!(!table.remove("PV1", 2));
}

#[test]
fn removing_the_last_field_drops_the_segment() {
    let mut table = MappingTable::new();
    table.upsert("OBX", 5, "$.results[0].value");
    assert!(table.has_segment("OBX"));
    table.remove("OBX", 5);
    assert!(!table.has_segment("OBX"));
    assert!(table.is_empty());
}

#[test]
fn path_mapped_compares_canonical_forms() {
    let mut table = MappingTable::new();
    table.upsert("PID", 3, "patient.id");
    assert!(table.is_path_mapped("$.patient.id"));
    assert!(table.is_path_mapped("  'patient.id'  "));
    assert!(!table.is_path_mapped("$.patient.mrn"));
    assert!(!table.is_path_mapped(""));
}

#[test]
fn display_view_sorts_by_segment_then_field() {
    let mut table = MappingTable::new();
    table.upsert("PV1", 2, "$.visit.class");
    table.upsert("PID", 5, "$.patient.name");
    table.upsert("PID", 3, "$.patient.id");
    let rows = table.mappings();
    assert_eq!(
        rows,
        vec![
            Mapping::new("PID", 3, "$.patient.id"),
            Mapping::new("PID", 5, "$.patient.name"),
            Mapping::new("PV1", 2, "$.visit.class"),
        ]
    );
    assert_eq!(table.segment_ids().collect::<Vec<_>>(), vec!["PID", "PV1"]);
}

#[test]
fn collecting_mappings_keeps_the_last_duplicate() {
    let table: MappingTable = vec![
        Mapping::new("PID", 3, "$.patient.id"),
        Mapping::new("PID", 3, "$.patient.mrn"),
    ]
    .into_iter()
    .collect();
    assert_eq!(table.lookup("PID", 3), Some("$.patient.mrn"));
}

proptest! {
    #[test]
    fn upsert_is_last_write_wins(
        first in "[a-z.]{1,12}",
        second in "[a-z.]{1,12}",
        field in 1u32..64,
    ) {
        let mut table = MappingTable::new();
        table.upsert("PID", field, &first);
        table.upsert("PID", field, &second);
        prop_assert_eq!(table.len(), 1);
        let normalized = hl7_path::normalize(&second);
        prop_assert_eq!(table.lookup("PID", field), Some(normalized.as_str()));
    }
}
