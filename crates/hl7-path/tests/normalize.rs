use hl7_path::normalize;
use proptest::prelude::*;

#[test]
fn canonical_inputs_pass_through() {
    assert_eq!(normalize("$"), "$");
    assert_eq!(normalize("$.patient.visits[0].id"), "$.patient.visits[0].id");
}

#[test]
fn shorthand_gets_rooted() {
    assert_eq!(normalize("patient.id"), "$.patient.id");
    assert_eq!(normalize(".patient.id"), "$.patient.id");
    assert_eq!(normalize("  patient.id  "), "$.patient.id");
    assert_eq!(normalize("\"$.patient.id\""), "$.patient.id");
    assert_eq!(normalize("' patient.id '"), "$.patient.id");
}

#[test]
fn empty_means_no_path() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("  "), "");
    assert_eq!(normalize("\"\""), "");
}

proptest! {
    #[test]
    fn normalize_is_idempotent(input in ".{0,40}") {
        let once = normalize(&input);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn output_is_empty_or_rooted(input in ".{0,40}") {
        let normalized = normalize(&input);
        prop_assert!(normalized.is_empty() || normalized.starts_with('$'));
    }
}
