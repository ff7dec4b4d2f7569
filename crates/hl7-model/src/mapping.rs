use serde::{Deserialize, Serialize};
use std::fmt;

/// A single user mapping: one document location feeding one segment field.
///
/// `source_path` is stored in canonical text form (`$.patient.id`); the
/// mapping table normalizes it on insert. `field` is the 1-based HL7 field
/// number within the segment. Serialized form uses camelCase (`sourcePath`),
/// the shape mapping files carry on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    pub segment: String,
    pub field: u32,
    pub source_path: String,
}

impl Mapping {
    pub fn new(segment: impl Into<String>, field: u32, source_path: impl Into<String>) -> Self {
        Mapping {
            segment: segment.into(),
            field,
            source_path: source_path.into(),
        }
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} <- {}", self.segment, self.field, self.source_path)
    }
}
