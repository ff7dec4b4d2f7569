use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Segment identifier of the message header. Every message starts with it.
pub const HEADER_SEGMENT_ID: &str = "MSH";

/// Default field separator ( MSH-1 ). The header may override it.
pub const FIELD_SEPARATOR: char = '|';

/// Default encoding characters ( MSH-2 ): component, repetition, escape,
/// subcomponent.
pub const ENCODING_CHARACTERS: &str = r"^~\&";

/// Dictionary entry for one segment type in one dictionary version.
///
/// Field numbers are 1-based; `max_field` is the highest field the segment
/// carries, so an encoded segment always emits exactly `max_field` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentSchema {
    pub description: String,
    pub max_field: u32,
    pub required_fields: BTreeSet<u32>,
    pub labels: BTreeMap<u32, String>,
    pub defaults: BTreeMap<u32, String>,
}

impl SegmentSchema {
    pub fn new(description: impl Into<String>, max_field: u32) -> Self {
        SegmentSchema {
            description: description.into(),
            max_field,
            required_fields: BTreeSet::new(),
            labels: BTreeMap::new(),
            defaults: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_required(mut self, fields: impl IntoIterator<Item = u32>) -> Self {
        self.required_fields.extend(fields);
        self
    }

    #[must_use]
    pub fn with_label(mut self, field: u32, label: impl Into<String>) -> Self {
        self.labels.insert(field, label.into());
        self
    }

    #[must_use]
    pub fn with_default(mut self, field: u32, value: impl Into<String>) -> Self {
        self.defaults.insert(field, value.into());
        self
    }

    /// Human label for a field, falling back to `Field n` when the
    /// dictionary has none.
    pub fn label(&self, field: u32) -> String {
        self.labels
            .get(&field)
            .cloned()
            .unwrap_or_else(|| format!("Field {}", field))
    }

    pub fn is_required(&self, field: u32) -> bool {
        self.required_fields.contains(&field)
    }

    pub fn default_value(&self, field: u32) -> Option<&str> {
        self.defaults.get(&field).map(String::as_str)
    }
}

/// Segment dictionaries for one version, keyed by segment identifier.
pub type SchemaMap = BTreeMap<String, SegmentSchema>;
