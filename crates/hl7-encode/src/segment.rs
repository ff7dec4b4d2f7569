//! Field resolution and single-segment encoding.

use hl7_map::MappingTable;
use hl7_model::{ENCODING_CHARACTERS, FIELD_SEPARATOR, HEADER_SEGMENT_ID, SegmentSchema};
use hl7_path::{resolve_text, value_text};
use serde_json::Value;

use crate::overrides::HeaderOverrides;

/// Field slots rendered for a message header without a dictionary entry.
pub const DEFAULT_HEADER_FIELD_COUNT: u32 = 21;

/// Resolve one field's text by priority: caller override, then mapped
/// document value, then schema default, then empty.
///
/// A mapping consumes its field even when the path resolves to nothing, so
/// a stale mapping blanks the field rather than exposing a default.
pub(crate) fn resolved_field_value(
    schema: Option<&SegmentSchema>,
    table: &MappingTable,
    document: &Value,
    segment_id: &str,
    field: u32,
    overrides: Option<&HeaderOverrides>,
) -> String {
    if let Some(value) = overrides.and_then(|overrides| overrides.get(field)) {
        return value.to_string();
    }
    if let Some(path) = table.lookup(segment_id, field) {
        return resolve_text(document, path)
            .map(value_text)
            .unwrap_or_default();
    }
    schema
        .and_then(|schema| schema.default_value(field))
        .unwrap_or_default()
        .to_string()
}

/// Encode a non-header segment: the identifier, then one separator-prefixed
/// slot for every field number up to the schema's field count.
pub fn encode_segment(
    segment_id: &str,
    schema: &SegmentSchema,
    table: &MappingTable,
    document: &Value,
) -> String {
    let mut line = String::from(segment_id);
    for field in 1..=schema.max_field {
        line.push(FIELD_SEPARATOR);
        line.push_str(&resolved_field_value(
            Some(schema),
            table,
            document,
            segment_id,
            field,
            None,
        ));
    }
    line
}

/// Encode the message header.
///
/// MSH-1 is the separator text itself and lands directly after the
/// identifier; MSH-2 carries the encoding characters. Fields from 3 up
/// follow the usual separator-prefixed pattern, with the resolved MSH-1
/// text as the separator. When the first two fields resolve empty they
/// fall back to `|` and `^~\&`, and without a dictionary entry the header
/// still renders [`DEFAULT_HEADER_FIELD_COUNT`] fields.
pub fn encode_header(
    schema: Option<&SegmentSchema>,
    table: &MappingTable,
    document: &Value,
    overrides: &HeaderOverrides,
) -> String {
    let max_field = schema.map_or(DEFAULT_HEADER_FIELD_COUNT, |schema| schema.max_field);
    let resolved = |field: u32| {
        resolved_field_value(
            schema,
            table,
            document,
            HEADER_SEGMENT_ID,
            field,
            Some(overrides),
        )
    };

    let mut separator = resolved(1);
    if separator.is_empty() {
        separator.push(FIELD_SEPARATOR);
    }
    let mut encoding = resolved(2);
    if encoding.is_empty() {
        encoding.push_str(ENCODING_CHARACTERS);
    }

    let mut line = String::from(HEADER_SEGMENT_ID);
    line.push_str(&separator);
    line.push_str(&encoding);
    for field in 3..=max_field {
        line.push_str(&separator);
        line.push_str(&resolved(field));
    }
    line
}
