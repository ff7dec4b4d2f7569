//! Message assembly: segment inclusion, validation, ordering and joining.

use std::collections::BTreeSet;

use hl7_map::MappingTable;
use hl7_model::{HEADER_SEGMENT_ID, SchemaMap};
use serde_json::Value;

use crate::error::{BuildError, Result};
use crate::overrides::HeaderOverrides;
use crate::segment::{encode_header, encode_segment, resolved_field_value};

/// Segments included in every message whether or not they carry mappings,
/// as long as the dictionary defines them.
pub const DEFAULT_MANDATORY_SEGMENTS: &[&str] = &["PID", "PV1"];

/// Assembles a complete message from a dictionary, a mapping table and a
/// document.
///
/// The header is always included. Mandatory segments join whenever the
/// dictionary defines them; any other segment joins only when at least one
/// mapping targets it. Before anything is rendered, every required field of
/// every included segment must resolve to non-empty text, otherwise the
/// whole build aborts on the first gap in message order. Nothing partial is
/// ever returned.
#[derive(Debug, Clone)]
pub struct MessageBuilder<'a> {
    schemas: &'a SchemaMap,
    table: &'a MappingTable,
    mandatory_segments: Vec<String>,
    overrides: HeaderOverrides,
}

impl<'a> MessageBuilder<'a> {
    pub fn new(schemas: &'a SchemaMap, table: &'a MappingTable) -> Self {
        Self {
            schemas,
            table,
            mandatory_segments: DEFAULT_MANDATORY_SEGMENTS
                .iter()
                .map(ToString::to_string)
                .collect(),
            overrides: HeaderOverrides::new(),
        }
    }

    /// Replace the always-included segment set.
    #[must_use]
    pub fn with_mandatory_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mandatory_segments = segments.into_iter().map(Into::into).collect();
        self
    }

    /// Supply the computed header values for this message.
    #[must_use]
    pub fn with_overrides(mut self, overrides: HeaderOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Validate and render the message, one encoded segment per line.
    pub fn build(&self, document: &Value) -> Result<String> {
        let order = self.segment_order();
        self.validate(&order, document)?;

        let mut lines = Vec::with_capacity(order.len());
        for segment_id in &order {
            if segment_id == HEADER_SEGMENT_ID {
                lines.push(encode_header(
                    self.schemas.get(HEADER_SEGMENT_ID),
                    self.table,
                    document,
                    &self.overrides,
                ));
            } else if let Some(schema) = self.schemas.get(segment_id) {
                lines.push(encode_segment(segment_id, schema, self.table, document));
            }
        }
        tracing::debug!(segments = lines.len(), "Assembled message");
        Ok(lines.join("\n"))
    }

    /// Included segments in message order: the header first, then mandatory
    /// segments, then mapped segments, alphabetical within each group.
    fn segment_order(&self) -> Vec<String> {
        let mut included = BTreeSet::new();
        for segment in &self.mandatory_segments {
            if self.schemas.contains_key(segment) {
                included.insert(segment.clone());
            }
        }
        for segment in self.table.segment_ids() {
            if self.schemas.contains_key(segment) {
                included.insert(segment.to_string());
            }
        }
        included.remove(HEADER_SEGMENT_ID);

        let (mandatory, rest): (Vec<String>, Vec<String>) = included
            .into_iter()
            .partition(|segment| self.is_mandatory(segment));

        let mut order = vec![HEADER_SEGMENT_ID.to_string()];
        order.extend(mandatory);
        order.extend(rest);
        order
    }

    fn is_mandatory(&self, segment: &str) -> bool {
        self.mandatory_segments
            .iter()
            .any(|mandatory| mandatory == segment)
    }

    fn validate(&self, order: &[String], document: &Value) -> Result<()> {
        for segment_id in order {
            let Some(schema) = self.schemas.get(segment_id) else {
                continue;
            };
            let overrides = (segment_id == HEADER_SEGMENT_ID).then_some(&self.overrides);
            for &field in &schema.required_fields {
                let value = resolved_field_value(
                    Some(schema),
                    self.table,
                    document,
                    segment_id,
                    field,
                    overrides,
                );
                if value.is_empty() {
                    return Err(BuildError::missing_required(segment_id.clone(), field));
                }
            }
        }
        Ok(())
    }
}

/// One-call assembly with the default mandatory segments.
pub fn build_message(
    schemas: &SchemaMap,
    table: &MappingTable,
    document: &Value,
    overrides: HeaderOverrides,
) -> Result<String> {
    MessageBuilder::new(schemas, table)
        .with_overrides(overrides)
        .build(document)
}
