//! Conversion pipeline shared by the CLI commands.
//!
//! The stages are plain functions over owned inputs so they can be driven
//! from tests without a terminal: load the document, load the mapping
//! file, pick a dictionary version, then assemble the message.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Local;
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use hl7_encode::{HeaderOverrides, MessageBuilder};
use hl7_map::MappingTable;
use hl7_model::{Mapping, SchemaMap};
use hl7_standards::{load_segment_schemas, resolve_version};

/// Outcome of one document conversion.
#[derive(Debug, Clone)]
pub struct ConvertOutcome {
    /// Dictionary version the message was encoded against.
    pub version: String,
    /// Assembled message text, one segment per line.
    pub message: String,
    /// Mapping rows for the summary table, in segment then field order.
    pub rows: Vec<MappingRow>,
}

/// One mapping plus the field label its dictionary assigns.
#[derive(Debug, Clone)]
pub struct MappingRow {
    pub mapping: Mapping,
    pub label: String,
}

/// Read and parse a JSON document. A malformed document fails here,
/// before any mapping or encoding work starts.
pub fn load_document(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read document {}", path.display()))?;
    let document = serde_json::from_str(&text)
        .with_context(|| format!("parse document {}", path.display()))?;
    Ok(document)
}

/// Read a mapping file (a JSON array of `{segment, field, sourcePath}`
/// records) into a table. Source paths are canonicalized on insert and a
/// later record for the same `(segment, field)` slot replaces the earlier
/// one.
pub fn load_mappings(path: &Path) -> Result<MappingTable> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read mappings {}", path.display()))?;
    let mappings: Vec<Mapping> = serde_json::from_str(&text)
        .with_context(|| format!("parse mappings {}", path.display()))?;
    for mapping in &mappings {
        if mapping.segment.trim().is_empty() {
            bail!("mapping with empty segment id in {}", path.display());
        }
        if mapping.field == 0 {
            bail!(
                "mapping {} -> {}: field numbers start at 1",
                mapping.segment,
                mapping.source_path
            );
        }
    }
    debug!(mappings = mappings.len(), "Loaded mapping file");
    Ok(mappings.into_iter().collect())
}

/// Pick the dictionary version for `requested` (`None` asks for the
/// default) and load its segment schemas.
pub fn resolve_dictionaries(root: &Path, requested: Option<&str>) -> Result<(String, SchemaMap)> {
    let version = resolve_version(root, requested.unwrap_or_default())
        .with_context(|| format!("resolve dictionary version under {}", root.display()))?;
    let schemas = load_segment_schemas(root, &version)
        .with_context(|| format!("load version {} dictionaries from {}", version, root.display()))?;
    Ok((version, schemas))
}

/// Header values computed at encode time: the local timestamp, a fresh
/// v4 control id, and the resolved version.
pub fn message_overrides(version: &str) -> HeaderOverrides {
    HeaderOverrides::new()
        .with_timestamp(Local::now().format("%Y%m%d%H%M%S").to_string())
        .with_control_id(Uuid::new_v4().to_string())
        .with_version(version)
}

/// Assemble the message and collect the mapping summary rows.
///
/// `mandatory` replaces the built-in always-included segments when given;
/// the overrides are injected by the caller so tests can pin the
/// timestamp and control id.
pub fn convert(
    schemas: &SchemaMap,
    table: &MappingTable,
    document: &Value,
    version: &str,
    mandatory: Option<&[String]>,
    overrides: HeaderOverrides,
) -> Result<ConvertOutcome> {
    let mut builder = MessageBuilder::new(schemas, table).with_overrides(overrides);
    if let Some(mandatory) = mandatory {
        builder = builder.with_mandatory_segments(mandatory.iter().cloned());
    }
    let message = builder.build(document)?;

    let rows = table
        .mappings()
        .into_iter()
        .map(|mapping| {
            let label = match schemas.get(&mapping.segment) {
                Some(schema) => schema.label(mapping.field),
                None => format!("Field {}", mapping.field),
            };
            MappingRow { mapping, label }
        })
        .collect();

    info!(
        version = %version,
        segments = message.lines().count(),
        mappings = table.len(),
        "Converted document"
    );
    Ok(ConvertOutcome {
        version: version.to_string(),
        message,
        rows,
    })
}
