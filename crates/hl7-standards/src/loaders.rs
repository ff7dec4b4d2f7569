use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;

use hl7_model::{ENCODING_CHARACTERS, FIELD_SEPARATOR, HEADER_SEGMENT_ID, SchemaMap, SegmentSchema};

use crate::error::{Result, StandardsError};

const STANDARDS_ENV_VAR: &str = "HL7_STANDARDS_DIR";

/// Version preferred when a requested version is not on disk.
pub const DEFAULT_VERSION: &str = "2.3";

/// Root of the on-disk dictionaries: the `HL7_STANDARDS_DIR` environment
/// variable when set, otherwise the repository `standards/` directory.
pub fn default_standards_root() -> PathBuf {
    if let Ok(root) = std::env::var(STANDARDS_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}

/// Dictionary versions available under `root`, one per subdirectory,
/// sorted numerically where components allow (`2.3` before `2.5.1`).
pub fn supported_versions(root: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(root).map_err(|source| StandardsError::io(root, source))?;
    let mut versions = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| StandardsError::io(root, source))?;
        if !entry.path().is_dir() {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            versions.push(name);
        }
    }
    versions.sort_by(|a, b| compare_versions(a, b));
    Ok(versions)
}

/// Pick the version to load: the requested one when present, else
/// [`DEFAULT_VERSION`] when present, else the lowest supported version.
/// Fails only when no versions exist at all.
pub fn resolve_version(root: &Path, requested: &str) -> Result<String> {
    let versions = supported_versions(root)?;
    if versions.iter().any(|version| version == requested) {
        return Ok(requested.to_string());
    }
    if versions.iter().any(|version| version == DEFAULT_VERSION) {
        return Ok(DEFAULT_VERSION.to_string());
    }
    versions
        .into_iter()
        .next()
        .ok_or_else(|| StandardsError::NoVersions {
            root: root.to_path_buf(),
        })
}

/// Load the segment dictionaries for one exact version directory.
///
/// `segments.csv` supplies descriptions, `fields.csv` supplies per-field
/// labels and optionality (`R` marks a required field; the other HL7
/// optionality codes are carried in the data but not enforced). The header
/// segment additionally receives the encode-time defaults from
/// [`message_header_defaults`], with the version id default set to the
/// version being loaded, so a fallback is visible in the output.
pub fn load_segment_schemas(root: &Path, version: &str) -> Result<SchemaMap> {
    let base = root.join(version);
    let segments = read_csv_rows(&base.join("segments.csv"))?;
    let fields = read_csv_rows(&base.join("fields.csv"))?;

    let mut schemas = SchemaMap::new();
    for row in &segments {
        let segment = row.get("Segment").cloned().unwrap_or_default().to_uppercase();
        if segment.is_empty() {
            continue;
        }
        let description = row.get("Description").cloned().unwrap_or_default();
        schemas.insert(segment, SegmentSchema::new(description, 0));
    }

    for row in &fields {
        let segment = row.get("Segment").cloned().unwrap_or_default().to_uppercase();
        if segment.is_empty() {
            continue;
        }
        let Some(field) = row.get("Field").and_then(|raw| raw.parse::<u32>().ok()) else {
            continue;
        };
        if field == 0 {
            continue;
        }
        let schema = schemas.entry(segment).or_default();
        schema.max_field = schema.max_field.max(field);
        if let Some(label) = row.get("Label").filter(|label| !label.is_empty()) {
            schema.labels.insert(field, label.clone());
        }
        if row
            .get("Optionality")
            .is_some_and(|code| code.eq_ignore_ascii_case("R"))
        {
            schema.required_fields.insert(field);
        }
    }

    if let Some(header) = schemas.get_mut(HEADER_SEGMENT_ID) {
        header.defaults = message_header_defaults(version);
    }

    tracing::debug!(
        version,
        segments = schemas.len(),
        "Loaded segment dictionaries"
    );
    Ok(schemas)
}

/// Static header-segment defaults applied at encode time: delimiters,
/// the sending/receiving identities of this application, the `ADT^A01`
/// message type, production processing, and the dictionary version id.
pub fn message_header_defaults(version: &str) -> BTreeMap<u32, String> {
    BTreeMap::from([
        (1, FIELD_SEPARATOR.to_string()),
        (2, ENCODING_CHARACTERS.to_string()),
        (3, "HL7MAP".to_string()),
        (4, "HOSP".to_string()),
        (5, "HL7SYS".to_string()),
        (6, "HOSP".to_string()),
        (9, "ADT^A01".to_string()),
        (11, "P".to_string()),
        (12, version.to_string()),
    ])
}

fn read_csv_rows(path: &Path) -> Result<Vec<BTreeMap<String, String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|error| StandardsError::csv(path, error.to_string()))?;
    let headers = reader
        .headers()
        .map_err(|error| StandardsError::csv(path, error.to_string()))?
        .clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|error| StandardsError::csv(path, error.to_string()))?;
        let mut row = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            let key = headers
                .get(idx)
                .unwrap_or("")
                .trim_matches('\u{feff}')
                .to_string();
            row.insert(key, value.trim().to_string());
        }
        rows.push(row);
    }
    Ok(rows)
}

fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ordering = match (l.parse::<u32>(), r.parse::<u32>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    _ => l.cmp(r),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::compare_versions;
    use std::cmp::Ordering;

    #[test]
    fn versions_compare_numerically_per_component() {
        assert_eq!(compare_versions("2.3", "2.4"), Ordering::Less);
        assert_eq!(compare_versions("2.5", "2.5.1"), Ordering::Less);
        assert_eq!(compare_versions("2.10", "2.9"), Ordering::Greater);
        assert_eq!(compare_versions("2.3", "2.3"), Ordering::Equal);
    }
}
