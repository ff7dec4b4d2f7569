use std::collections::BTreeMap;

use hl7_model::Mapping;
use hl7_path::normalize;

/// Bindings from document paths to `(segment, field)` destinations.
///
/// At most one binding exists per pair; inserting a duplicate pair replaces
/// the prior entry. Paths are normalized on insert, so the table only ever
/// holds canonical text. Iteration is sorted by segment identifier, then
/// field number, which fixes the display order; encoding does not depend on
/// it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    entries: BTreeMap<String, BTreeMap<u32, String>>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `(segment, field)` to a source path, replacing any prior
    /// binding for the pair. The path text is normalized before storage; no
    /// schema validation happens here, validity is checked at encode time.
    pub fn upsert(&mut self, segment: impl Into<String>, field: u32, source_path: &str) {
        self.entries
            .entry(segment.into())
            .or_default()
            .insert(field, normalize(source_path));
    }

    /// Delete the binding for `(segment, field)`. Returns whether one
    /// existed; removing an absent binding is a no-op.
    pub fn remove(&mut self, segment: &str, field: u32) -> bool {
        let Some(fields) = self.entries.get_mut(segment) else {
            return false;
        };
        let removed = fields.remove(&field).is_some();
        if fields.is_empty() {
            self.entries.remove(segment);
        }
        removed
    }

    pub fn lookup(&self, segment: &str, field: u32) -> Option<&str> {
        self.entries
            .get(segment)
            .and_then(|fields| fields.get(&field))
            .map(String::as_str)
    }

    /// True when any binding's canonical path equals the normalized form of
    /// `path`. Used to flag a document key as already in use. Empty path
    /// text never counts as mapped.
    pub fn is_path_mapped(&self, path: &str) -> bool {
        let canonical = normalize(path);
        if canonical.is_empty() {
            return false;
        }
        self.entries
            .values()
            .flat_map(BTreeMap::values)
            .any(|stored| *stored == canonical)
    }

    pub fn has_segment(&self, segment: &str) -> bool {
        self.entries.contains_key(segment)
    }

    /// Segment identifiers with at least one binding, in sorted order.
    pub fn segment_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Sorted display view of every binding.
    pub fn mappings(&self) -> Vec<Mapping> {
        self.entries
            .iter()
            .flat_map(|(segment, fields)| {
                fields
                    .iter()
                    .map(|(field, path)| Mapping::new(segment.clone(), *field, path.clone()))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Mapping> for MappingTable {
    /// Build a table by upserting in iteration order, so later duplicates
    /// of a `(segment, field)` pair win.
    fn from_iter<I: IntoIterator<Item = Mapping>>(iter: I) -> Self {
        let mut table = MappingTable::new();
        for mapping in iter {
            table.upsert(mapping.segment, mapping.field, &mapping.source_path);
        }
        table
    }
}
