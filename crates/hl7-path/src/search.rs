//! Key search and path inference over whole documents.

use serde_json::Value;

use crate::error::{PathError, Result};
use crate::normalize::{normalize, strip_quote_pair};

/// Default cap on key-search results.
pub const DEFAULT_MAX_MATCHES: usize = 25;

/// Collect the canonical paths of every object entry whose key exactly
/// equals `key`, in depth-first traversal order, stopping at `max_matches`.
///
/// A matching entry is recorded before its value is descended into, so a
/// `code` object nested inside another `code` entry contributes both paths.
/// Owned JSON trees cannot self-reference, so the walk is bounded by the
/// document size and the match cap.
pub fn find_paths_for_key(document: &Value, key: &str, max_matches: usize) -> Vec<String> {
    let mut matches = Vec::new();
    if max_matches > 0 {
        visit(document, "$", key, max_matches, &mut matches);
    }
    matches
}

fn visit(node: &Value, path: &str, key: &str, max_matches: usize, matches: &mut Vec<String>) {
    if matches.len() >= max_matches {
        return;
    }
    match node {
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                visit(item, &format!("{}[{}]", path, index), key, max_matches, matches);
            }
        }
        Value::Object(entries) => {
            for (entry_key, value) in entries {
                let child = format!("{}.{}", path, entry_key);
                if entry_key == key {
                    matches.push(child.clone());
                    if matches.len() >= max_matches {
                        return;
                    }
                }
                visit(value, &child, key, max_matches, matches);
            }
        }
        _ => {}
    }
}

/// Turn loosely specified user input into a canonical path.
///
/// Surrounding quotes are stripped first, so a drop payload like `"id"`
/// counts as bare. Bare identifiers (letters, digits, underscore,
/// optionally prefixed with `$.` or `.`) are scoped under `base` when one
/// is active and not the root. Without a base, a document-wide key search
/// accepts a unique match, reports [`PathError::AmbiguousKey`] for several,
/// and falls through for none. Anything else, including zero-match
/// identifiers, normalizes as a literal path. Empty input means "no path"
/// and yields `Ok(None)`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
///
/// let document = json!({"patient": {"id": "P1"}, "order": {"id": "O9"}});
///
/// let scoped = hl7_path::infer_path("id", Some("$.patient"), Some(&document));
/// assert_eq!(scoped.unwrap().as_deref(), Some("$.patient.id"));
///
/// let ambiguous = hl7_path::infer_path("id", None, Some(&document));
/// assert!(ambiguous.is_err());
/// ```
pub fn infer_path(
    dropped: &str,
    base: Option<&str>,
    document: Option<&Value>,
) -> Result<Option<String>> {
    let text = strip_quote_pair(dropped.trim()).trim();
    if text.is_empty() {
        return Ok(None);
    }

    if let Some(key) = bare_identifier(text) {
        let base = base.map(str::trim);
        if let Some(base) = base.filter(|base| !base.is_empty() && *base != "$") {
            return Ok(Some(normalize(&format!("{}.{}", base, key))));
        }
        if let Some(document) = document {
            let mut matches = find_paths_for_key(document, key, DEFAULT_MAX_MATCHES);
            match matches.len() {
                0 => {}
                1 => return Ok(Some(matches.remove(0))),
                _ => return Err(PathError::ambiguous_key(key, matches)),
            }
        }
    }

    Ok(Some(normalize(text)))
}

/// Match `key`, `.key`, `$.key` or `$..key` where key is one identifier.
fn bare_identifier(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("$.").unwrap_or(text);
    let rest = rest.strip_prefix('.').unwrap_or(rest);
    if !rest.is_empty()
        && rest
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
    {
        Some(rest)
    } else {
        None
    }
}
