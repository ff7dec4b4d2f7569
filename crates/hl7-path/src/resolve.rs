//! Tokenization and evaluation of canonical paths.

use hl7_model::{Path, PathStep};
use serde_json::Value;

use crate::normalize::normalize;

/// Tokenize canonical or near-canonical path text into steps.
///
/// A leading `$` and a leading `.` are stripped, the rest splits on `.` for
/// key steps and `[n]` for index steps. Tokenization is total: a bracket
/// without a closing `]`, or whose content is not all digits, truncates the
/// steps at that point instead of failing. Empty key tokens are dropped, so
/// `$`, `$.` and `` all yield the empty path.
///
/// # Examples
///
/// ```
/// use hl7_path::tokenize;
///
/// assert_eq!(tokenize("$.patient.visits[0].id").to_string(), "$.patient.visits[0].id");
/// assert_eq!(tokenize("$.patient.visits[0").to_string(), "$.patient.visits");
/// assert_eq!(tokenize("$").to_string(), "$");
/// ```
pub fn tokenize(text: &str) -> Path {
    let working = text.strip_prefix('$').unwrap_or(text);
    let working = working.strip_prefix('.').unwrap_or(working);

    let mut path = Path::root();
    if working.is_empty() {
        return path;
    }

    'parts: for part in working.split('.') {
        let mut remaining = part;
        while !remaining.is_empty() {
            let Some(bracket) = remaining.find('[') else {
                path.push(PathStep::key(remaining));
                break;
            };
            if bracket > 0 {
                path.push(PathStep::key(&remaining[..bracket]));
            }
            let after = &remaining[bracket + 1..];
            let Some(close) = after.find(']') else {
                break 'parts;
            };
            let content = &after[..close];
            if content.is_empty() || !content.bytes().all(|b| b.is_ascii_digit()) {
                break 'parts;
            }
            let Ok(index) = content.parse::<usize>() else {
                break 'parts;
            };
            path.push(PathStep::Index(index));
            remaining = &after[close + 1..];
        }
    }
    path
}

/// Resolve a path against a document, one step at a time.
///
/// A key step requires the current value to be an object; lookup is
/// exact-match first, then the first case-insensitive match in insertion
/// order (documents with inconsistent key casing are common in practice).
/// An index step requires an in-bounds array position. Any step that does
/// not apply, including null at an intermediate step, yields `None`.
/// Absence is a normal outcome, not an error.
pub fn resolve<'a>(document: &'a Value, path: &Path) -> Option<&'a Value> {
    let mut current = document;
    for step in path {
        match step {
            PathStep::Key(key) => {
                let entries = current.as_object()?;
                current = match entries.get(key) {
                    Some(value) => value,
                    None => entries
                        .iter()
                        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(key))
                        .map(|(_, value)| value)?,
                };
            }
            PathStep::Index(index) => {
                current = current.as_array()?.get(*index)?;
            }
        }
    }
    Some(current)
}

/// Resolve free-form path text: normalize, tokenize, then [`resolve`].
///
/// Because normalization runs first, resolving a path and resolving its
/// normalized form always yield the same value.
pub fn resolve_text<'a>(document: &'a Value, text: &str) -> Option<&'a Value> {
    resolve(document, &tokenize(&normalize(text)))
}

/// Render a resolved value as field text.
///
/// Null becomes the empty string, strings pass through unchanged, booleans
/// and numbers use their literal form, and composite values serialize to
/// compact JSON (deterministic, insertion order preserved).
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        composite => serde_json::to_string(composite).unwrap_or_default(),
    }
}
