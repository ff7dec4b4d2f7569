//! Canonicalization of free-form path text.

/// Normalize free-form path text into canonical form.
///
/// Trims whitespace, strips one surrounding pair of quote characters, and
/// roots the result: empty input stays empty (meaning "no path"), text
/// already starting with `$` is returned unchanged, a leading `.` gets `$`
/// prefixed, and anything else gets `$.` prefixed.
///
/// The function is idempotent: every non-empty output starts with `$`, which
/// no rule rewrites.
///
/// # Examples
///
/// ```
/// use hl7_path::normalize;
///
/// assert_eq!(normalize("patient.id"), "$.patient.id");
/// assert_eq!(normalize(".patient.id"), "$.patient.id");
/// assert_eq!(normalize("  \"$.patient.id\"  "), "$.patient.id");
/// assert_eq!(normalize("$"), "$");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(text: &str) -> String {
    let unquoted = strip_quote_pair(text.trim()).trim();
    if unquoted.is_empty() {
        String::new()
    } else if unquoted.starts_with('$') {
        unquoted.to_string()
    } else if unquoted.starts_with('.') {
        format!("${}", unquoted)
    } else {
        format!("$.{}", unquoted)
    }
}

/// Strip one layer of surrounding quotes, only when both ends carry one.
/// A lone leading or trailing quote is kept.
pub(crate) fn strip_quote_pair(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 && is_quote(bytes[0]) && is_quote(bytes[bytes.len() - 1]) {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

fn is_quote(byte: u8) -> bool {
    byte == b'"' || byte == b'\''
}
