#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// A bare key matched more than one location; the caller has to narrow
    /// the search (for example by scoping to a base object) before mapping.
    #[error("key \"{key}\" appears {count} times in the document; select a base object first")]
    AmbiguousKey {
        key: String,
        count: usize,
        matches: Vec<String>,
    },
}

impl PathError {
    pub(crate) fn ambiguous_key(key: impl Into<String>, matches: Vec<String>) -> Self {
        Self::AmbiguousKey {
            key: key.into(),
            count: matches.len(),
            matches,
        }
    }
}

pub type Result<T> = std::result::Result<T, PathError>;
