//! Computed header values injected by the caller.

use std::collections::BTreeMap;

/// Header field carrying the message timestamp (MSH-7).
pub const TIMESTAMP_FIELD: u32 = 7;
/// Header field carrying the message control identifier (MSH-10).
pub const CONTROL_ID_FIELD: u32 = 10;
/// Header field carrying the dictionary version (MSH-12).
pub const VERSION_FIELD: u32 = 12;

/// Per-message header values that outrank mappings and schema defaults.
///
/// The encoder itself never touches a clock or an identifier source; the
/// caller generates timestamp, control id and version once per message and
/// injects them here, which keeps encoding a pure function of its inputs.
/// Overrides apply to the header segment only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderOverrides {
    values: BTreeMap<u32, String>,
}

impl HeaderOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.values.insert(TIMESTAMP_FIELD, timestamp.into());
        self
    }

    #[must_use]
    pub fn with_control_id(mut self, control_id: impl Into<String>) -> Self {
        self.values.insert(CONTROL_ID_FIELD, control_id.into());
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.values.insert(VERSION_FIELD, version.into());
        self
    }

    /// Set an arbitrary header field override.
    pub fn set(&mut self, field: u32, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn get(&self, field: u32) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
