//! Schema-aware segment encoding and message assembly.
//!
//! This crate turns a JSON document, a [`hl7_map::MappingTable`] and one
//! version's segment dictionaries into HL7 v2 message text. Field values
//! resolve by priority: caller-supplied header overrides, then mapped
//! document values, then dictionary defaults. The header segment gets its
//! special treatment (MSH-1 is the separator itself, MSH-2 the encoding
//! characters) and [`MessageBuilder`] owns segment inclusion, required
//! field validation and ordering.
//!
//! Resolved text is written as-is; escaping reserved characters inside
//! field values is out of scope here.
//!
//! # Example
//!
//! ```
//! use hl7_map::MappingTable;
//! use hl7_model::{SchemaMap, SegmentSchema};
//! use serde_json::json;
//!
//! let mut schemas = SchemaMap::new();
//! schemas.insert(
//!     "PID".to_string(),
//!     SegmentSchema::new("Patient Identification", 5).with_required([3]),
//! );
//!
//! let mut table = MappingTable::new();
//! table.upsert("PID", 3, "$.patient.id");
//!
//! let document = json!({"patient": {"id": "P1"}});
//! let message = hl7_encode::MessageBuilder::new(&schemas, &table)
//!     .with_mandatory_segments(["PID"])
//!     .build(&document)?;
//!
//! assert_eq!(message.lines().last(), Some("PID|||P1||"));
//! # Ok::<(), hl7_encode::BuildError>(())
//! ```

pub mod error;
pub mod message;
pub mod overrides;
pub mod segment;

pub use error::{BuildError, Result};
pub use message::{DEFAULT_MANDATORY_SEGMENTS, MessageBuilder, build_message};
pub use overrides::{CONTROL_ID_FIELD, HeaderOverrides, TIMESTAMP_FIELD, VERSION_FIELD};
pub use segment::{DEFAULT_HEADER_FIELD_COUNT, encode_header, encode_segment};
