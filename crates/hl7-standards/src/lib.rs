#![deny(unsafe_code)]

//! Versioned HL7 v2 segment dictionaries.
//!
//! Dictionaries live on disk as one directory per version under the
//! standards root (`standards/2.3/`, `standards/2.4/`, ...), each holding a
//! `segments.csv` of segment descriptions and a `fields.csv` of per-field
//! labels and optionality. [`load_segment_schemas`] turns one version into
//! the [`hl7_model::SchemaMap`] the encoder consumes; [`resolve_version`]
//! implements the fallback for versions not on disk.

pub mod error;
pub mod loaders;

pub use crate::error::{Result, StandardsError};
pub use crate::loaders::{
    DEFAULT_VERSION, default_standards_root, load_segment_schemas, message_header_defaults,
    resolve_version, supported_versions,
};
