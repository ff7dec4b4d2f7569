//! Path query and resolution over hierarchical JSON documents.
//!
//! Paths address one location in a [`serde_json::Value`] tree using the
//! canonical text form `$.key[0].child`. This crate tokenizes and resolves
//! such paths, normalizes free-form user input into the canonical form, and
//! searches documents for keys so that loosely specified input (a bare
//! `patientId`) can be turned into an exact path.
//!
//! Resolution never fails: a path that does not lead anywhere yields `None`,
//! which downstream encoding renders as an empty field. The only error this
//! crate reports is an ambiguous inference, where a bare key occurs in
//! several places and the caller has to narrow the search.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//!
//! let document = json!({"patient": {"id": "P1", "visits": [{"ward": "3B"}]}});
//!
//! let ward = hl7_path::resolve_text(&document, "$.patient.visits[0].ward");
//! assert_eq!(ward.and_then(|v| v.as_str()), Some("3B"));
//!
//! assert_eq!(hl7_path::normalize("patient.id"), "$.patient.id");
//! assert_eq!(
//!     hl7_path::find_paths_for_key(&document, "ward", 25),
//!     vec!["$.patient.visits[0].ward".to_string()],
//! );
//! ```

pub mod error;
pub mod normalize;
pub mod resolve;
pub mod search;

pub use error::{PathError, Result};
pub use normalize::normalize;
pub use resolve::{resolve, resolve_text, tokenize, value_text};
pub use search::{DEFAULT_MAX_MATCHES, find_paths_for_key, infer_path};
