#![deny(unsafe_code)]

//! The mapping table: user-declared bindings from document paths to
//! segment fields, with replace-on-conflict semantics.

pub mod table;

pub use table::MappingTable;
