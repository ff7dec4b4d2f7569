//! Library components of the HL7 mapping CLI.
//!
//! Argument parsing and table rendering stay in the binary; the logging
//! setup and the conversion pipeline live here so integration tests can
//! drive them in process.

pub mod logging;
pub mod pipeline;
