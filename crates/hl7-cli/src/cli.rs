//! CLI argument definitions for the HL7 mapping tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "hl7map",
    version,
    about = "HL7 Mapper - Convert JSON documents to HL7 v2 messages",
    long_about = "Convert hierarchical JSON documents to HL7 v2 message text.\n\n\
                  A mapping file binds document paths to segment fields; versioned\n\
                  segment dictionaries supply field counts, labels, required fields\n\
                  and header defaults."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient-level values in trace logs (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a JSON document to an HL7 message using a mapping file.
    Convert(ConvertArgs),

    /// List a version's segment dictionary, or one segment's fields.
    Segments(SegmentsArgs),

    /// Search a JSON document for a key and print the matching paths.
    Find(FindArgs),

    /// List the available dictionary versions.
    Versions(VersionsArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Path to the JSON document to convert.
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Mapping file: a JSON array of {segment, field, sourcePath} records.
    #[arg(long = "mappings", value_name = "PATH")]
    pub mappings: PathBuf,

    /// HL7 version to encode against (unavailable versions fall back).
    #[arg(long = "hl7-version", value_name = "VERSION")]
    pub hl7_version: Option<String>,

    /// Directory holding the versioned segment dictionaries.
    #[arg(long = "standards-dir", value_name = "DIR")]
    pub standards_dir: Option<PathBuf>,

    /// Write the message to a file instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Segment to include even without mappings (repeatable; default PID and PV1).
    #[arg(long = "mandatory", value_name = "SEGMENT")]
    pub mandatory: Vec<String>,
}

#[derive(Parser)]
pub struct SegmentsArgs {
    /// Show this segment's fields instead of the segment list.
    #[arg(value_name = "SEGMENT")]
    pub segment: Option<String>,

    /// HL7 version to list (unavailable versions fall back).
    #[arg(long = "hl7-version", value_name = "VERSION")]
    pub hl7_version: Option<String>,

    /// Directory holding the versioned segment dictionaries.
    #[arg(long = "standards-dir", value_name = "DIR")]
    pub standards_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct FindArgs {
    /// Path to the JSON document to search.
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Object key to look for.
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Stop after this many matches.
    #[arg(long = "limit", value_name = "N", default_value_t = hl7_path::DEFAULT_MAX_MATCHES)]
    pub limit: usize,

    /// Resolve the key against this base path instead of searching.
    #[arg(long = "base", value_name = "PATH")]
    pub base: Option<String>,
}

#[derive(Parser)]
pub struct VersionsArgs {
    /// Directory holding the versioned segment dictionaries.
    #[arg(long = "standards-dir", value_name = "DIR")]
    pub standards_dir: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
