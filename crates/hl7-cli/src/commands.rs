//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::{info_span, trace};

use hl7_cli::logging::redact_value;
use hl7_cli::pipeline::{
    convert, load_document, load_mappings, message_overrides, resolve_dictionaries,
};
use hl7_encode::DEFAULT_MANDATORY_SEGMENTS;
use hl7_model::{HEADER_SEGMENT_ID, SchemaMap};
use hl7_path::{find_paths_for_key, infer_path, resolve_text, value_text};
use hl7_standards::{
    default_standards_root, load_segment_schemas, resolve_version, supported_versions,
};

use crate::cli::{ConvertArgs, FindArgs, SegmentsArgs, VersionsArgs};
use crate::summary::{apply_table_style, print_convert_summary};

pub fn run_convert(args: &ConvertArgs) -> Result<()> {
    let convert_span = info_span!("convert", document = %args.document.display());
    let _convert_guard = convert_span.enter();

    let document = load_document(&args.document)?;
    let table = load_mappings(&args.mappings)?;
    let root = standards_root(args.standards_dir.as_deref());
    let (version, schemas) = resolve_dictionaries(&root, args.hl7_version.as_deref())?;

    let mandatory = (!args.mandatory.is_empty()).then_some(args.mandatory.as_slice());
    let overrides = message_overrides(&version);
    let outcome = convert(&schemas, &table, &document, &version, mandatory, overrides)?;
    trace!(content = redact_value(&outcome.message), "Assembled message text");

    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", outcome.message))
                .with_context(|| format!("write message {}", path.display()))?;
            print_convert_summary(&outcome, Some(path));
        }
        None => println!("{}", outcome.message),
    }
    Ok(())
}

pub fn run_segments(args: &SegmentsArgs) -> Result<()> {
    let root = standards_root(args.standards_dir.as_deref());
    let (version, schemas) = resolve_dictionaries(&root, args.hl7_version.as_deref())?;

    match &args.segment {
        Some(segment) => print_segment_fields(&version, &schemas, segment),
        None => {
            print_segment_list(&version, &schemas);
            Ok(())
        }
    }
}

fn print_segment_fields(version: &str, schemas: &SchemaMap, segment: &str) -> Result<()> {
    let id = segment.trim().to_uppercase();
    let Some(schema) = schemas.get(&id) else {
        bail!("segment {} is not in the version {} dictionary", id, version);
    };
    println!("{} - {} (version {})", id, schema.description, version);
    let mut table = Table::new();
    table.set_header(vec!["Field", "Label", "Required", "Default"]);
    apply_table_style(&mut table);
    for field in 1..=schema.max_field {
        let required = if schema.is_required(field) { "yes" } else { "" };
        table.add_row(vec![
            field.to_string(),
            schema.label(field),
            required.to_string(),
            schema.default_value(field).unwrap_or_default().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn print_segment_list(version: &str, schemas: &SchemaMap) {
    println!("Segment dictionary for version {}", version);
    let mut table = Table::new();
    table.set_header(vec![
        "Segment",
        "Description",
        "Fields",
        "Required",
        "Always Included",
    ]);
    apply_table_style(&mut table);
    for (id, schema) in schemas {
        let required: Vec<String> = schema
            .required_fields
            .iter()
            .map(ToString::to_string)
            .collect();
        let always = id.as_str() == HEADER_SEGMENT_ID
            || DEFAULT_MANDATORY_SEGMENTS.contains(&id.as_str());
        table.add_row(vec![
            id.clone(),
            schema.description.clone(),
            schema.max_field.to_string(),
            required.join(", "),
            if always { "yes" } else { "" }.to_string(),
        ]);
    }
    println!("{table}");
}

pub fn run_find(args: &FindArgs) -> Result<()> {
    let document = load_document(&args.document)?;

    let matches: Vec<String> = match args.base.as_deref() {
        Some(base) => infer_path(&args.key, Some(base), Some(&document))?
            .into_iter()
            .collect(),
        None => find_paths_for_key(&document, &args.key, args.limit),
    };
    if matches.is_empty() {
        println!("no matches for \"{}\"", args.key);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Path", "Value"]);
    apply_table_style(&mut table);
    for path in &matches {
        let value = resolve_text(&document, path)
            .map(value_text)
            .unwrap_or_default();
        table.add_row(vec![path.clone(), value]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_versions(args: &VersionsArgs) -> Result<()> {
    let root = standards_root(args.standards_dir.as_deref());
    let versions = supported_versions(&root)
        .with_context(|| format!("list dictionary versions under {}", root.display()))?;
    if versions.is_empty() {
        bail!("no dictionary versions under {}", root.display());
    }
    let default = resolve_version(&root, "")?;

    let mut table = Table::new();
    table.set_header(vec!["Version", "Segments", "Default"]);
    apply_table_style(&mut table);
    for version in &versions {
        let schemas = load_segment_schemas(&root, version)
            .with_context(|| format!("load version {} dictionaries", version))?;
        table.add_row(vec![
            version.clone(),
            schemas.len().to_string(),
            if *version == default { "yes" } else { "" }.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn standards_root(dir: Option<&Path>) -> PathBuf {
    dir.map_or_else(default_standards_root, Path::to_path_buf)
}
