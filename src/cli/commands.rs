//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.
//! Rendering is split from printing so the output can be tested directly.

use std::fmt::Write as _;

use hostver_runtime::{Record, record_to_json};

use crate::errors::VersionError;
use crate::plugin::{FUNCTIONS, Plugin};

use super::{CliError, CliResult, ExitCode, OutputFormat, Which};

fn query_failed(what: &str, err: VersionError) -> CliError {
    CliError::failure(format!("Error: {what} query failed: {err}"))
}

/// Records selected by `which`, labelled by source.
fn select_records(plugin: &Plugin<'_>, which: Which) -> CliResult<Vec<(&'static str, Record)>> {
    let mut records = Vec::with_capacity(2);
    if matches!(which, Which::Compiled | Which::Both) {
        let record = plugin
            .get_plugin_gcc_version()
            .map_err(|e| query_failed("compiled version", e))?;
        records.push(("compiled", record));
    }
    if matches!(which, Which::Active | Which::Both) {
        let record = plugin
            .get_gcc_version()
            .map_err(|e| query_failed("active version", e))?;
        records.push(("active", record));
    }
    Ok(records)
}

/// Render one record in the requested format.
pub fn render_record(record: &Record, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Repr => Ok(record.repr()),
        OutputFormat::Json => serde_json::to_string_pretty(&record_to_json(record))
            .map_err(|e| CliError::failure(format!("Error: failed to encode JSON: {e}"))),
        OutputFormat::Fields => {
            let mut out = String::new();
            for (field, value) in record.fields() {
                // Writing to String cannot fail.
                let _ = writeln!(out, "{field}: {value}");
            }
            Ok(out.trim_end().to_string())
        }
    }
}

/// Render the output of `hostver show`.
///
/// A single record is printed bare; two records are labelled (`compiled`, `active`), as a JSON object keyed by label
/// for `--format json`.
pub fn render_show(plugin: &Plugin<'_>, which: Which, format: OutputFormat) -> CliResult<String> {
    let records = select_records(plugin, which)?;

    if let [(_, record)] = records.as_slice() {
        return render_record(record, format);
    }

    match format {
        OutputFormat::Json => {
            let object: serde_json::Map<String, serde_json::Value> = records
                .iter()
                .map(|(label, record)| (label.to_string(), record_to_json(record)))
                .collect();
            serde_json::to_string_pretty(&serde_json::Value::Object(object))
                .map_err(|e| CliError::failure(format!("Error: failed to encode JSON: {e}")))
        }
        OutputFormat::Repr => {
            let lines: Vec<String> = records
                .iter()
                .map(|(label, record)| format!("{label}: {}", record.repr()))
                .collect();
            Ok(lines.join("\n"))
        }
        OutputFormat::Fields => {
            let mut blocks = Vec::with_capacity(records.len());
            for (label, record) in &records {
                blocks.push(format!("[{label}]\n{}", render_record(record, format)?));
            }
            Ok(blocks.join("\n\n"))
        }
    }
}

/// `hostver show`
pub fn show(plugin: &Plugin<'_>, which: Which, format: OutputFormat) -> CliResult<ExitCode> {
    println!("{}", render_show(plugin, which, format)?);
    Ok(ExitCode::SUCCESS)
}

/// `hostver call <FUNCTION>`
pub fn call(plugin: &Plugin<'_>, function: &str) -> CliResult<ExitCode> {
    let record = plugin
        .call(function, &[])
        .map_err(|e| CliError::failure(format!("Error: {e}")))?;
    println!("{}", record.repr());
    Ok(ExitCode::SUCCESS)
}

/// Render the output of `hostver schema`: one `index name` line per field, then the exposed functions.
pub fn render_schema(plugin: &Plugin<'_>) -> String {
    let ty = plugin.version_type();
    let mut out = format!("{} ({} fields)", ty.name(), ty.fields().len());
    // Writing to String cannot fail.
    for (i, field) in ty.fields().iter().enumerate() {
        let _ = write!(out, "\n  {i} {field}");
    }
    out.push_str("\nfunctions");
    for function in FUNCTIONS {
        let _ = write!(out, "\n  gcc.{}() -- {}", function.name, function.doc);
    }
    out
}

/// `hostver schema`
pub fn schema(plugin: &Plugin<'_>) -> CliResult<ExitCode> {
    println!("{}", render_schema(plugin));
    Ok(ExitCode::SUCCESS)
}
