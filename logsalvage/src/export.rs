//! Serializes aggregated workflow logs to disk: one CSV per workflow, one
//! combined CSV, and an optional JSON backup document. Quoting follows the
//! conventional CSV rule and is covered by a round-trip test.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use tokio::fs;
use tracing::{debug, warn};

use crate::aggregate::WorkflowGroups;
use crate::error::{Result, SalvageError};
use crate::vocab;

const MINIMAL_HEADER: &str = "workflow_name,log_entry";
const ENRICHED_HEADER: &str = "timestamp,workflow_name,action,status";
const COMBINED_HEADER: &str = "timestamp,workflow_name,log_entry,action,status";

/// Sanitized workflow names are capped at this length inside filenames.
const MAX_FILENAME_NAME_LEN: usize = 30;

/// Column layout of the per-workflow CSV files. The combined file always
/// uses the five-column layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaVariant {
    /// `workflow_name,log_entry`
    Minimal,
    /// `timestamp,workflow_name,action,status`
    #[default]
    Enriched,
}

/// A file written by the exporter, with the number of data rows it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFile {
    pub path: PathBuf,
    pub rows: usize,
}

/// Wraps a field in double quotes when it contains a comma, a newline, or a
/// double quote; embedded quotes are doubled. Everything else passes through
/// unchanged.
pub fn escape_csv_field(field: &str) -> String {
    if field.contains(|c| matches!(c, ',' | '\n' | '"')) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn push_row(out: &mut String, fields: &[&str]) {
    let escaped: Vec<String> = fields.iter().map(|field| escape_csv_field(field)).collect();
    out.push_str(&escaped.join(","));
    out.push('\n');
}

/// Re-derives the enriched columns from a finished log line, falling back to
/// `"action"` / `"info"` when the word lists find nothing.
fn derive_fields(log: &str) -> (String, &'static str, &'static str) {
    let timestamp = vocab::TIME_RE
        .find(log)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    let action = vocab::find_action_word(log).unwrap_or("action");
    let status = vocab::find_status_word(log).unwrap_or("info");
    (timestamp, action, status)
}

/// Renders one workflow group as CSV text, header included.
pub fn render_workflow_csv(workflow: &str, logs: &[String], schema: SchemaVariant) -> String {
    let mut out = String::new();
    match schema {
        SchemaVariant::Minimal => {
            out.push_str(MINIMAL_HEADER);
            out.push('\n');
            for log in logs {
                push_row(&mut out, &[workflow, log]);
            }
        }
        SchemaVariant::Enriched => {
            out.push_str(ENRICHED_HEADER);
            out.push('\n');
            for log in logs {
                let (timestamp, action, status) = derive_fields(log);
                push_row(&mut out, &[&timestamp, workflow, action, status]);
            }
        }
    }
    out
}

/// Renders every group into the combined five-column CSV, header included.
pub fn render_combined_csv(groups: &WorkflowGroups) -> String {
    let mut out = String::new();
    out.push_str(COMBINED_HEADER);
    out.push('\n');
    for (workflow, logs) in groups.iter() {
        for log in logs {
            let (timestamp, action, status) = derive_fields(log);
            push_row(&mut out, &[&timestamp, workflow, log, action, status]);
        }
    }
    out
}

/// Replaces anything other than ASCII alphanumerics, whitespace, `_`, or `-`
/// with `_` and truncates so the name stays filesystem-friendly.
pub fn sanitize_workflow_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_whitespace() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .take(MAX_FILENAME_NAME_LEN)
        .collect()
}

/// Today's date in the form the filenames embed. Same-day reruns overwrite
/// their own output instead of accumulating dated copies.
pub fn current_date() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

fn csv_filename_from_stem(stem: &str, date: &str) -> String {
    format!("automa_logs_{stem}_{date}.csv")
}

pub fn workflow_csv_filename(workflow: &str, date: &str) -> String {
    csv_filename_from_stem(&sanitize_workflow_name(workflow), date)
}

pub fn combined_csv_filename(date: &str) -> String {
    format!("automa_logs_combined_{date}.csv")
}

pub fn backup_json_filename(date: &str) -> String {
    format!("automa_logs_{date}.json")
}

pub async fn ensure_output_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .map_err(|source| SalvageError::CreateOutputDir {
            path: path.to_path_buf(),
            source,
        })
}

async fn write_text_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .await
        .map_err(|source| SalvageError::WriteOutput {
            path: path.to_path_buf(),
            source,
        })
}

/// Writes the per-workflow files followed by the combined file.
///
/// The output directory must already exist. Files land in group order so a
/// rerun over the same data produces the same sequence of writes. Distinct
/// workflows whose names sanitize and truncate to the same stem get numeric
/// suffixes, so no group silently overwrites another's file.
pub async fn export_csv_files(
    output_dir: &Path,
    groups: &WorkflowGroups,
    schema: SchemaVariant,
    date: &str,
) -> Result<Vec<OutputFile>> {
    let mut written = Vec::new();
    let mut stems_used: HashMap<String, usize> = HashMap::new();

    for (workflow, logs) in groups.iter() {
        let stem = sanitize_workflow_name(workflow);
        let seen = stems_used.entry(stem.clone()).or_insert(0);
        *seen += 1;
        let filename = if *seen == 1 {
            csv_filename_from_stem(&stem, date)
        } else {
            warn!("Workflow {workflow:?} collides with an earlier group on filename stem {stem:?}");
            csv_filename_from_stem(&format!("{stem}_{seen}"), date)
        };
        let path = output_dir.join(filename);
        let content = render_workflow_csv(workflow, logs, schema);
        write_text_file(&path, &content).await?;
        debug!("Wrote {} rows to {}", logs.len(), path.display());
        written.push(OutputFile {
            path,
            rows: logs.len(),
        });
    }

    let combined_path = output_dir.join(combined_csv_filename(date));
    let combined = render_combined_csv(groups);
    write_text_file(&combined_path, &combined).await?;
    debug!(
        "Wrote {} rows to {}",
        groups.record_count(),
        combined_path.display()
    );
    written.push(OutputFile {
        path: combined_path,
        rows: groups.record_count(),
    });

    Ok(written)
}

/// Writes a pretty-printed JSON document next to the CSV files.
pub async fn write_json_document(path: &Path, document: &impl Serialize) -> Result<()> {
    let text = serde_json::to_string_pretty(document)?;
    write_text_file(path, &text).await
}
