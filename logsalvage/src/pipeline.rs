//! The end-to-end recovery run: discover table directories, carve and
//! validate strings, recover structured entries, humanize, aggregate, and
//! export. One strictly sequential batch job; the whole recovered record
//! set lives in memory until serialization.

use std::path::PathBuf;

use chrono::Local;
use serde::Serialize;
use tokio::fs;
use tracing::{info, warn};

use crate::aggregate::WorkflowGroups;
use crate::carver::{self, DEFAULT_MIN_LENGTH};
use crate::cleaner;
use crate::discovery::{self, FileFilter};
use crate::error::{Result, SalvageError};
use crate::export::{self, OutputFile, SchemaVariant};
use crate::humanize;
use crate::recover::{self, StructuredEntry};
use crate::vocab;

/// Tunables for one recovery run.
#[derive(Debug, Clone)]
pub struct SalvageConfig {
    /// Browser profile roots to probe, in precedence order.
    pub roots: Vec<PathBuf>,
    /// Where output files land. Created if missing.
    pub output_dir: PathBuf,
    /// Minimum printable-run length kept by the carver.
    pub min_string_length: usize,
    /// File selection inside table directories.
    pub file_filter: FileFilter,
    /// Column layout of the per-workflow CSV files.
    pub schema: SchemaVariant,
    /// Also write an `automa_logs_<date>.json` backup document.
    pub json_backup: bool,
}

impl Default for SalvageConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            output_dir: PathBuf::from("exports/logs"),
            min_string_length: DEFAULT_MIN_LENGTH,
            file_filter: FileFilter::default(),
            schema: SchemaVariant::default(),
            json_backup: false,
        }
    }
}

/// Counters accumulated across a completed run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub table_dirs: usize,
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub bytes_read: u64,
    pub strings_carved: usize,
    pub strings_validated: usize,
    pub json_fragments: usize,
    pub log_fragments: usize,
    pub records: usize,
    pub workflows: usize,
    /// Records whose log text reports success, per the status word list.
    pub success_records: usize,
    /// Records whose log text reports failure or error.
    pub failed_records: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub output_files: Vec<OutputFile>,
}

/// Distinguishes "nothing to recover" from a run that wrote output.
///
/// A missing profile, a missing IndexedDB layout, or table files with no
/// recoverable content are all normal early states of the world, not
/// failures; callers should treat [`RunOutcome::NothingFound`] as a clean
/// exit.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// No table directories, or nothing recoverable inside them. No files
    /// were written.
    NothingFound,
    Completed(RunSummary),
}

#[derive(Serialize)]
struct BackupMetadata {
    exported_at: String,
    exporter_version: &'static str,
    total_workflows: usize,
    total_records: usize,
}

#[derive(Serialize)]
struct BackupWorkflow<'a> {
    workflow: &'a str,
    entries: &'a [String],
}

#[derive(Serialize)]
struct BackupDocument<'a> {
    export_metadata: BackupMetadata,
    statistics: &'a RunSummary,
    workflows: Vec<BackupWorkflow<'a>>,
}

/// Runs the whole pipeline once.
///
/// Per-file read failures are logged and skipped; only output-side
/// infrastructure failures (uncreatable directory, failed write) surface
/// as errors.
pub async fn run(config: &SalvageConfig) -> Result<RunOutcome> {
    if config.min_string_length == 0 {
        return Err(SalvageError::InvalidConfig(
            "min_string_length must be at least 1".to_string(),
        ));
    }

    info!(
        "🔍 Probing {} candidate root(s) for table directories",
        config.roots.len()
    );
    let table_dirs = discovery::find_table_dirs(&config.roots).await;
    if table_dirs.is_empty() {
        info!("No table directories found; nothing to recover");
        return Ok(RunOutcome::NothingFound);
    }
    info!("📂 Found {} table directories", table_dirs.len());

    let mut summary = RunSummary {
        table_dirs: table_dirs.len(),
        ..Default::default()
    };
    let mut entries: Vec<StructuredEntry> = Vec::new();

    for dir in &table_dirs {
        let files = discovery::select_table_files(dir, config.file_filter).await;
        info!("📄 {} selected file(s) in {}", files.len(), dir.display());

        for file in files {
            let buffer = match fs::read(&file).await {
                Ok(buffer) => buffer,
                Err(e) => {
                    warn!("Skipping unreadable file {}: {e}", file.display());
                    summary.files_skipped += 1;
                    continue;
                }
            };
            summary.files_scanned += 1;
            summary.bytes_read += buffer.len() as u64;

            let candidates = carver::carve(&buffer, config.min_string_length);
            summary.strings_carved += candidates.len();

            for candidate in &candidates {
                let Some(validated) = cleaner::validate(candidate) else {
                    continue;
                };
                summary.strings_validated += 1;
                entries.extend(recover::recover_string(&validated));
            }
        }
    }

    for entry in &entries {
        match entry {
            StructuredEntry::Json(_) => summary.json_fragments += 1,
            StructuredEntry::Log(_) => summary.log_fragments += 1,
        }
    }
    info!(
        "🧩 Recovered {} JSON fragment(s) and {} log fragment(s) from {} file(s)",
        summary.json_fragments, summary.log_fragments, summary.files_scanned
    );

    let records: Vec<_> = entries.iter().filter_map(humanize::humanize).collect();
    if records.is_empty() {
        info!("No readable records survived classification; nothing to write");
        return Ok(RunOutcome::NothingFound);
    }

    let groups = WorkflowGroups::from_records(records);
    summary.records = groups.record_count();
    summary.workflows = groups.workflow_count();
    for (_, logs) in groups.iter() {
        for log in logs {
            match vocab::find_status_word(log) {
                Some("success") => summary.success_records += 1,
                Some("failed") | Some("error") => summary.failed_records += 1,
                _ => {}
            }
        }
    }

    export::ensure_output_dir(&config.output_dir).await?;
    let date = export::current_date();
    let mut output_files =
        export::export_csv_files(&config.output_dir, &groups, config.schema, &date).await?;

    if config.json_backup {
        let path = config.output_dir.join(export::backup_json_filename(&date));
        let document = BackupDocument {
            export_metadata: BackupMetadata {
                exported_at: Local::now().to_rfc3339(),
                exporter_version: env!("CARGO_PKG_VERSION"),
                total_workflows: groups.workflow_count(),
                total_records: groups.record_count(),
            },
            statistics: &summary,
            workflows: groups
                .iter()
                .map(|(workflow, logs)| BackupWorkflow {
                    workflow,
                    entries: logs,
                })
                .collect(),
        };
        export::write_json_document(&path, &document).await?;
        output_files.push(OutputFile {
            path,
            rows: groups.record_count(),
        });
    }

    summary.output_files = output_files;
    info!(
        "✅ Recovered {} record(s) across {} workflow(s); wrote {} file(s)",
        summary.records,
        summary.workflows,
        summary.output_files.len()
    );

    Ok(RunOutcome::Completed(summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_defaults() {
        let config = SalvageConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("exports/logs"));
        assert_eq!(config.min_string_length, DEFAULT_MIN_LENGTH);
        assert_eq!(config.file_filter, FileFilter::Strict);
        assert_eq!(config.schema, SchemaVariant::Enriched);
        assert!(!config.json_backup);
        assert!(config.roots.is_empty());
    }

    #[tokio::test]
    async fn zero_min_length_is_rejected() {
        let config = SalvageConfig {
            min_string_length: 0,
            ..Default::default()
        };
        assert!(matches!(
            run(&config).await,
            Err(SalvageError::InvalidConfig(_))
        ));
    }
}
