use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use logsalvage::{run, FileFilter, RunOutcome, SalvageConfig, SchemaVariant};
use tracing::info;

use crate::utils::{default_candidate_roots, init_logging};

mod utils;

#[derive(Parser, Debug)]
#[command(name = "logsalvage", version)]
#[command(about = "Recovers Automa workflow execution logs from raw IndexedDB/LevelDB table files")]
struct Args {
    /// Browser profile root to probe; repeatable. Defaults to the usual
    /// Chrome/Chromium locations plus /tmp/chrome-debug.
    #[arg(short, long = "root")]
    roots: Vec<PathBuf>,

    /// Directory the recovered files are written to
    #[arg(short, long, default_value = "exports/logs", env = "LOGSALVAGE_OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Minimum printable-run length kept when carving
    #[arg(long, default_value_t = logsalvage::DEFAULT_MIN_LENGTH)]
    min_length: usize,

    /// Scan every log-ish file instead of only the store's own artifacts
    #[arg(long)]
    loose: bool,

    /// Column layout for the per-workflow CSV files
    #[arg(long, value_enum, default_value_t = Schema::Enriched)]
    schema: Schema,

    /// Also write an automa_logs_<date>.json backup document
    #[arg(long)]
    json_backup: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Schema {
    Minimal,
    Enriched,
}

impl From<Schema> for SchemaVariant {
    fn from(schema: Schema) -> Self {
        match schema {
            Schema::Minimal => SchemaVariant::Minimal,
            Schema::Enriched => SchemaVariant::Enriched,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let Args {
        roots,
        output_dir,
        min_length,
        loose,
        schema,
        json_backup,
    } = Args::parse();

    let roots = if roots.is_empty() {
        default_candidate_roots()
    } else {
        roots
    };
    info!(
        "🚀 logsalvage v{} probing {} root(s)",
        env!("CARGO_PKG_VERSION"),
        roots.len()
    );

    let config = SalvageConfig {
        roots,
        output_dir,
        min_string_length: min_length,
        file_filter: if loose {
            FileFilter::Loose
        } else {
            FileFilter::Strict
        },
        schema: schema.into(),
        json_backup,
    };

    match run(&config).await? {
        RunOutcome::NothingFound => {
            println!("😕 No workflow logs found. Run a workflow first, or point --root at the right profile.");
        }
        RunOutcome::Completed(summary) => {
            println!(
                "✅ Recovered {} log record(s) across {} workflow(s)",
                summary.records, summary.workflows
            );
            println!(
                "   Scanned {} file(s) in {} table directories ({} skipped, {} bytes read)",
                summary.files_scanned, summary.table_dirs, summary.files_skipped, summary.bytes_read
            );
            println!(
                "   Status breakdown: {} success, {} failed",
                summary.success_records, summary.failed_records
            );
            println!("📁 Output files:");
            for file in &summary.output_files {
                println!("   {} ({} rows)", file.path.display(), file.rows);
            }
        }
    }

    Ok(())
}
