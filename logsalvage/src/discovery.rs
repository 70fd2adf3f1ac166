//! Finds the extension's IndexedDB table directories under browser profile
//! roots, and picks which files inside are worth scanning. Missing roots and
//! missing layout levels are normal, not errors.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

const TABLE_DIR_PREFIX: &str = "chrome-extension_";
const TABLE_DIR_SUFFIX: &str = ".indexeddb.leveldb";

/// Size floor for the loose filter; smaller unnamed files are never logs.
const LOOSE_MIN_SIZE: u64 = 1024;

/// How files inside a table directory are selected for scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFilter {
    /// The store's own artifacts: `*.ldb`, `*.log`, `CURRENT`,
    /// `MANIFEST-000001`.
    #[default]
    Strict,
    /// Anything log-ish: name contains "log" or "workflow", a `.db`/`.json`
    /// extension, or more than 1024 bytes of content.
    Loose,
}

/// Lists table directories under each root's `Default/IndexedDB`.
///
/// Roots are visited in the given order and directories within a root in
/// listing order. A root without the expected layout contributes nothing.
pub async fn find_table_dirs(roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for root in roots {
        let indexeddb = root.join("Default").join("IndexedDB");
        let mut entries = match fs::read_dir(&indexeddb).await {
            Ok(entries) => entries,
            Err(_) => {
                debug!("No IndexedDB directory under {}", root.display());
                continue;
            }
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !name.starts_with(TABLE_DIR_PREFIX) || !name.ends_with(TABLE_DIR_SUFFIX) {
                continue;
            }
            let is_dir = entry
                .file_type()
                .await
                .map(|file_type| file_type.is_dir())
                .unwrap_or(false);
            if is_dir {
                found.push(entry.path());
            }
        }
    }

    found
}

/// Selects the files inside one table directory, in listing order.
pub async fn select_table_files(dir: &Path, filter: FileFilter) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Cannot list {}: {e}", dir.display());
            return files;
        }
    };

    while let Ok(Some(entry)) = entries.next_entry().await {
        let is_file = entry
            .file_type()
            .await
            .map(|file_type| file_type.is_file())
            .unwrap_or(false);
        if !is_file {
            continue;
        }

        let name = entry.file_name();
        let name = name.to_string_lossy();
        let selected = match filter {
            FileFilter::Strict => is_strict_match(&name),
            FileFilter::Loose => is_loose_match(&name, &entry).await,
        };
        if selected {
            files.push(entry.path());
        }
    }

    files
}

fn is_strict_match(name: &str) -> bool {
    name.ends_with(".ldb")
        || name.ends_with(".log")
        || name == "CURRENT"
        || name == "MANIFEST-000001"
}

async fn is_loose_match(name: &str, entry: &fs::DirEntry) -> bool {
    let lower = name.to_lowercase();
    if lower.contains("log")
        || lower.contains("workflow")
        || lower.ends_with(".db")
        || lower.ends_with(".json")
    {
        return true;
    }
    match entry.metadata().await {
        Ok(metadata) => metadata.len() > LOOSE_MIN_SIZE,
        Err(_) => false,
    }
}
