//! Recovers Automa workflow execution logs from raw IndexedDB/LevelDB
//! table files.
//!
//! The extension keeps its execution history in an embedded key/value store
//! with no external read API, so this crate never parses the table format.
//! Instead it carves printable text straight out of the raw bytes, keeps the
//! strings that look like workflow evidence, recovers embedded JSON objects
//! and token-level field matches, rewrites them as human-readable records,
//! groups them by workflow, and serializes the result as CSV (plus an
//! optional JSON backup).
//!
//! The heuristics favor recall over precision: table dumps are mostly noise,
//! and a missed record is worse than an odd one. Completeness is explicitly
//! not guaranteed.

pub mod aggregate;
pub mod carver;
pub mod cleaner;
pub mod discovery;
pub mod error;
pub mod export;
pub mod humanize;
pub mod pipeline;
pub mod recover;
pub mod vocab;

pub use aggregate::WorkflowGroups;
pub use carver::{carve, DEFAULT_MIN_LENGTH};
pub use cleaner::validate;
pub use discovery::FileFilter;
pub use error::{Result, SalvageError};
pub use export::{OutputFile, SchemaVariant};
pub use humanize::{ReadableRecord, UNKNOWN_WORKFLOW};
pub use pipeline::{run, RunOutcome, RunSummary, SalvageConfig};
pub use recover::{JsonFragment, LogFragment, StructuredEntry};
