//! Project persistence (JSONL) and data export.
//!
//! Each project is stored as a single `.jsonl` file: line 1 is metadata,
//! lines 2+ are interview and question records. Adding a record is a
//! single-line append with no read/rewrite.

mod error;
mod export;
mod store;

pub use error::StorageError;
pub use export::{ExportFormat, ExportOptions, default_export_path, export_project, render_export};
pub use store::Store;
