//! Runtime configuration resolved from the environment.

use std::env;
use std::path::PathBuf;

use crate::storage::StorageError;

/// Overrides the data directory.
pub const DATA_DIR_VAR: &str = "SURVEYFORM_DATA_DIR";
/// `tracing_subscriber::EnvFilter` directives.
pub const LOG_FILTER_VAR: &str = "SURVEYFORM_LOG";
/// Overrides the log file location.
pub const LOG_FILE_VAR: &str = "SURVEYFORM_LOG_FILE";

const DEFAULT_LOG_FILTER: &str = "info";

/// Where the application keeps its data and logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the project store (`~/.local/share/surveyform` by default).
    pub data_dir: PathBuf,
    /// Log filter directives, e.g. `surveyform=debug`.
    pub log_filter: String,
    /// File that receives log output; the terminal belongs to the TUI.
    pub log_file: PathBuf,
}

impl Config {
    /// Resolves configuration from the process environment.
    pub fn from_env() -> Result<Self, StorageError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves configuration using `lookup` for variables, falling back to
    /// the XDG data directory.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StorageError> {
        let data_dir = match lookup(DATA_DIR_VAR).filter(|v| !v.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .ok_or(StorageError::NoDataDir)?
                .join("surveyform"),
        };
        let log_filter = lookup(LOG_FILTER_VAR)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let log_file = lookup(LOG_FILE_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("surveyform.log"));
        Ok(Self {
            data_dir,
            log_filter,
            log_file,
        })
    }
}
