use std::path::PathBuf;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An I/O error occurred while reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON serialization or deserialization error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The platform does not provide a data directory.
    #[error("could not determine XDG data directory")]
    NoDataDir,

    /// The platform does not provide a home directory.
    #[error("could not determine home directory")]
    NoHomeDir,

    /// A JSONL project file exists but contains no metadata line.
    #[error("project file is empty: {0}")]
    EmptyProjectFile(PathBuf),

    /// A project with the same name (case-insensitive) already exists.
    #[error("a project named {name:?} already exists")]
    DuplicateProject {
        /// The conflicting project name.
        name: String,
    },

    /// Another project already occupies this ID's file.
    #[error("project ID {id} is already in use; please try again")]
    ProjectIdTaken {
        /// The conflicting project ID.
        id: String,
    },

    /// An export format name that is not supported.
    #[error("unsupported export format: {0}")]
    UnknownFormat(String),
}
