use std::error::Error;

/// Errors raised while assembling a [`FormSchema`](super::FormSchema).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Two descriptors share a name.
    #[error("duplicate field name: {0}")]
    DuplicateField(String),

    /// A rule references a field the schema does not declare.
    #[error("rule references unknown field: {0}")]
    UnknownField(String),

    /// A column span outside the 12-column grid.
    #[error("field {name} spans {columns} columns; expected 1..=12")]
    InvalidColumns {
        /// The offending field.
        name: String,
        /// The declared span.
        columns: u8,
    },
}

/// Failure reported by a submit handler.
///
/// Retained by the [`FormController`](super::FormController) while the
/// status is [`SubmissionStatus::Error`](super::SubmissionStatus::Error).
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The handler refused the submission for its own reasons.
    #[error("{0}")]
    Rejected(String),

    /// The handler tried and failed; the cause is kept as the source.
    #[error("{0}")]
    Failed(#[source] Box<dyn Error + Send + Sync>),
}

impl SubmitError {
    /// Wraps any handler-side error as [`SubmitError::Failed`].
    pub fn failed(err: impl Error + Send + Sync + 'static) -> Self {
        Self::Failed(Box::new(err))
    }
}
