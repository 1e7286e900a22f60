/// Errors raised while building domain records from form values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("{0} cannot be empty")]
    MissingField(&'static str),
    #[error("invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),
    #[error("unknown question kind: {0}")]
    UnknownQuestionKind(String),
}
