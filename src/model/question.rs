use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ModelError;
use crate::form::{Checkbox, FormValues};

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Free-text answer.
    Text,
    /// 1–5 rating.
    Scale,
    /// One of several predefined answers.
    Choice,
}

impl QuestionKind {
    pub const ALL: [Self; 3] = [Self::Text, Self::Scale, Self::Choice];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Scale => "scale",
            Self::Choice => "choice",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "Free text",
            Self::Scale => "Rating scale",
            Self::Choice => "Multiple choice",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ModelError::UnknownQuestionKind(s.to_string()))
    }
}

/// A question asked in a project's interviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub kind: QuestionKind,
    pub required: bool,
}

impl Question {
    /// Builds a question from the `prompt`, `kind` and `required` fields.
    pub fn from_values(values: &FormValues) -> Result<Self, ModelError> {
        let prompt = values
            .non_empty("prompt")
            .ok_or(ModelError::MissingField("prompt"))?;
        Ok(Self {
            prompt: prompt.to_string(),
            kind: values.get("kind").parse()?,
            required: Checkbox::is_checked(values.get("required")),
        })
    }
}
