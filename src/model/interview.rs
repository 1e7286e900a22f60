use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::error::ModelError;
use crate::form::FormValues;

/// A scheduled or completed conversation with one interviewee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    pub title: String,
    pub interviewee: String,
    pub email: Option<String>,
    pub scheduled_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Interview {
    /// Builds an interview from the `title`, `interviewee`, `email` and
    /// `scheduled_on` (`YYYY-MM-DD`) fields.
    pub fn from_values(values: &FormValues) -> Result<Self, ModelError> {
        let title = values
            .non_empty("title")
            .ok_or(ModelError::MissingField("title"))?;
        let interviewee = values
            .non_empty("interviewee")
            .ok_or(ModelError::MissingField("interviewee"))?;
        let scheduled_on = values
            .non_empty("scheduled_on")
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|_| ModelError::InvalidDate(s.to_string()))
            })
            .transpose()?;
        Ok(Self {
            title: title.to_string(),
            interviewee: interviewee.to_string(),
            email: values.non_empty("email").map(str::to_string),
            scheduled_on,
            created_at: Utc::now(),
        })
    }
}
